use std::time::Duration;

use media_texture_sample::contract::validate;
use media_texture_sample::{
    Error, FrameRate, MediaTimeStamp, Offset, Orientation, SampleFormat, ScaleRotation, Size,
    TextureHandle, TextureSample, Timecode, TilingDescription, VideoSample, YuvToRgbMatrix,
};

fn host_sample(format: SampleFormat, dim: Size) -> VideoSample {
    let stride = format.min_stride(dim.width).unwrap();
    let len = stride as usize * format.buffer_rows(dim.height) as usize;
    VideoSample::builder(format, dim)
        .buffer(vec![0; len])
        .build()
        .unwrap()
}

#[test]
fn every_defined_format_builds_a_minimal_host_sample() {
    for format in SampleFormat::ALL {
        if format == SampleFormat::Undefined {
            continue;
        }
        let sample = host_sample(format, Size::new(64, 36));
        assert!(sample.buffer().is_some(), "{format}");
        assert!(sample.texture().is_none(), "{format}");
        assert!(validate(&sample).is_ok(), "{format}");
    }
}

#[test]
fn undefined_format_only_travels_as_texture() {
    let err = VideoSample::builder(SampleFormat::Undefined, Size::new(4, 4))
        .buffer(vec![0; 64])
        .build()
        .unwrap_err();
    assert_eq!(err, Error::UndefinedFormat);

    let sample = VideoSample::builder(SampleFormat::Undefined, Size::new(4, 4))
        .texture(TextureHandle::new(1).unwrap())
        .build()
        .unwrap();
    assert!(sample.buffer().is_none());
}

#[test]
fn output_never_exceeds_buffer() {
    let err = VideoSample::builder(SampleFormat::CharNV12, Size::new(1920, 1080))
        .output_dim(Size::new(1920, 1088))
        .texture(TextureHandle::new(9).unwrap())
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::OutputExceedsBuffer {
            output: Size::new(1920, 1088),
            buffer: Size::new(1920, 1080),
        }
    );
}

#[test]
fn accessor_defaults() {
    let sample = host_sample(SampleFormat::CharUYVY, Size::new(720, 576));
    assert_eq!(sample.num_mips(), 1);
    assert_eq!(sample.tiling_description(), TilingDescription::default());
    assert!(!sample.tiling_description().is_valid());
    assert_eq!(sample.orientation(), Orientation::Original);
    assert_eq!(sample.scale_rotation(), ScaleRotation::IDENTITY);
    assert_eq!(sample.offset(), Offset::ZERO);
    assert_eq!(sample.timecode(), None);
    assert_eq!(sample.duration(), Duration::ZERO);
    assert_eq!(
        sample.yuv_to_rgb_matrix().rows,
        [
            [1.16438356164, 0.0, 1.792652263418, 0.0],
            [1.16438356164, -0.213237021569, -0.533004040142, 0.0],
            [1.16438356164, 2.112419281991, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ]
    );
}

#[test]
fn aspect_ratio_follows_output_dim() {
    let sample = VideoSample::builder(SampleFormat::CharBGRA, Size::new(1920, 1088))
        .output_dim(Size::new(1920, 1080))
        .texture(TextureHandle::new(3).unwrap())
        .build()
        .unwrap();
    assert_eq!(sample.aspect_ratio(), Some(1920.0 / 1080.0));

    let empty = VideoSample::builder(SampleFormat::CharBGRA, Size::new(16, 0))
        .texture(TextureHandle::new(3).unwrap())
        .build()
        .unwrap();
    assert_eq!(empty.aspect_ratio(), None);
}

#[test]
fn metadata_overrides() {
    let rate = FrameRate::new(30000, 1001);
    let time = Duration::from_secs(61);
    let sample = VideoSample::builder(SampleFormat::DXT5, Size::new(256, 256))
        .texture(TextureHandle::new(11).unwrap())
        .num_mips(9)
        .tiling(TilingDescription {
            tile_count: Size::new(2, 2),
            tile_size: Size::new(128, 128),
            border_size: 0,
        })
        .time(MediaTimeStamp::with_sequence_index(time, 2))
        .duration(Duration::from_nanos(33_366_667))
        .timecode(Timecode::from_duration(time, rate, true))
        .cacheable(false)
        .srgb(true)
        .orientation(Orientation::Cw90)
        .yuv_to_rgb_matrix(YuvToRgbMatrix::REC601_SCALED)
        .build()
        .unwrap();

    assert!(sample.tiling_description().is_valid());
    assert_eq!(sample.time().sequence_index, 2);
    assert_eq!(
        sample.timecode().map(|tc| tc.to_string()).as_deref(),
        Some("00:01:01;00")
    );
    assert!(!sample.is_cacheable());
    assert!(sample.is_output_srgb());
    assert_eq!(sample.orientation().oriented(sample.output_dim()), Size::new(256, 256));
    assert_eq!(*sample.yuv_to_rgb_matrix(), YuvToRgbMatrix::REC601_SCALED);

    let mips = sample.mip_sizes();
    assert_eq!(mips.len(), 9);
    assert_eq!(mips[1], Size::new(128, 128));
    assert_eq!(mips[8], Size::new(1, 1));
}

#[test]
fn zero_mips_is_rejected() {
    let err = VideoSample::builder(SampleFormat::CharBGRA, Size::new(4, 4))
        .texture(TextureHandle::new(5).unwrap())
        .num_mips(0)
        .build()
        .unwrap_err();
    assert_eq!(err, Error::NoMips);
}
