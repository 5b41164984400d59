use core::time::Duration;

use objc2_core_media::CMTime;

use crate::format::SampleFormat;

pub mod pixel_buffer;

pub use pixel_buffer::PixelBufferSample;

const CM_TIME_FLAGS_VALID: u32 = 1;

pub(crate) fn fourcc_to_sample_format(fourcc: u32) -> Option<SampleFormat> {
    // kCVPixelFormatType values
    #[allow(clippy::mistyped_literal_suffixes)]
    match fourcc {
        0x34_32_30_76 => Some(SampleFormat::CharNV12),    // '420v'
        0x34_32_30_66 => Some(SampleFormat::CharNV12),    // '420f'
        0x79_75_76_73 => Some(SampleFormat::CharYUY2),    // 'yuvs'
        0x32_76_75_79 => Some(SampleFormat::CharUYVY),    // '2vuy'
        0x42_47_52_41 => Some(SampleFormat::CharBGRA),    // 'BGRA'
        0x6C_31_30_72 => Some(SampleFormat::CharBGR10A2), // 'l10r'
        0x76_32_31_30 => Some(SampleFormat::YUVv210),     // 'v210'
        0x79_34_31_36 => Some(SampleFormat::Y416),        // 'y416'
        0x52_47_68_41 => Some(SampleFormat::FloatRGBA),   // 'RGhA'
        _ => None,
    }
}

/// Non-negative duration of a valid `CMTime`; zero for anything else.
pub(crate) fn cm_time_to_duration(time: CMTime) -> Duration {
    if time.flags.0 & CM_TIME_FLAGS_VALID == 0 || time.timescale <= 0 || time.value < 0 {
        return Duration::ZERO;
    }
    let timescale = time.timescale as u64;
    let value = time.value as u64;
    let nanos = u128::from(value % timescale) * 1_000_000_000 / u128::from(timescale);
    Duration::new(value / timescale, nanos as u32)
}

#[cfg(test)]
mod tests {
    use objc2_core_media::CMTimeFlags;

    use super::*;

    fn cm_time(value: i64, timescale: i32, flags: u32) -> CMTime {
        CMTime {
            value,
            timescale,
            flags: CMTimeFlags(flags),
            epoch: 0,
        }
    }

    #[test]
    fn fourcc_mapping() {
        assert_eq!(
            fourcc_to_sample_format(u32::from_be_bytes(*b"420f")),
            Some(SampleFormat::CharNV12)
        );
        assert_eq!(
            fourcc_to_sample_format(u32::from_be_bytes(*b"v210")),
            Some(SampleFormat::YUVv210)
        );
        assert_eq!(fourcc_to_sample_format(u32::from_be_bytes(*b"jpeg")), None);
    }

    #[test]
    fn cm_time_conversion() {
        assert_eq!(
            cm_time_to_duration(cm_time(3003, 90000, CM_TIME_FLAGS_VALID)),
            Duration::from_nanos(33_366_666)
        );
        assert_eq!(cm_time_to_duration(cm_time(3003, 90000, 0)), Duration::ZERO);
        assert_eq!(
            cm_time_to_duration(cm_time(-1, 600, CM_TIME_FLAGS_VALID)),
            Duration::ZERO
        );
    }
}
