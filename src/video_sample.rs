use alloc::vec::Vec;
use core::time::Duration;

use log::trace;
use static_assertions::assert_impl_all;

use crate::contract;
use crate::error::Error;
use crate::format::SampleFormat;
use crate::sample::{SamplePayload, TextureHandle, TextureSample};
use crate::time::{MediaTimeStamp, Timecode};
use crate::types::{Offset, Orientation, ScaleRotation, Size, TilingDescription, YuvToRgbMatrix};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Storage {
    Buffer(Vec<u8>),
    Texture(TextureHandle),
}

/// A texture sample that owns its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSample {
    storage: Storage,
    format: SampleFormat,
    dim: Size,
    output_dim: Size,
    stride: u32,
    num_mips: u8,
    tiling: TilingDescription,
    time: MediaTimeStamp,
    duration: Duration,
    timecode: Option<Timecode>,
    cacheable: bool,
    srgb: bool,
    orientation: Orientation,
    scale_rotation: ScaleRotation,
    offset: Offset,
    yuv_to_rgb: YuvToRgbMatrix,
}

assert_impl_all!(VideoSample: Send, Sync);

impl VideoSample {
    pub fn builder(format: SampleFormat, dim: Size) -> VideoSampleBuilder {
        VideoSampleBuilder::new(format, dim)
    }

    /// Copy the next frame's texels into the host buffer, reusing its
    /// allocation.
    ///
    /// The sample is checked again afterwards. On failure the buffer is left
    /// empty, so a rejected frame is never mistaken for a valid one.
    pub fn refill(&mut self, data: &[u8]) -> Result<(), Error> {
        let Storage::Buffer(buffer) = &mut self.storage else {
            return Err(Error::NotHostBuffer);
        };
        buffer.clear();
        buffer.extend_from_slice(data);

        if let Err(e) = contract::validate(self) {
            if let Storage::Buffer(buffer) = &mut self.storage {
                buffer.clear();
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn set_time(&mut self, time: MediaTimeStamp) {
        self.time = time;
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_timecode(&mut self, timecode: Option<Timecode>) {
        self.timecode = timecode;
    }
}

impl TextureSample for VideoSample {
    fn payload(&self) -> SamplePayload<'_> {
        match &self.storage {
            Storage::Buffer(data) => SamplePayload::Buffer(data),
            Storage::Texture(handle) => SamplePayload::Texture(*handle),
        }
    }

    fn dim(&self) -> Size {
        self.dim
    }

    fn output_dim(&self) -> Size {
        self.output_dim
    }

    fn stride(&self) -> u32 {
        self.stride
    }

    fn format(&self) -> SampleFormat {
        self.format
    }

    fn num_mips(&self) -> u8 {
        self.num_mips
    }

    fn tiling_description(&self) -> TilingDescription {
        self.tiling
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn time(&self) -> MediaTimeStamp {
        self.time
    }

    fn timecode(&self) -> Option<Timecode> {
        self.timecode
    }

    fn is_cacheable(&self) -> bool {
        self.cacheable
    }

    fn is_output_srgb(&self) -> bool {
        self.srgb
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn scale_rotation(&self) -> ScaleRotation {
        self.scale_rotation
    }

    fn offset(&self) -> Offset {
        self.offset
    }

    fn yuv_to_rgb_matrix(&self) -> &YuvToRgbMatrix {
        &self.yuv_to_rgb
    }

    /// Empties the buffer (keeping its allocation) and drops per-frame
    /// timing. Layout and the producer's presentation attributes are kept
    /// for the next frame.
    fn reset(&mut self) {
        if let Storage::Buffer(data) = &mut self.storage {
            data.clear();
        }
        self.time = MediaTimeStamp::default();
        self.duration = Duration::ZERO;
        self.timecode = None;
    }
}

/// Builder for [`VideoSample`].
#[derive(Debug, Clone)]
pub struct VideoSampleBuilder {
    storage: Option<Storage>,
    format: SampleFormat,
    dim: Size,
    output_dim: Option<Size>,
    stride: Option<u32>,
    num_mips: u8,
    tiling: TilingDescription,
    time: MediaTimeStamp,
    duration: Duration,
    timecode: Option<Timecode>,
    cacheable: bool,
    srgb: bool,
    orientation: Orientation,
    scale_rotation: ScaleRotation,
    offset: Offset,
    yuv_to_rgb: YuvToRgbMatrix,
}

impl VideoSampleBuilder {
    pub fn new(format: SampleFormat, dim: Size) -> Self {
        Self {
            storage: None,
            format,
            dim,
            output_dim: None,
            stride: None,
            num_mips: 1,
            tiling: TilingDescription::default(),
            time: MediaTimeStamp::default(),
            duration: Duration::ZERO,
            timecode: None,
            cacheable: true,
            srgb: false,
            orientation: Orientation::Original,
            scale_rotation: ScaleRotation::IDENTITY,
            offset: Offset::ZERO,
            yuv_to_rgb: YuvToRgbMatrix::REC709_SCALED,
        }
    }

    /// Store texels in host memory. Replaces any texture set before.
    pub fn buffer(mut self, data: Vec<u8>) -> Self {
        self.storage = Some(Storage::Buffer(data));
        self
    }

    /// Reference a device texture. Replaces any buffer set before.
    pub fn texture(mut self, handle: TextureHandle) -> Self {
        self.storage = Some(Storage::Texture(handle));
        self
    }

    /// Defaults to the buffer dimensions.
    pub fn output_dim(mut self, output_dim: Size) -> Self {
        self.output_dim = Some(output_dim);
        self
    }

    /// Defaults to the format's minimum row pitch.
    pub fn stride(mut self, stride: u32) -> Self {
        self.stride = Some(stride);
        self
    }

    pub fn num_mips(mut self, num_mips: u8) -> Self {
        self.num_mips = num_mips;
        self
    }

    pub fn tiling(mut self, tiling: TilingDescription) -> Self {
        self.tiling = tiling;
        self
    }

    pub fn time(mut self, time: MediaTimeStamp) -> Self {
        self.time = time;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn timecode(mut self, timecode: Timecode) -> Self {
        self.timecode = Some(timecode);
        self
    }

    pub fn cacheable(mut self, cacheable: bool) -> Self {
        self.cacheable = cacheable;
        self
    }

    pub fn srgb(mut self, srgb: bool) -> Self {
        self.srgb = srgb;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn scale_rotation(mut self, scale_rotation: ScaleRotation, offset: Offset) -> Self {
        self.scale_rotation = scale_rotation;
        self.offset = offset;
        self
    }

    pub fn yuv_to_rgb_matrix(mut self, matrix: YuvToRgbMatrix) -> Self {
        self.yuv_to_rgb = matrix;
        self
    }

    pub fn build(self) -> Result<VideoSample, Error> {
        let storage = self.storage.ok_or(Error::MissingPayload)?;
        let stride = self
            .stride
            .or_else(|| self.format.min_stride(self.dim.width))
            .unwrap_or(0);

        let sample = VideoSample {
            storage,
            format: self.format,
            dim: self.dim,
            output_dim: self.output_dim.unwrap_or(self.dim),
            stride,
            num_mips: self.num_mips,
            tiling: self.tiling,
            time: self.time,
            duration: self.duration,
            timecode: self.timecode,
            cacheable: self.cacheable,
            srgb: self.srgb,
            orientation: self.orientation,
            scale_rotation: self.scale_rotation,
            offset: self.offset,
            yuv_to_rgb: self.yuv_to_rgb,
        };
        contract::validate(&sample)?;

        trace!(
            "built {} sample {} at {:?}",
            sample.format, sample.dim, sample.time.time
        );
        Ok(sample)
    }
}
