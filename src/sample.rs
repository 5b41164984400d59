use core::num::NonZeroU64;
use core::time::Duration;

use arrayvec::ArrayVec;

use crate::format::SampleFormat;
use crate::time::{MediaTimeStamp, Timecode};
use crate::types::{Offset, Orientation, ScaleRotation, Size, TilingDescription, YuvToRgbMatrix};

/// Upper bound on the mip levels [`TextureSample::mip_sizes`] reports.
pub const MAX_MIPS: usize = 16;

/// Opaque handle to a texture owned by the graphics device layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(NonZeroU64);

impl TextureHandle {
    /// Wrap a raw device handle. Returns `None` for the null handle.
    pub const fn new(raw: u64) -> Option<Self> {
        match NonZeroU64::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

/// Where a sample's texels live. Exactly one of the two, always.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePayload<'a> {
    /// Host memory, laid out with [`TextureSample::stride`] bytes per row.
    Buffer(&'a [u8]),
    /// A device resident texture.
    Texture(TextureHandle),
}

/// One decoded frame as handed from a media player to a texture sink.
///
/// Samples are produced fully formed by a decoder and are read-only from
/// then on. Every accessor is total over a validly constructed sample; see
/// [`validate`](crate::contract::validate) for the checks that make one valid.
pub trait TextureSample {
    /// The texel payload. Buffer data is only valid while the sample lives.
    fn payload(&self) -> SamplePayload<'_>;

    /// Host buffer holding the texels, or `None` if the sample holds a texture.
    fn buffer(&self) -> Option<&[u8]> {
        match self.payload() {
            SamplePayload::Buffer(data) => Some(data),
            SamplePayload::Texture(_) => None,
        }
    }

    /// Device texture, or `None` if the sample holds a host buffer.
    fn texture(&self) -> Option<TextureHandle> {
        match self.payload() {
            SamplePayload::Buffer(_) => None,
            SamplePayload::Texture(handle) => Some(handle),
        }
    }

    /// Buffer dimensions in texels, including any padding the format needs.
    fn dim(&self) -> Size;

    /// Displayed dimensions in pixels. Never larger than [`dim`](Self::dim).
    fn output_dim(&self) -> Size;

    /// Row pitch of the host buffer in bytes.
    fn stride(&self) -> u32;

    fn format(&self) -> SampleFormat;

    /// Mip levels including the base level.
    fn num_mips(&self) -> u8 {
        1
    }

    /// Dimensions of each mip level, base level first.
    fn mip_sizes(&self) -> ArrayVec<Size, MAX_MIPS> {
        let mut sizes = ArrayVec::new();
        let mut size = self.dim();
        for _ in 0..usize::from(self.num_mips()).min(MAX_MIPS) {
            sizes.push(size);
            size = Size::new((size.width / 2).max(1), (size.height / 2).max(1));
        }
        sizes
    }

    fn tiling_description(&self) -> TilingDescription {
        TilingDescription::default()
    }

    /// How long the sample is shown. Zero means until the next sample.
    fn duration(&self) -> Duration;

    /// Presentation time on the player's clock.
    fn time(&self) -> MediaTimeStamp;

    fn timecode(&self) -> Option<Timecode> {
        None
    }

    /// Whether a consumer may hold on to this sample.
    ///
    /// A non-cacheable sample becomes invalid as soon as the next one is
    /// available; consumers must only keep the latest.
    fn is_cacheable(&self) -> bool;

    fn is_output_srgb(&self) -> bool;

    /// Rotation of the payload relative to how it should be displayed.
    fn orientation(&self) -> Orientation {
        Orientation::Original
    }

    /// Output width over output height, or `None` for an empty output height.
    fn aspect_ratio(&self) -> Option<f64> {
        let output = self.output_dim();
        (output.height != 0).then(|| f64::from(output.width) / f64::from(output.height))
    }

    /// Texture coordinate transform for "external image" output.
    ///
    /// Use [`orientation`](Self::orientation) for every other output path.
    fn scale_rotation(&self) -> ScaleRotation {
        ScaleRotation::IDENTITY
    }

    /// Applied after [`scale_rotation`](Self::scale_rotation); "external image" output only.
    fn offset(&self) -> Offset {
        Offset::ZERO
    }

    fn yuv_to_rgb_matrix(&self) -> &YuvToRgbMatrix {
        &YuvToRgbMatrix::REC709_SCALED
    }

    /// Clear internal state before the sample is reused.
    fn reset(&mut self) {}
}
