//! Pixel layouts a decoder may hand to a texture sink.
//!
//! Some of these are natively supported by renderers, others need a conversion
//! pass on the sink side. For the packed YUV layouts see <https://www.fourcc.org/yuv.php>.

use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use static_assertions::const_assert_eq;

/// Pixel layout of a texture sample.
///
/// The set is closed on purpose: a new layout has to be added here and to
/// every `match` that dispatches on it.
#[repr(u8)]
#[allow(non_camel_case_types)]
#[cfg_attr(test, derive(strum::EnumIter))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum SampleFormat {
    /// Format not defined.
    Undefined = 0,
    /// Four 8-bit components, AYUV packing.
    CharAYUV,
    /// Four 8-bit components: blue, green, red, alpha.
    CharBGRA,
    /// Three 10-bit components (blue, green, red) and a 2-bit alpha.
    CharBGR10A2,
    /// Windows bitmap: like [`CharBGRA`](Self::CharBGRA) but stored bottom-up.
    CharBMP,
    /// 8-bit luma plane followed by an interleaved half-resolution UV plane.
    CharNV12,
    /// Like NV12 with V before U.
    CharNV21,
    /// Packed 4:2:2, UYVY order (aka HDYC, IUYV, UYNV, Y422).
    CharUYVY,
    /// Packed 4:2:2, YUYV order (aka YUY2, YUNV).
    CharYUY2,
    /// Packed 4:2:2, YVYU order.
    CharYVYU,
    /// Three 16-bit float components: red, green, blue.
    FloatRGB,
    /// Four 16-bit float components: red, green, blue, alpha.
    FloatRGBA,
    /// 10-bit 4:2:2, six pixels packed into each 128-bit block.
    YUVv210,
    /// 16-bit little endian AY'CbCr 4:4:4:4, full range alpha, video range Y'CbCr.
    Y416,
    DXT1,
    DXT5,
    /// YCoCg colour space encoded in DXT5.
    YCoCg_DXT5,
    /// YCoCg in DXT5 with a separate BC4 alpha texture.
    YCoCg_DXT5_Alpha_BC4,
}

const_assert_eq!(SampleFormat::YCoCg_DXT5_Alpha_BC4 as u8, 17);

impl SampleFormat {
    /// Every format, in tag order.
    pub const ALL: [SampleFormat; 18] = [
        Self::Undefined,
        Self::CharAYUV,
        Self::CharBGRA,
        Self::CharBGR10A2,
        Self::CharBMP,
        Self::CharNV12,
        Self::CharNV21,
        Self::CharUYVY,
        Self::CharYUY2,
        Self::CharYVYU,
        Self::FloatRGB,
        Self::FloatRGBA,
        Self::YUVv210,
        Self::Y416,
        Self::DXT1,
        Self::DXT5,
        Self::YCoCg_DXT5,
        Self::YCoCg_DXT5_Alpha_BC4,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::CharAYUV => "CharAYUV",
            Self::CharBGRA => "CharBGRA",
            Self::CharBGR10A2 => "CharBGR10A2",
            Self::CharBMP => "CharBMP",
            Self::CharNV12 => "CharNV12",
            Self::CharNV21 => "CharNV21",
            Self::CharUYVY => "CharUYVY",
            Self::CharYUY2 => "CharYUY2",
            Self::CharYVYU => "CharYVYU",
            Self::FloatRGB => "FloatRGB",
            Self::FloatRGBA => "FloatRGBA",
            Self::YUVv210 => "YUVv210",
            Self::Y416 => "Y416",
            Self::DXT1 => "DXT1",
            Self::DXT5 => "DXT5",
            Self::YCoCg_DXT5 => "YCoCg_DXT5",
            Self::YCoCg_DXT5_Alpha_BC4 => "YCoCg_DXT5_Alpha_BC4",
        }
    }

    /// Whether texels carry luma/chroma and need a matrix to reach RGB.
    pub const fn is_yuv(self) -> bool {
        matches!(
            self,
            Self::CharAYUV
                | Self::CharNV12
                | Self::CharNV21
                | Self::CharUYVY
                | Self::CharYUY2
                | Self::CharYVYU
                | Self::YUVv210
                | Self::Y416
        )
    }

    /// Whether the layout is made of 4x4 compressed blocks.
    pub const fn is_block_compressed(self) -> bool {
        matches!(
            self,
            Self::DXT1 | Self::DXT5 | Self::YCoCg_DXT5 | Self::YCoCg_DXT5_Alpha_BC4
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::FloatRGB | Self::FloatRGBA)
    }

    /// Smallest row pitch, in bytes, of a host buffer `width` texels wide.
    ///
    /// Returns `None` for [`Undefined`](Self::Undefined) or if the pitch does
    /// not fit in a `u32`.
    pub fn min_stride(self, width: u32) -> Option<u32> {
        match self {
            Self::Undefined => None,
            Self::CharAYUV | Self::CharBGRA | Self::CharBGR10A2 | Self::CharBMP => {
                width.checked_mul(4)
            }
            // luma row is `width` bytes, the interleaved chroma row one byte per
            // texel rounded up to whole UV pairs
            Self::CharNV12 | Self::CharNV21 => width.div_ceil(2).checked_mul(2),
            // 4 bytes per horizontal pixel pair
            Self::CharUYVY | Self::CharYUY2 | Self::CharYVYU => width.div_ceil(2).checked_mul(4),
            Self::FloatRGB => width.checked_mul(6),
            Self::FloatRGBA | Self::Y416 => width.checked_mul(8),
            Self::YUVv210 => width.div_ceil(6).checked_mul(16),
            Self::DXT1 => width.div_ceil(4).checked_mul(8),
            Self::DXT5 | Self::YCoCg_DXT5 | Self::YCoCg_DXT5_Alpha_BC4 => {
                width.div_ceil(4).checked_mul(16)
            }
        }
    }

    /// Number of stride-sized rows a host buffer of `height` texels spans.
    pub const fn buffer_rows(self, height: u32) -> u32 {
        match self {
            // chroma plane is half height
            Self::CharNV12 | Self::CharNV21 => height.saturating_add(height.div_ceil(2)),
            Self::DXT1 | Self::DXT5 | Self::YCoCg_DXT5 | Self::YCoCg_DXT5_Alpha_BC4 => {
                height.div_ceil(4)
            }
            _ => height,
        }
    }
}

// Implemented by hand: `#[default]` would turn into a catch-all for `TryFromPrimitive`.
impl Default for SampleFormat {
    fn default() -> Self {
        Self::Undefined
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
