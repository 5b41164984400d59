use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Dimensions in texels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Component-wise `<=`.
    pub const fn fits_within(&self, other: Size) -> bool {
        self.width <= other.width && self.height <= other.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// How a sample is split into a grid of tiles.
///
/// Only tiled image sequences use this. The all-zero default means "not tiled".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilingDescription {
    pub tile_count: Size,
    pub tile_size: Size,
    pub border_size: u32,
}

impl TilingDescription {
    pub const fn is_valid(&self) -> bool {
        self.tile_count.width > 0
            && self.tile_count.height > 0
            && self.tile_size.width > 0
            && self.tile_size.height > 0
    }
}

/// Rotation of the returned image data relative to how it should be shown.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum Orientation {
    Original = 0,
    Cw90,
    Cw180,
    Cw270,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Original
    }
}

impl Orientation {
    /// Clockwise rotation in degrees.
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Original => 0,
            Self::Cw90 => 90,
            Self::Cw180 => 180,
            Self::Cw270 => 270,
        }
    }

    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Cw90 | Self::Cw270)
    }

    /// Size of `size` once the rotation is applied.
    pub const fn oriented(self, size: Size) -> Size {
        if self.swaps_axes() {
            Size::new(size.height, size.width)
        } else {
            size
        }
    }
}

/// 2x2 matrix applied to texture coordinates by "external image" output.
///
/// `row0` is dotted with U, `row1` with V.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRotation {
    pub row0: [f32; 2],
    pub row1: [f32; 2],
}

impl ScaleRotation {
    pub const IDENTITY: Self = Self {
        row0: [1.0, 0.0],
        row1: [0.0, 1.0],
    };
}

impl Default for ScaleRotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Offset added to texture coordinates after [`ScaleRotation`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// Row-major 4x4 matrix converting video range YUV to RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YuvToRgbMatrix {
    pub rows: [[f32; 4]; 4],
}

#[allow(clippy::excessive_precision)]
impl YuvToRgbMatrix {
    /// BT.709, scaled from video range.
    pub const REC709_SCALED: Self = Self {
        rows: [
            [1.16438356164, 0.000000000000, 1.792652263418, 0.000000],
            [1.16438356164, -0.213237021569, -0.533004040142, 0.000000],
            [1.16438356164, 2.112419281991, 0.000000000000, 0.000000],
            [0.000000, 0.000000, 0.000000, 0.000000],
        ],
    };

    /// BT.601, scaled from video range.
    pub const REC601_SCALED: Self = Self {
        rows: [
            [1.164383, 0.000000, 1.596027, 0.000000],
            [1.164383, -0.391762, -0.812968, 0.000000],
            [1.164383, 2.017232, 0.000000, 0.000000],
            [0.000000, 0.000000, 0.000000, 0.000000],
        ],
    };
}

impl Default for YuvToRgbMatrix {
    fn default() -> Self {
        Self::REC709_SCALED
    }
}

/// A frame rate as a ratio, e.g. 30000/1001 for NTSC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameRate {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whole frames per second, rounded up (30 for 29.97).
    pub const fn nominal_fps(&self) -> u32 {
        if self.denominator == 0 {
            0
        } else {
            self.numerator.div_ceil(self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiling_defaults_to_not_tiled() {
        let tiling = TilingDescription::default();
        assert!(!tiling.is_valid());
        assert_eq!(tiling.border_size, 0);
    }

    #[test]
    fn tiling_needs_every_dimension() {
        let mut tiling = TilingDescription {
            tile_count: Size::new(4, 2),
            tile_size: Size::new(256, 256),
            border_size: 2,
        };
        assert!(tiling.is_valid());

        tiling.tile_size.height = 0;
        assert!(!tiling.is_valid());

        tiling.tile_size.height = 256;
        tiling.tile_count.width = 0;
        assert!(!tiling.is_valid());
    }

    #[test]
    fn orientation() {
        assert_eq!(Orientation::default(), Orientation::Original);
        assert_eq!(Orientation::Cw270.degrees(), 270);
        assert_eq!(
            Orientation::Cw90.oriented(Size::new(1920, 1080)),
            Size::new(1080, 1920)
        );
        assert_eq!(
            Orientation::Cw180.oriented(Size::new(1920, 1080)),
            Size::new(1920, 1080)
        );
        assert_eq!(Orientation::try_from(3u8), Ok(Orientation::Cw270));
        assert!(Orientation::try_from(4u8).is_err());
    }

    #[test]
    fn size() {
        assert!(Size::new(1920, 1080).fits_within(Size::new(1920, 1088)));
        assert!(!Size::new(1921, 1080).fits_within(Size::new(1920, 1088)));
        assert!(Size::new(0, 10).is_empty());
        assert_eq!(Size::new(640, 480).to_string(), "640x480");
    }

    #[test]
    fn rec709_literals() {
        let m = YuvToRgbMatrix::default();
        assert_eq!(m.rows[0][2], 1.792652263418_f32);
        assert_eq!(m.rows[1][1], -0.213237021569_f32);
        assert_eq!(m.rows[2][1], 2.112419281991_f32);
        assert_eq!(m.rows[3], [0.0; 4]);
        assert_ne!(m, YuvToRgbMatrix::REC601_SCALED);
    }

    #[test]
    fn frame_rate() {
        let ntsc = FrameRate::new(30000, 1001);
        assert_eq!(ntsc.nominal_fps(), 30);
        assert!((ntsc.as_f64() - 29.97).abs() < 0.01);
        assert_eq!(FrameRate::new(25, 1).nominal_fps(), 25);
        assert_eq!(FrameRate::new(25, 0).nominal_fps(), 0);
    }
}
