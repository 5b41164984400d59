use thiserror::Error;

use crate::format::SampleFormat;
use crate::types::Size;

/// Top-level crate error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("output size {output} exceeds buffer size {buffer}")]
    OutputExceedsBuffer { output: Size, buffer: Size },
    #[error("sample reports zero mip levels")]
    NoMips,
    #[error("host buffer samples need a defined format")]
    UndefinedFormat,
    #[error("stride of {stride} bytes is below the {required} bytes a {width} texel {format} row needs")]
    StrideTooSmall {
        format: SampleFormat,
        width: u32,
        stride: u32,
        required: u32,
    },
    #[error("buffer holds {len} bytes but {required} are required")]
    BufferTooSmall { len: usize, required: usize },
    #[error("sample has neither a buffer nor a texture")]
    MissingPayload,
    #[error("sample holds a device texture, not a host buffer")]
    NotHostBuffer,
    #[error("pixel buffer of {width}x{height} with {bytes_per_row} bytes per row does not fit 32-bit sizes")]
    SizeOverflow {
        width: usize,
        height: usize,
        bytes_per_row: usize,
    },
    #[error("pixel format {0:#010x} has no sample format")]
    UnsupportedPixelFormat(u32),
    #[error("pixel buffer planes are not laid out back to back")]
    NonContiguousPlanes,
    #[error("platform call failed with status {0}")]
    PlatformStatus(i32),
}
