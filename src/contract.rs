//! Checks a sample against the invariants consumers rely on.

use crate::error::Error;
use crate::format::SampleFormat;
use crate::sample::{SamplePayload, TextureSample};

/// Verify that `sample` is well formed.
///
/// Output dimensions must fit the buffer dimensions and there must be at
/// least one mip level. Host buffers additionally need a defined format, a
/// stride covering one row of texels and enough bytes for every row.
pub fn validate(sample: &dyn TextureSample) -> Result<(), Error> {
    let dim = sample.dim();
    let output = sample.output_dim();
    if !output.fits_within(dim) {
        return Err(Error::OutputExceedsBuffer {
            output,
            buffer: dim,
        });
    }

    if sample.num_mips() == 0 {
        return Err(Error::NoMips);
    }

    match sample.payload() {
        SamplePayload::Texture(_) => Ok(()),
        SamplePayload::Buffer(data) => {
            check_buffer(sample.format(), dim.width, dim.height, sample.stride(), data.len())
        }
    }
}

fn check_buffer(
    format: SampleFormat,
    width: u32,
    height: u32,
    stride: u32,
    len: usize,
) -> Result<(), Error> {
    if format == SampleFormat::Undefined {
        return Err(Error::UndefinedFormat);
    }
    // `None` for a defined format means the row pitch overflows a u32
    let required_stride = format.min_stride(width).unwrap_or(u32::MAX);
    if stride < required_stride {
        return Err(Error::StrideTooSmall {
            format,
            width,
            stride,
            required: required_stride,
        });
    }

    let required = (stride as usize)
        .checked_mul(format.buffer_rows(height) as usize)
        .unwrap_or(usize::MAX);
    if len < required {
        return Err(Error::BufferTooSmall { len, required });
    }
    Ok(())
}
