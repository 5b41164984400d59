use core::time::Duration;

use log::debug;
use objc2_core_foundation::CFRetained;
use objc2_core_media::CMSampleBuffer;
use objc2_core_video::{
    CVImageBufferGetCleanRect, CVPixelBuffer, CVPixelBufferGetBaseAddress,
    CVPixelBufferGetBaseAddressOfPlane, CVPixelBufferGetBytesPerRow,
    CVPixelBufferGetBytesPerRowOfPlane, CVPixelBufferGetHeight, CVPixelBufferGetHeightOfPlane,
    CVPixelBufferGetPixelFormatType, CVPixelBufferGetPlaneCount, CVPixelBufferGetWidth,
    CVPixelBufferLockBaseAddress, CVPixelBufferLockFlags, CVPixelBufferUnlockBaseAddress,
};

use crate::contract;
use crate::error::Error;
use crate::format::SampleFormat;
use crate::platform::macos::{cm_time_to_duration, fourcc_to_sample_format};
use crate::sample::{SamplePayload, TextureSample};
use crate::time::MediaTimeStamp;
use crate::types::Size;

/// A texture sample backed by a decoder's `CVPixelBuffer`.
///
/// The buffer's base address stays locked read-only until the sample is
/// dropped. Decoders recycle these buffers from a pool, so the sample is not
/// cacheable.
pub struct PixelBufferSample {
    pixel_buffer: CFRetained<CVPixelBuffer>,
    data: *const u8,
    len: usize,
    format: SampleFormat,
    dim: Size,
    output_dim: Size,
    stride: u32,
    time: MediaTimeStamp,
    duration: Duration,
}

impl PixelBufferSample {
    /// Lock `pixel_buffer` and expose it as a sample.
    pub fn new(
        pixel_buffer: CFRetained<CVPixelBuffer>,
        time: MediaTimeStamp,
        duration: Duration,
    ) -> Result<Self, Error> {
        let fourcc = unsafe { CVPixelBufferGetPixelFormatType(&pixel_buffer) };
        let format = fourcc_to_sample_format(fourcc).ok_or(Error::UnsupportedPixelFormat(fourcc))?;

        let (width, height, clean) = unsafe {
            (
                CVPixelBufferGetWidth(&pixel_buffer),
                CVPixelBufferGetHeight(&pixel_buffer),
                CVImageBufferGetCleanRect(&pixel_buffer),
            )
        };
        let dim = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => Size::new(w, h),
            _ => {
                return Err(Error::SizeOverflow {
                    width,
                    height,
                    bytes_per_row: 0,
                });
            }
        };
        // f64 to u32 casts saturate
        let output_dim = Size::new(
            (clean.size.width as u32).min(dim.width),
            (clean.size.height as u32).min(dim.height),
        );

        let status =
            unsafe { CVPixelBufferLockBaseAddress(&pixel_buffer, CVPixelBufferLockFlags::ReadOnly) };
        if status != 0 {
            return Err(Error::PlatformStatus(status));
        }

        // Unlocked by Drop from here on, including on the error paths below.
        let mut sample = PixelBufferSample {
            pixel_buffer,
            data: core::ptr::null(),
            len: 0,
            format,
            dim,
            output_dim,
            stride: 0,
            time,
            duration,
        };

        let (base, bytes_per_row, len) = unsafe { locked_extent(&sample.pixel_buffer) }?;
        sample.stride = u32::try_from(bytes_per_row).map_err(|_| Error::SizeOverflow {
            width,
            height,
            bytes_per_row,
        })?;
        sample.data = base;
        sample.len = len;

        contract::validate(&sample)?;
        debug!("wrapped {format} pixel buffer {dim} at {:?}", time.time);
        Ok(sample)
    }

    /// Wrap the image buffer of a decoded `CMSampleBuffer`.
    pub fn from_sample_buffer(
        sample_buffer: &CMSampleBuffer,
        sequence_index: i64,
    ) -> Result<Self, Error> {
        let pixel_buffer = unsafe { sample_buffer.image_buffer() }.ok_or(Error::MissingPayload)?;
        let time = MediaTimeStamp::with_sequence_index(
            cm_time_to_duration(unsafe { sample_buffer.presentation_time_stamp() }),
            sequence_index,
        );
        let duration = cm_time_to_duration(unsafe { sample_buffer.duration() });
        Self::new(pixel_buffer, time, duration)
    }

    /// The backing pixel buffer, still locked read-only.
    pub fn pixel_buffer(&self) -> &CVPixelBuffer {
        &self.pixel_buffer
    }
}

/// Base address, row pitch and byte length of a locked pixel buffer.
///
/// Planar buffers must store their planes back to back with a common pitch,
/// which is how the sample formats describe them.
///
/// SAFETY: the base address of `pixel_buffer` must be locked.
unsafe fn locked_extent(pixel_buffer: &CVPixelBuffer) -> Result<(*const u8, usize, usize), Error> {
    unsafe {
        let overflow = |bytes_per_row| Error::SizeOverflow {
            width: CVPixelBufferGetWidth(pixel_buffer),
            height: CVPixelBufferGetHeight(pixel_buffer),
            bytes_per_row,
        };

        let plane_count = CVPixelBufferGetPlaneCount(pixel_buffer);
        if plane_count == 0 {
            let base = CVPixelBufferGetBaseAddress(pixel_buffer) as *const u8;
            if base.is_null() {
                return Err(Error::MissingPayload);
            }
            let bytes_per_row = CVPixelBufferGetBytesPerRow(pixel_buffer);
            let len = bytes_per_row
                .checked_mul(CVPixelBufferGetHeight(pixel_buffer))
                .ok_or_else(|| overflow(bytes_per_row))?;
            return Ok((base, bytes_per_row, len));
        }

        let base = CVPixelBufferGetBaseAddressOfPlane(pixel_buffer, 0) as *const u8;
        if base.is_null() {
            return Err(Error::MissingPayload);
        }
        let bytes_per_row = CVPixelBufferGetBytesPerRowOfPlane(pixel_buffer, 0);
        let mut len: usize = 0;
        for plane in 0..plane_count {
            let plane_base = CVPixelBufferGetBaseAddressOfPlane(pixel_buffer, plane) as *const u8;
            if plane_base as usize != base as usize + len
                || CVPixelBufferGetBytesPerRowOfPlane(pixel_buffer, plane) != bytes_per_row
            {
                return Err(Error::NonContiguousPlanes);
            }
            len = bytes_per_row
                .checked_mul(CVPixelBufferGetHeightOfPlane(pixel_buffer, plane))
                .and_then(|plane_len| len.checked_add(plane_len))
                .ok_or_else(|| overflow(bytes_per_row))?;
        }
        Ok((base, bytes_per_row, len))
    }
}

impl Drop for PixelBufferSample {
    fn drop(&mut self) {
        unsafe {
            CVPixelBufferUnlockBaseAddress(&self.pixel_buffer, CVPixelBufferLockFlags::ReadOnly);
        }
    }
}

impl TextureSample for PixelBufferSample {
    fn payload(&self) -> SamplePayload<'_> {
        if self.data.is_null() {
            return SamplePayload::Buffer(&[]);
        }
        // SAFETY: the base address stays locked for as long as `self` lives.
        SamplePayload::Buffer(unsafe { core::slice::from_raw_parts(self.data, self.len) })
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

    fn duration(&self) -> Duration {
        self.duration
    }

    fn time(&self) -> MediaTimeStamp {
        self.time
    }

    fn is_cacheable(&self) -> bool {
        false
    }

    /// Core Video hands out RGB buffers sRGB encoded.
    fn is_output_srgb(&self) -> bool {
        !self.format.is_yuv() && !self.format.is_float()
    }
}
