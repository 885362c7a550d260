//! BMP encoder: uncompressed 24-bit, bottom-up rows.

use std::io::Write;

use enough::Stop;
use log::debug;

use super::header::{BitmapFileHeader, BitmapInfoHeader, DATA_OFFSET, stride};
use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Stream `image` as a 24-bit BMP into `out`, one row at a time.
pub(crate) fn encode_bmp<W: Write>(
    out: &mut W,
    image: &PixelBuffer,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let w = image.width();
    let h = image.height();
    let too_large = || BitmapError::DimensionsTooLarge {
        width: w as u64,
        height: h as u64,
    };

    let width = i32::try_from(w).map_err(|_| too_large())?;
    let height = i32::try_from(h).map_err(|_| too_large())?;
    let row_stride = stride(w);
    let pixel_data_size = row_stride
        .checked_mul(h)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(too_large)?;
    let file_size = pixel_data_size
        .checked_add(DATA_OFFSET)
        .ok_or_else(too_large)?;

    debug!("bmp encode: {w}x{h}, stride {row_stride}, file size {file_size}");

    out.write_all(&BitmapFileHeader::new(file_size).to_bytes())?;
    out.write_all(&BitmapInfoHeader::new(width, height, pixel_data_size).to_bytes())?;

    // One reusable row: BGR triples followed by zeroed padding.
    let mut row_buf = vec![0u8; row_stride];
    for (n, row) in image.rows().rev().enumerate() {
        if n % 16 == 0 {
            stop.check()?;
        }
        for (dst, px) in row_buf.chunks_exact_mut(3).zip(row) {
            dst[0] = px.b;
            dst[1] = px.g;
            dst[2] = px.r;
        }
        out.write_all(&row_buf)?;
    }

    Ok(())
}
