//! BMP decoder for the uncompressed 24-bit, bottom-up variant.

use std::io::{self, Read};

use enough::Stop;
use log::debug;

use super::header::{BitmapFileHeader, BitmapInfoHeader, DATA_OFFSET, SIGNATURE, stride};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{BLACK, Color, PixelBuffer};

/// Controls how strictly the BMP decoder validates headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpStrictness {
    /// Trust the info header's width and height and decode. The signature,
    /// bit depth, compression and data offset are read but not checked.
    #[default]
    Compatible,

    /// Reject anything other than a `BM` file with a 40-byte info header,
    /// 24 bits per pixel, no compression and pixel data at offset 54. When
    /// the input length is known, also reject dimensions whose pixel data
    /// cannot fit in it.
    Strict,
}

/// Options for [`crate::bmp::decode_bmp`].
#[derive(Clone, Debug, Default)]
pub struct BmpDecodeOptions {
    pub strictness: BmpStrictness,
    pub limits: Limits,
}

impl BmpDecodeOptions {
    pub fn strict() -> Self {
        Self {
            strictness: BmpStrictness::Strict,
            ..Default::default()
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

pub(crate) fn decode_bmp<R: Read>(
    input: &mut R,
    options: &BmpDecodeOptions,
    input_len: Option<u64>,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let mut file_bytes = [0u8; BitmapFileHeader::SIZE];
    input.read_exact(&mut file_bytes)?;
    let mut info_bytes = [0u8; BitmapInfoHeader::SIZE];
    input.read_exact(&mut info_bytes)?;

    let file_header = BitmapFileHeader::from_bytes(&file_bytes);
    let info = BitmapInfoHeader::from_bytes(&info_bytes);
    debug!(
        "bmp decode: {}x{}, {} bpp, compression {}, file size field {}",
        info.width, info.height, info.bits_per_pixel, info.compression, file_header.file_size
    );

    let (w, h) = dimensions(&info)?;
    if options.strictness == BmpStrictness::Strict {
        validate_strict(&file_header, &info, w, h, input_len)?;
    }
    options.limits.check_rgb8(w, h)?;
    if let Some(len) = input_len {
        ensure_pixel_data(w, h, len)?;
    }
    stop.check()?;

    let mut image = PixelBuffer::try_new(w, h, BLACK)?;
    let pad = (stride(w) - w * 3) as u64;
    let mut row_buf = vec![0u8; w * 3];

    // First row on disk is the bottom row of the image.
    for (n, y) in (0..h).rev().enumerate() {
        if n % 16 == 0 {
            stop.check()?;
        }
        input.read_exact(&mut row_buf)?;
        for (px, bgr) in image.row_mut(y).iter_mut().zip(row_buf.chunks_exact(3)) {
            *px = Color::new(bgr[2], bgr[1], bgr[0]);
        }
        skip(input, pad)?;
    }

    Ok(image)
}

/// Width and height as buffer dimensions. Zero or negative values are
/// degenerate for this variant, including top-down (negative height) files.
fn dimensions(info: &BitmapInfoHeader) -> Result<(usize, usize), BitmapError> {
    if info.width <= 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "BMP width is {}",
            info.width
        )));
    }
    if info.height <= 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "BMP height is {}",
            info.height
        )));
    }
    Ok((info.width as usize, info.height as usize))
}

fn validate_strict(
    file_header: &BitmapFileHeader,
    info: &BitmapInfoHeader,
    w: usize,
    h: usize,
    input_len: Option<u64>,
) -> Result<(), BitmapError> {
    if file_header.signature != SIGNATURE {
        return Err(BitmapError::UnrecognizedFormat);
    }
    if info.header_size != BitmapInfoHeader::SIZE as u32 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP info header size {}, expected 40",
            info.header_size
        )));
    }
    if info.bits_per_pixel != 24 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP bit depth {} unsupported",
            info.bits_per_pixel
        )));
    }
    if info.compression != 0 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP compression {} unsupported",
            info.compression
        )));
    }
    if file_header.data_offset != DATA_OFFSET {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP pixel data at offset {}, expected {DATA_OFFSET}",
            file_header.data_offset
        )));
    }
    if let Some(len) = input_len {
        let needed = (stride(w) as u64)
            .checked_mul(h as u64)
            .and_then(|n| n.checked_add(u64::from(DATA_OFFSET)))
            .ok_or(BitmapError::DimensionsTooLarge {
                width: w as u64,
                height: h as u64,
            })?;
        if needed > len {
            return Err(BitmapError::InvalidHeader(format!(
                "BMP claims {w}x{h} ({needed} bytes) but input is {len} bytes"
            )));
        }
    }
    Ok(())
}

/// Fail before allocating when the input is too short to hold every row.
/// The last row's padding is not counted, since `skip` tolerates its absence.
fn ensure_pixel_data(w: usize, h: usize, len: u64) -> Result<(), BitmapError> {
    let available = len.saturating_sub(u64::from(DATA_OFFSET));
    let needed = (stride(w) as u64)
        .checked_mul(h as u64 - 1)
        .and_then(|n| n.checked_add(w as u64 * 3));
    match needed {
        Some(needed) if needed <= available => Ok(()),
        _ => {
            debug!("bmp decode: {w}x{h} needs more than the {available} pixel bytes available");
            Err(BitmapError::UnexpectedEof)
        }
    }
}

/// Discard up to `n` bytes. A short tail is not an error: the final row's
/// padding may be missing.
fn skip<R: Read>(input: &mut R, n: u64) -> Result<(), BitmapError> {
    if n > 0 {
        io::copy(&mut input.by_ref().take(n), &mut io::sink())?;
    }
    Ok(())
}
