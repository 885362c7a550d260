//! Binary PNM decoder: P6 (PPM) and P5 (PGM, expanded to RGB).

use enough::Stop;

use super::{PnmFormat, PnmHeader};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{BLACK, Color, PixelBuffer};

/// Parse the text header up to and including the single whitespace byte that
/// precedes the raster.
pub(crate) fn parse_header(data: &[u8]) -> Result<PnmHeader, BitmapError> {
    if data.len() < 2 {
        return Err(BitmapError::UnexpectedEof);
    }
    let format = match &data[..2] {
        b"P6" => PnmFormat::Ppm,
        b"P5" => PnmFormat::Pgm,
        [b'P', b'1'..=b'4'] | b"P7" => {
            return Err(BitmapError::UnsupportedVariant(format!(
                "PNM variant {} unsupported",
                String::from_utf8_lossy(&data[..2])
            )));
        }
        _ => return Err(BitmapError::UnrecognizedFormat),
    };

    let mut pos = 2;
    let width = next_number(data, &mut pos)?;
    let height = next_number(data, &mut pos)?;
    let maxval = next_number(data, &mut pos)?;

    // exactly one whitespace byte separates maxval from the raster
    match data.get(pos) {
        Some(c) if c.is_ascii_whitespace() => pos += 1,
        Some(_) => {
            return Err(BitmapError::InvalidHeader(
                "missing whitespace after PNM maxval".into(),
            ));
        }
        None => return Err(BitmapError::UnexpectedEof),
    }

    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "PNM dimensions {width}x{height}"
        )));
    }
    if maxval == 0 || maxval > 65535 {
        return Err(BitmapError::InvalidHeader(format!(
            "PNM maxval {maxval} out of range"
        )));
    }

    Ok(PnmHeader {
        format,
        width: width as usize,
        height: height as usize,
        maxval: maxval as u32,
        data_offset: pos,
    })
}

/// Skip whitespace and `#` comments, then read one decimal number.
fn next_number(data: &[u8], pos: &mut usize) -> Result<u64, BitmapError> {
    loop {
        match data.get(*pos) {
            Some(b'#') => {
                while let Some(&c) = data.get(*pos) {
                    *pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            }
            Some(c) if c.is_ascii_whitespace() => *pos += 1,
            Some(_) => break,
            None => return Err(BitmapError::UnexpectedEof),
        }
    }

    let start = *pos;
    let mut value: u64 = 0;
    while let Some(&c) = data.get(*pos) {
        if !c.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(c - b'0')))
            .ok_or_else(|| BitmapError::InvalidHeader("PNM header number overflows".into()))?;
        *pos += 1;
    }
    if *pos == start {
        return Err(BitmapError::InvalidHeader(format!(
            "expected a number at byte {start} of PNM header"
        )));
    }
    Ok(value)
}

/// Decode the raster that follows `header`.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &PnmHeader,
    limits: &Limits,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let w = header.width;
    let h = header.height;
    limits.check_rgb8(w, h)?;

    let channels = match header.format {
        PnmFormat::Ppm => 3,
        PnmFormat::Pgm => 1,
    };
    let bytes_per_sample = if header.maxval > 255 { 2 } else { 1 };
    let row_bytes = w
        .checked_mul(channels * bytes_per_sample)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: w as u64,
            height: h as u64,
        })?;
    let expected = row_bytes
        .checked_mul(h)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: w as u64,
            height: h as u64,
        })?;
    let raster = data
        .get(header.data_offset..)
        .and_then(|d| d.get(..expected))
        .ok_or(BitmapError::UnexpectedEof)?;

    stop.check()?;
    let mut image = PixelBuffer::try_new(w, h, BLACK)?;
    let maxval = header.maxval;

    for (y, src) in raster.chunks_exact(row_bytes).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let row = image.row_mut(y);
        if bytes_per_sample == 1 {
            match header.format {
                PnmFormat::Ppm => {
                    for (px, c) in row.iter_mut().zip(src.chunks_exact(3)) {
                        *px = Color::new(
                            scale(c[0].into(), maxval),
                            scale(c[1].into(), maxval),
                            scale(c[2].into(), maxval),
                        );
                    }
                }
                PnmFormat::Pgm => {
                    for (px, &g) in row.iter_mut().zip(src) {
                        let v = scale(g.into(), maxval);
                        *px = Color::new(v, v, v);
                    }
                }
            }
        } else {
            // 16-bit samples are big-endian
            let sample = |c: &[u8], i: usize| {
                scale(u32::from(u16::from_be_bytes([c[i * 2], c[i * 2 + 1]])), maxval)
            };
            match header.format {
                PnmFormat::Ppm => {
                    for (px, c) in row.iter_mut().zip(src.chunks_exact(6)) {
                        *px = Color::new(sample(c, 0), sample(c, 1), sample(c, 2));
                    }
                }
                PnmFormat::Pgm => {
                    for (px, c) in row.iter_mut().zip(src.chunks_exact(2)) {
                        let v = sample(c, 0);
                        *px = Color::new(v, v, v);
                    }
                }
            }
        }
    }

    Ok(image)
}

/// Rescale a sample in `0..=maxval` to `0..=255`, rounding to nearest.
fn scale(v: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        return v.min(255) as u8;
    }
    let v = v.min(maxval);
    ((v * 255 + maxval / 2) / maxval) as u8
}
