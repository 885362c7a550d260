//! JPEG glue: decoding through `zune-jpeg`, encoding through `jpeg-encoder`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use jpeg_encoder::{ColorType, Encoder};
use log::debug;
use rgb::ComponentBytes as _;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{BLACK, Color, PixelBuffer};

/// Decode a baseline or progressive JPEG held in memory to RGB.
pub fn decode_jpeg(data: &[u8], limits: &Limits) -> Result<PixelBuffer, BitmapError> {
    let options = DecoderOptions::default().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(data, options);
    decoder
        .decode_headers()
        .map_err(|e| BitmapError::Jpeg(format!("{e:?}")))?;
    let (w, h) = decoder
        .dimensions()
        .ok_or_else(|| BitmapError::Jpeg("no frame header".into()))?;
    limits.check_rgb8(w, h)?;

    let raw = decoder
        .decode()
        .map_err(|e| BitmapError::Jpeg(format!("{e:?}")))?;
    let pixel_count = w * h;
    let components = if pixel_count == 0 {
        0
    } else {
        raw.len() / pixel_count
    };
    debug!("jpeg decode: {w}x{h}, {components} components");

    match components {
        3 => PixelBuffer::from_rgb_bytes(w, h, &raw),
        1 => {
            let mut image = PixelBuffer::try_new(w, h, BLACK)?;
            for (y, src) in raw.chunks_exact(w).enumerate().take(h) {
                for (px, &g) in image.row_mut(y).iter_mut().zip(src) {
                    *px = Color::new(g, g, g);
                }
            }
            Ok(image)
        }
        4 => {
            let mut image = PixelBuffer::try_new(w, h, BLACK)?;
            for (y, src) in raw.chunks_exact(w * 4).enumerate().take(h) {
                for (px, c) in image.row_mut(y).iter_mut().zip(src.chunks_exact(4)) {
                    *px = Color::new(c[0], c[1], c[2]);
                }
            }
            Ok(image)
        }
        n => Err(BitmapError::Jpeg(format!(
            "unexpected decoder output: {n} bytes per pixel"
        ))),
    }
}

/// Encode `image` as a baseline JPEG into `out`.
pub fn encode_jpeg<W: Write>(
    out: &mut W,
    image: &PixelBuffer,
    quality: u8,
) -> Result<(), BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: image.width() as u64,
        height: image.height() as u64,
    };
    let width = u16::try_from(image.width()).map_err(|_| too_large())?;
    let height = u16::try_from(image.height()).map_err(|_| too_large())?;
    debug!("jpeg encode: {width}x{height}, quality {quality}");

    let encoder = Encoder::new(&mut *out, quality);
    encoder
        .encode(image.pixels().as_bytes(), width, height, ColorType::Rgb)
        .map_err(|e| BitmapError::Jpeg(e.to_string()))
}

/// Read a JPEG file.
pub fn load_jpeg(path: &Path, limits: &Limits) -> Result<PixelBuffer, BitmapError> {
    let data = std::fs::read(path)?;
    decode_jpeg(&data, limits)
}

/// Write `image` to `path` as JPEG. The file is flushed before this returns.
pub fn save_jpeg(path: &Path, image: &PixelBuffer, quality: u8) -> Result<(), BitmapError> {
    let mut out = BufWriter::new(File::create(path)?);
    encode_jpeg(&mut out, image, quality)?;
    out.flush()?;
    Ok(())
}
