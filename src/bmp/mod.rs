//! Uncompressed 24-bit BMP decoder and encoder.
//!
//! Layout: 14-byte file header, 40-byte info header, then pixel rows from the
//! bottom of the image to the top, each pixel as blue, green, red, and each
//! row zero-padded to [`stride`] bytes.

mod decode;
mod encode;
pub mod header;

pub use decode::{BmpDecodeOptions, BmpStrictness};
pub use header::{BitmapFileHeader, BitmapInfoHeader, stride};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Encode `image` into `out` as a 24-bit BMP.
///
/// Rows are written as they are converted; nothing beyond one row is buffered
/// here. Wrap file handles in a [`BufWriter`] and flush afterwards.
pub fn encode_bmp<W: Write>(
    out: &mut W,
    image: &PixelBuffer,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    encode::encode_bmp(out, image, &stop)
}

/// Decode a 24-bit BMP from `input`.
///
/// `input_len` is the total input size when known. Any dimensions the data
/// cannot back fail with [`BitmapError::UnexpectedEof`] before the pixel
/// buffer is allocated; [`BmpStrictness::Strict`] reports them as an invalid
/// header instead.
pub fn decode_bmp<R: Read>(
    input: &mut R,
    options: &BmpDecodeOptions,
    input_len: Option<u64>,
    stop: impl Stop,
) -> Result<PixelBuffer, BitmapError> {
    decode::decode_bmp(input, options, input_len, &stop)
}

/// Decode a 24-bit BMP held in memory.
pub fn decode_bmp_bytes(
    data: &[u8],
    options: &BmpDecodeOptions,
    stop: impl Stop,
) -> Result<PixelBuffer, BitmapError> {
    let mut cursor = data;
    decode::decode_bmp(&mut cursor, options, Some(data.len() as u64), &stop)
}

/// Encode `image` into a new `Vec`.
pub fn encode_bmp_bytes(image: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    let mut out = Vec::new();
    encode::encode_bmp(&mut out, image, &stop)?;
    Ok(out)
}

/// Write `image` to `path`. The file is flushed before this returns.
pub fn save_bmp(path: &Path, image: &PixelBuffer) -> Result<(), BitmapError> {
    let mut out = BufWriter::new(File::create(path)?);
    encode::encode_bmp(&mut out, image, &Unstoppable)?;
    out.flush()?;
    Ok(())
}

/// Read a BMP from `path`.
pub fn load_bmp(path: &Path, options: &BmpDecodeOptions) -> Result<PixelBuffer, BitmapError> {
    let file = File::open(path)?;
    let len = file.metadata().ok().map(|m| m.len());
    let mut input = BufReader::new(file);
    decode::decode_bmp(&mut input, options, len, &Unstoppable)
}
