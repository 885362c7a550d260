//! Binary PNM: P6 (PPM) decode and encode, P5 (PGM) decode.
//!
//! P5 input is expanded to gray RGB pixels. Samples with a maxval other than
//! 255 are rescaled to 8 bits; 16-bit samples (maxval > 255) are big-endian.

mod decode;
mod encode;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// Which PNM sub-format a header declares.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PnmFormat {
    /// P5: binary grayscale (PGM).
    Pgm,
    /// P6: binary RGB (PPM).
    Ppm,
}

/// Parsed PNM header (internal).
pub(crate) struct PnmHeader {
    pub format: PnmFormat,
    pub width: usize,
    pub height: usize,
    pub maxval: u32,
    pub data_offset: usize,
}

/// Decode P5/P6 data held in memory.
pub fn decode_ppm(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<PixelBuffer, BitmapError> {
    let header = decode::parse_header(data)?;
    log::debug!(
        "pnm decode: {:?} {}x{} maxval {}",
        header.format,
        header.width,
        header.height,
        header.maxval
    );
    decode::decode_pixels(data, &header, limits, &stop)
}

/// Encode `image` as P6 into `out`.
pub fn encode_ppm<W: Write>(
    out: &mut W,
    image: &PixelBuffer,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    encode::encode_ppm(out, image, &stop)
}

/// Read a P5/P6 file.
pub fn load_ppm(path: &Path, limits: &Limits) -> Result<PixelBuffer, BitmapError> {
    let data = std::fs::read(path)?;
    decode_ppm(&data, limits, Unstoppable)
}

/// Write `image` to `path` as P6. The file is flushed before this returns.
pub fn save_ppm(path: &Path, image: &PixelBuffer) -> Result<(), BitmapError> {
    let mut out = BufWriter::new(File::create(path)?);
    encode::encode_ppm(&mut out, image, &Unstoppable)?;
    out.flush()?;
    Ok(())
}
