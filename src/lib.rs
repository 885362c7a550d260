//! # imgconv
//!
//! Raster image conversion between BMP, PPM and JPEG through one in-memory
//! RGB [`PixelBuffer`].
//!
//! ## Supported Formats
//!
//! ### BMP (always built)
//! - Decode and encode of uncompressed 24-bit BMP with a 40-byte
//!   `BITMAPINFOHEADER`, bottom-up rows, BGR samples, rows padded to 4 bytes
//! - [`bmp::BmpStrictness::Strict`] additionally rejects anything else
//!
//! ### PPM (`ppm` feature)
//! - P6 decode and encode, P5 decode (expanded to gray RGB)
//!
//! ### JPEG (`jpeg` feature)
//! - Decode via [zune-jpeg](https://crates.io/crates/zune-jpeg), encode via
//!   [jpeg-encoder](https://crates.io/crates/jpeg-encoder)
//!
//! ## Non-Goals
//!
//! - Compressed BMP (RLE, bitfields), palettes, alpha
//! - Multi-frame or ICO containers
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use imgconv::{CodecOptions, ImageFormat, codec_for};
//!
//! let input = Path::new("in.bmp");
//! let output = Path::new("out.ppm");
//! let options = CodecOptions::default();
//!
//! let reader = codec_for(ImageFormat::try_from_path(input)?, &options)?;
//! let image = reader.load(input);
//! if image.is_empty() {
//!     eprintln!("Loading failed");
//! }
//!
//! let writer = codec_for(ImageFormat::try_from_path(output)?, &options)?;
//! if !writer.save(output, &image) {
//!     eprintln!("Saving failed");
//! }
//! # Ok::<(), imgconv::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod format;
mod limits;
mod pixel;

pub mod bmp;

#[cfg(feature = "ppm")]
pub mod pnm;

#[cfg(feature = "jpeg")]
pub mod jpeg;

// Re-exports
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
#[cfg(feature = "jpeg")]
pub use format::JpegCodec;
#[cfg(feature = "ppm")]
pub use format::PpmCodec;
pub use format::{
    BmpCodec, CodecOptions, DEFAULT_JPEG_QUALITY, ImageCodec, ImageFormat, codec_for,
};
pub use limits::Limits;
pub use pixel::{BLACK, Color, PixelBuffer};
