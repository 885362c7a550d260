//! Codec selection by file extension and the load/save interface shared by
//! every format.

use std::path::Path;

use log::warn;

use crate::bmp::{self, BmpDecodeOptions};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

/// JPEG encoder quality used unless one is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Formats the converter can read and write.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Bmp,
    Ppm,
    Jpeg,
}

impl ImageFormat {
    /// Pick a format from a file extension, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Some(Self::Bmp),
            "ppm" => Some(Self::Ppm),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Like [`ImageFormat::from_path`], with the extension in the error.
    pub fn try_from_path(path: &Path) -> Result<Self, BitmapError> {
        Self::from_path(path).ok_or_else(|| {
            BitmapError::UnknownExtension(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
        })
    }
}

/// A file format that can read a [`PixelBuffer`] from a path and write one
/// back.
///
/// Implementors provide the fallible pair; `load` and `save` collapse every
/// failure into an empty buffer or `false`, logging the cause.
pub trait ImageCodec {
    fn decode_file(&self, path: &Path) -> Result<PixelBuffer, BitmapError>;

    fn encode_file(&self, path: &Path, image: &PixelBuffer) -> Result<(), BitmapError>;

    /// Returns an empty buffer on failure.
    fn load(&self, path: &Path) -> PixelBuffer {
        match self.decode_file(path) {
            Ok(image) => image,
            Err(e) => {
                warn!("loading {} failed: {e}", path.display());
                PixelBuffer::empty()
            }
        }
    }

    /// Returns false on failure.
    fn save(&self, path: &Path, image: &PixelBuffer) -> bool {
        match self.encode_file(path, image) {
            Ok(()) => true,
            Err(e) => {
                warn!("saving {} failed: {e}", path.display());
                false
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BmpCodec {
    pub options: BmpDecodeOptions,
}

impl ImageCodec for BmpCodec {
    fn decode_file(&self, path: &Path) -> Result<PixelBuffer, BitmapError> {
        bmp::load_bmp(path, &self.options)
    }

    fn encode_file(&self, path: &Path, image: &PixelBuffer) -> Result<(), BitmapError> {
        bmp::save_bmp(path, image)
    }
}

#[cfg(feature = "ppm")]
#[derive(Clone, Debug, Default)]
pub struct PpmCodec {
    pub limits: Limits,
}

#[cfg(feature = "ppm")]
impl ImageCodec for PpmCodec {
    fn decode_file(&self, path: &Path) -> Result<PixelBuffer, BitmapError> {
        crate::pnm::load_ppm(path, &self.limits)
    }

    fn encode_file(&self, path: &Path, image: &PixelBuffer) -> Result<(), BitmapError> {
        crate::pnm::save_ppm(path, image)
    }
}

#[cfg(feature = "jpeg")]
#[derive(Clone, Debug)]
pub struct JpegCodec {
    pub limits: Limits,
    pub quality: u8,
}

#[cfg(feature = "jpeg")]
impl Default for JpegCodec {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[cfg(feature = "jpeg")]
impl JpegCodec {
    /// Quality is clamped to `1..=100`.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }
}

#[cfg(feature = "jpeg")]
impl ImageCodec for JpegCodec {
    fn decode_file(&self, path: &Path) -> Result<PixelBuffer, BitmapError> {
        crate::jpeg::load_jpeg(path, &self.limits)
    }

    fn encode_file(&self, path: &Path, image: &PixelBuffer) -> Result<(), BitmapError> {
        crate::jpeg::save_jpeg(path, image, self.quality)
    }
}

/// Settings shared by every codec [`codec_for`] builds.
#[derive(Clone, Debug)]
pub struct CodecOptions {
    pub bmp: BmpDecodeOptions,
    pub limits: Limits,
    pub jpeg_quality: u8,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            bmp: BmpDecodeOptions::default(),
            limits: Limits::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Build the codec for `format`.
///
/// Fails with [`BitmapError::UnsupportedVariant`] when the format's cargo
/// feature is disabled.
pub fn codec_for(
    format: ImageFormat,
    options: &CodecOptions,
) -> Result<Box<dyn ImageCodec>, BitmapError> {
    match format {
        ImageFormat::Bmp => Ok(Box::new(BmpCodec {
            options: options.bmp.clone(),
        })),
        #[cfg(feature = "ppm")]
        ImageFormat::Ppm => Ok(Box::new(PpmCodec {
            limits: options.limits.clone(),
        })),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => Ok(Box::new(
            JpegCodec {
                limits: options.limits.clone(),
                ..Default::default()
            }
            .with_quality(options.jpeg_quality),
        )),
        #[allow(unreachable_patterns)]
        other => Err(BitmapError::UnsupportedVariant(format!(
            "{other:?} support not compiled in"
        ))),
    }
}
