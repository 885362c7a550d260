use imgref::{ImgRef, ImgVec};
use rgb::ComponentBytes as _;

use crate::error::BitmapError;

/// One 8-bit RGB pixel.
pub type Color = rgb::RGB8;

/// Black, the default fill of a fresh buffer.
pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

/// Dense, row-major grid of RGB pixels.
///
/// The grid always holds exactly `width * height` pixels. A buffer with a zero
/// dimension is valid and is what the `load` entry points return on failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Allocate a `width` x `height` buffer filled with `fill`.
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// The "no image" buffer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Like [`PixelBuffer::new`], but fails instead of overflowing or
    /// aborting when the allocation cannot be made.
    pub(crate) fn try_new(width: usize, height: usize, fill: Color) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: width as u64,
            height: height as u64,
        };
        let len = width.checked_mul(height).ok_or_else(too_large)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| too_large())?;
        pixels.resize(len, fill);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from packed RGB bytes (3 bytes per pixel, rows top to bottom).
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, BitmapError> {
        let mut buffer = Self::try_new(width, height, BLACK)?;
        let needed = buffer.pixels.len() * 3;
        if bytes.len() < needed {
            return Err(BitmapError::UnexpectedEof);
        }
        for (px, c) in buffer.pixels.iter_mut().zip(bytes.chunks_exact(3)) {
            *px = Color::new(c[0], c[1], c[2]);
        }
        Ok(buffer)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row `y`, left to right. Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[Color] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [Color] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Color]> + '_ {
        // an empty buffer has no pixels, so the chunk size only needs to be non-zero
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// Packed RGB bytes, rows top to bottom.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.as_bytes().to_vec()
    }

    /// Borrow as an [`imgref::ImgRef`]. `None` for an empty buffer.
    pub fn as_imgref(&self) -> Option<ImgRef<'_, Color>> {
        if self.is_empty() {
            return None;
        }
        Some(ImgRef::new(&self.pixels, self.width, self.height))
    }
}

impl From<ImgVec<Color>> for PixelBuffer {
    fn from(img: ImgVec<Color>) -> Self {
        let (width, height) = (img.width(), img.height());
        let (buf, _, _) = img.into_contiguous_buf();
        Self {
            width,
            height,
            pixels: buf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_every_pixel() {
        let red = Color::new(255, 0, 0);
        let buffer = PixelBuffer::new(3, 2, red);
        assert_eq!(buffer.pixels().len(), 6);
        assert!(buffer.pixels().iter().all(|&p| p == red));
        assert!(!buffer.is_empty());
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(PixelBuffer::new(0, 5, BLACK).is_empty());
        assert!(PixelBuffer::new(5, 0, BLACK).is_empty());
        assert!(PixelBuffer::empty().is_empty());
        assert_eq!(PixelBuffer::new(0, 5, BLACK).rows().count(), 0);
        assert!(PixelBuffer::empty().as_imgref().is_none());
    }

    #[test]
    fn rows_are_mutable_in_place() {
        let mut buffer = PixelBuffer::new(2, 3, BLACK);
        buffer.row_mut(1)[1] = Color::new(1, 2, 3);
        assert_eq!(buffer.pixel(1, 1), Some(Color::new(1, 2, 3)));
        assert_eq!(buffer.pixel(0, 1), Some(BLACK));
        assert_eq!(buffer.pixel(2, 0), None);
        assert_eq!(buffer.rows().nth(1).unwrap(), buffer.row(1));
    }

    #[test]
    fn rgb_bytes_roundtrip() {
        let bytes = [10u8, 20, 30, 40, 50, 60];
        let buffer = PixelBuffer::from_rgb_bytes(2, 1, &bytes).unwrap();
        assert_eq!(buffer.pixel(1, 0), Some(Color::new(40, 50, 60)));
        assert_eq!(buffer.to_rgb_bytes(), bytes);
        assert!(matches!(
            PixelBuffer::from_rgb_bytes(3, 1, &bytes),
            Err(BitmapError::UnexpectedEof)
        ));
    }

    #[test]
    fn try_new_refuses_impossible_allocations() {
        let side = i32::MAX as usize;
        assert!(matches!(
            PixelBuffer::try_new(side, side, BLACK),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
        assert!(matches!(
            PixelBuffer::try_new(usize::MAX, 2, BLACK),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
        assert_eq!(PixelBuffer::try_new(4, 3, BLACK).unwrap().pixels().len(), 12);
    }

    #[test]
    fn imgref_interop() {
        let img = ImgVec::new(vec![Color::new(9, 8, 7); 6], 3, 2);
        let buffer = PixelBuffer::from(img);
        assert_eq!((buffer.width(), buffer.height()), (3, 2));
        let view = buffer.as_imgref().unwrap();
        assert_eq!(view.width(), 3);
        assert_eq!(view.height(), 2);
    }
}
