//! Fixed-layout BMP header records.
//!
//! Both records are serialized field by field in little-endian order, so the
//! on-disk layout never depends on in-memory struct layout.

/// `BM`
pub const SIGNATURE: [u8; 2] = *b"BM";
/// Pixels per meter written to both resolution fields (about 300 DPI).
pub const RESOLUTION_PPM: i32 = 11811;
/// Written to the important-colors field.
pub const IMPORTANT_COLORS: u32 = 0x100_0000;
/// Offset of the pixel data from the start of the file.
pub const DATA_OFFSET: u32 = (BitmapFileHeader::SIZE + BitmapInfoHeader::SIZE) as u32;

/// Padded byte length of one row of 24-bit pixels: `4 * ceil(width * 3 / 4)`.
pub const fn stride(width: usize) -> usize {
    (width * 3).div_ceil(4) * 4
}

/// The 14-byte `BITMAPFILEHEADER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapFileHeader {
    pub signature: [u8; 2],
    /// Total file size in bytes, headers included.
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
}

impl BitmapFileHeader {
    pub const SIZE: usize = 14;

    pub fn new(file_size: u32) -> Self {
        Self {
            signature: SIGNATURE,
            file_size,
            reserved: 0,
            data_offset: DATA_OFFSET,
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.signature);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..10].copy_from_slice(&self.reserved.to_le_bytes());
        out[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
        out
    }

    pub fn from_bytes(b: &[u8; Self::SIZE]) -> Self {
        Self {
            signature: [b[0], b[1]],
            file_size: u32_at(b, 2),
            reserved: u32_at(b, 6),
            data_offset: u32_at(b, 10),
        }
    }
}

/// The 40-byte `BITMAPINFOHEADER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapInfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive: rows are stored bottom-up.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Pixel data size in bytes (`stride * height`).
    pub data_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl BitmapInfoHeader {
    pub const SIZE: usize = 40;

    /// Header for an uncompressed 24-bit image.
    pub fn new(width: i32, height: i32, data_size: u32) -> Self {
        Self {
            header_size: Self::SIZE as u32,
            width,
            height,
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            data_size,
            x_pixels_per_meter: RESOLUTION_PPM,
            y_pixels_per_meter: RESOLUTION_PPM,
            colors_used: 0,
            important_colors: IMPORTANT_COLORS,
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.data_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.important_colors.to_le_bytes());
        out
    }

    pub fn from_bytes(b: &[u8; Self::SIZE]) -> Self {
        Self {
            header_size: u32_at(b, 0),
            width: u32_at(b, 4) as i32,
            height: u32_at(b, 8) as i32,
            planes: u16_at(b, 12),
            bits_per_pixel: u16_at(b, 14),
            compression: u32_at(b, 16),
            data_size: u32_at(b, 20),
            x_pixels_per_meter: u32_at(b, 24) as i32,
            y_pixels_per_meter: u32_at(b, 28) as i32,
            colors_used: u32_at(b, 32),
            important_colors: u32_at(b, 36),
        }
    }
}

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}
