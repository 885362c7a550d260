//! Test corpus: malformed BMP input, strict validation, and the PPM/JPEG
//! collaborators.

use enough::Unstoppable;
use imgconv::bmp::{self, BitmapFileHeader, BitmapInfoHeader, BmpDecodeOptions, stride};
use imgconv::*;

fn checkerboard(w: usize, h: usize) -> PixelBuffer {
    let mut image = PixelBuffer::new(w, h, BLACK);
    for y in 0..h {
        for (x, px) in image.row_mut(y).iter_mut().enumerate() {
            *px = if (x + y) % 2 == 0 {
                Color::new(200, 220, 240)
            } else {
                Color::new(10, 40, 70)
            };
        }
    }
    image
}

fn gradient(w: usize, h: usize) -> PixelBuffer {
    let mut image = PixelBuffer::new(w, h, BLACK);
    for y in 0..h {
        for (x, px) in image.row_mut(y).iter_mut().enumerate() {
            *px = Color::new((x * 255 / w.max(1)) as u8, (y * 255 / h.max(1)) as u8, 128);
        }
    }
    image
}

fn decode(data: &[u8]) -> Result<PixelBuffer, BitmapError> {
    bmp::decode_bmp_bytes(data, &BmpDecodeOptions::default(), Unstoppable)
}

fn decode_strict(data: &[u8]) -> Result<PixelBuffer, BitmapError> {
    bmp::decode_bmp_bytes(data, &BmpDecodeOptions::strict(), Unstoppable)
}

/// Headers plus raw pixel bytes, bypassing the encoder.
fn hand_built(file: BitmapFileHeader, info: BitmapInfoHeader, pixels: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&file.to_bytes());
    out.extend_from_slice(&info.to_bytes());
    out.extend_from_slice(pixels);
    out
}

// ── BMP: malformed input ─────────────────────────────────────────────

#[test]
fn truncated_headers_fail() {
    let encoded = bmp::encode_bmp_bytes(&checkerboard(4, 4), Unstoppable).unwrap();
    for len in [0, 1, 13, 14, 30, 53] {
        assert!(
            matches!(decode(&encoded[..len]), Err(BitmapError::UnexpectedEof)),
            "length {len} should be a short read"
        );
    }
}

#[test]
fn truncated_pixel_rows_fail() {
    let encoded = bmp::encode_bmp_bytes(&checkerboard(4, 4), Unstoppable).unwrap();
    let cut = encoded.len() - stride(4) - 1;
    assert!(matches!(
        decode(&encoded[..cut]),
        Err(BitmapError::UnexpectedEof)
    ));
}

#[test]
fn missing_final_padding_is_tolerated() {
    let image = gradient(5, 3);
    let encoded = bmp::encode_bmp_bytes(&image, Unstoppable).unwrap();
    let pad = stride(5) - 15;
    let decoded = decode(&encoded[..encoded.len() - pad]).unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn degenerate_dimensions_fail() {
    for (w, h) in [(0, 4), (4, 0), (-2, 4), (4, -4)] {
        let data = hand_built(
            BitmapFileHeader::new(54),
            BitmapInfoHeader::new(w, h, 0),
            &[0u8; 64],
        );
        assert!(
            matches!(decode(&data), Err(BitmapError::InvalidHeader(_))),
            "{w}x{h} should be rejected"
        );
    }
}

#[test]
fn huge_claims_fail_without_allocating() {
    let header = hand_built(
        BitmapFileHeader::new(54),
        BitmapInfoHeader::new(i32::MAX, i32::MAX, 0),
        &[],
    );
    // known length: the rows cannot be there
    assert!(matches!(decode(&header), Err(BitmapError::UnexpectedEof)));

    // unknown length: the buffer cannot be allocated
    let mut reader = std::io::Cursor::new(&header);
    assert!(matches!(
        bmp::decode_bmp(&mut reader, &BmpDecodeOptions::default(), None, Unstoppable),
        Err(BitmapError::DimensionsTooLarge { .. })
    ));

    // a large but allocatable claim over a short body
    let data = hand_built(
        BitmapFileHeader::new(70),
        BitmapInfoHeader::new(40_000, 40_000, 0),
        &[0u8; 16],
    );
    assert!(matches!(decode(&data), Err(BitmapError::UnexpectedEof)));
}

#[test]
fn compatible_mode_ignores_signature_and_depth() {
    let mut file = BitmapFileHeader::new(58);
    file.signature = *b"XX";
    let mut info = BitmapInfoHeader::new(1, 1, 4);
    info.bits_per_pixel = 32;
    info.compression = 3;
    let data = hand_built(file, info, &[1, 2, 3, 0]);

    let decoded = decode(&data).unwrap();
    assert_eq!(decoded.pixel(0, 0), Some(Color::new(3, 2, 1)));
    assert!(decode_strict(&data).is_err());
}

#[test]
fn strict_mode_rejects_bad_signature() {
    let mut file = BitmapFileHeader::new(58);
    file.signature = *b"MB";
    let data = hand_built(file, BitmapInfoHeader::new(1, 1, 4), &[0; 4]);
    assert!(matches!(
        decode_strict(&data),
        Err(BitmapError::UnrecognizedFormat)
    ));
}

#[test]
fn strict_mode_rejects_other_variants() {
    let mut info = BitmapInfoHeader::new(1, 1, 4);
    info.bits_per_pixel = 8;
    let data = hand_built(BitmapFileHeader::new(58), info, &[0; 4]);
    assert!(matches!(
        decode_strict(&data),
        Err(BitmapError::UnsupportedVariant(_))
    ));

    let mut info = BitmapInfoHeader::new(1, 1, 4);
    info.compression = 1;
    let data = hand_built(BitmapFileHeader::new(58), info, &[0; 4]);
    assert!(matches!(
        decode_strict(&data),
        Err(BitmapError::UnsupportedVariant(_))
    ));

    let mut file = BitmapFileHeader::new(58);
    file.data_offset = 60;
    let data = hand_built(file, BitmapInfoHeader::new(1, 1, 4), &[0; 4]);
    assert!(matches!(
        decode_strict(&data),
        Err(BitmapError::UnsupportedVariant(_))
    ));
}

#[test]
fn strict_mode_rejects_oversized_claims() {
    // claims 100000 x 100000 but carries 4 bytes of pixels
    let data = hand_built(
        BitmapFileHeader::new(58),
        BitmapInfoHeader::new(100_000, 100_000, 4),
        &[0; 4],
    );
    assert!(matches!(
        decode_strict(&data),
        Err(BitmapError::InvalidHeader(_))
    ));
}

#[test]
fn strict_mode_accepts_own_output() {
    let image = gradient(7, 6);
    let encoded = bmp::encode_bmp_bytes(&image, Unstoppable).unwrap();
    assert_eq!(decode_strict(&encoded).unwrap(), image);
}

#[test]
fn limits_reject_large() {
    let encoded = bmp::encode_bmp_bytes(&checkerboard(4, 4), Unstoppable).unwrap();
    let options = BmpDecodeOptions::default().with_limits(Limits {
        max_pixels: Some(15),
        ..Default::default()
    });
    let result = bmp::decode_bmp_bytes(&encoded, &options, Unstoppable);
    match result.unwrap_err() {
        BitmapError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn empty_image_encodes_headers_only() {
    let encoded = bmp::encode_bmp_bytes(&PixelBuffer::empty(), Unstoppable).unwrap();
    assert_eq!(encoded.len(), 54);
    assert_eq!(&encoded[2..6], &54u32.to_le_bytes());
    // and it does not decode back to an image
    assert!(decode(&encoded).is_err());
}

#[test]
fn streaming_reader_roundtrip() {
    let image = checkerboard(13, 9);
    let mut encoded = Vec::new();
    bmp::encode_bmp(&mut encoded, &image, Unstoppable).unwrap();
    let mut reader = std::io::Cursor::new(encoded);
    let decoded =
        bmp::decode_bmp(&mut reader, &BmpDecodeOptions::default(), None, Unstoppable).unwrap();
    assert_eq!(decoded, image);
}

// ── PPM ──────────────────────────────────────────────────────────────

#[cfg(feature = "ppm")]
#[test]
fn ppm_roundtrip() {
    let image = checkerboard(8, 6);
    let mut encoded = Vec::new();
    pnm::encode_ppm(&mut encoded, &image, Unstoppable).unwrap();
    assert!(encoded.starts_with(b"P6\n8 6\n255\n"));
    assert_eq!(encoded.len(), b"P6\n8 6\n255\n".len() + 8 * 6 * 3);

    let decoded = pnm::decode_ppm(&encoded, &Limits::default(), Unstoppable).unwrap();
    assert_eq!(decoded, image);
}

#[cfg(feature = "ppm")]
#[test]
fn ppm_16bit_and_gray() {
    let mut data = b"P6\n1 1\n65535\n".to_vec();
    data.extend_from_slice(&[0xFF, 0xFF, 0x00, 0x00, 0x80, 0x00]);
    let decoded = pnm::decode_ppm(&data, &Limits::default(), Unstoppable).unwrap();
    assert_eq!(decoded.pixel(0, 0), Some(Color::new(255, 0, 128)));

    let data = b"P5\n2 1\n255\n\x10\xF0";
    let decoded = pnm::decode_ppm(data, &Limits::default(), Unstoppable).unwrap();
    assert_eq!(decoded.pixel(0, 0), Some(Color::new(0x10, 0x10, 0x10)));
    assert_eq!(decoded.pixel(1, 0), Some(Color::new(0xF0, 0xF0, 0xF0)));
}

#[cfg(feature = "ppm")]
#[test]
fn ppm_truncated_raster() {
    let data = b"P6\n2 2\n255\n\x00\x00\x00";
    assert!(matches!(
        pnm::decode_ppm(data, &Limits::default(), Unstoppable),
        Err(BitmapError::UnexpectedEof)
    ));
}

#[cfg(feature = "ppm")]
#[test]
fn bmp_to_ppm_to_bmp() {
    let image = gradient(11, 4);
    let bmp_bytes = bmp::encode_bmp_bytes(&image, Unstoppable).unwrap();
    let loaded = decode(&bmp_bytes).unwrap();

    let mut ppm_bytes = Vec::new();
    pnm::encode_ppm(&mut ppm_bytes, &loaded, Unstoppable).unwrap();
    let back = pnm::decode_ppm(&ppm_bytes, &Limits::default(), Unstoppable).unwrap();

    assert_eq!(bmp::encode_bmp_bytes(&back, Unstoppable).unwrap(), bmp_bytes);
}

// ── JPEG ─────────────────────────────────────────────────────────────

#[cfg(feature = "jpeg")]
#[test]
fn jpeg_roundtrip_is_close() {
    let image = PixelBuffer::new(16, 16, Color::new(200, 100, 50));
    let mut encoded = Vec::new();
    jpeg::encode_jpeg(&mut encoded, &image, 95).unwrap();
    assert_eq!(&encoded[0..2], &[0xFF, 0xD8]);

    let decoded = jpeg::decode_jpeg(&encoded, &Limits::default()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 16));
    for (a, b) in decoded.pixels().iter().zip(image.pixels()) {
        assert!(a.r.abs_diff(b.r) <= 8, "{a:?} vs {b:?}");
        assert!(a.g.abs_diff(b.g) <= 8, "{a:?} vs {b:?}");
        assert!(a.b.abs_diff(b.b) <= 8, "{a:?} vs {b:?}");
    }
}

#[cfg(feature = "jpeg")]
#[test]
fn jpeg_rejects_garbage() {
    assert!(jpeg::decode_jpeg(b"not a jpeg", &Limits::default()).is_err());
}

#[cfg(feature = "jpeg")]
#[test]
fn jpeg_rejects_oversized_dimensions() {
    let image = PixelBuffer::new(70_000, 1, BLACK);
    let mut encoded = Vec::new();
    assert!(matches!(
        jpeg::encode_jpeg(&mut encoded, &image, 90),
        Err(BitmapError::DimensionsTooLarge { .. })
    ));
}
