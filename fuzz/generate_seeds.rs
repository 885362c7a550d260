#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // PPM 2x2
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/ppm_2x2.ppm"), ppm).unwrap();

    // PGM 3x2, maxval 200
    let pgm = b"P5\n3 2\n200\n\x00\x40\x80\xc0\xc8\x64";
    fs::write(format!("{dir}/pgm_3x2.pgm"), pgm).unwrap();

    // BMP 2x1 24-bit: 6 pixel bytes + 2 padding
    let mut bmp = vec![0u8; 62];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&62u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    bmp[18..22].copy_from_slice(&2i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[34..38].copy_from_slice(&8u32.to_le_bytes()); // pixel data size
    bmp[38..42].copy_from_slice(&11811u32.to_le_bytes());
    bmp[42..46].copy_from_slice(&11811u32.to_le_bytes());
    bmp[50..54].copy_from_slice(&0x100_0000u32.to_le_bytes());
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // blue
    bmp[57] = 0x00; bmp[58] = 0x00; bmp[59] = 0xff; // red
    fs::write(format!("{dir}/bmp_2x1.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/bm_negative_height.bin"), {
        let mut b = bmp_header_only();
        b[22..26].copy_from_slice(&(-1i32).to_le_bytes());
        b
    })
    .unwrap();

    println!("Generated seed corpus in {dir}/");
}

fn bmp_header_only() -> Vec<u8> {
    let mut b = vec![0u8; 54];
    b[0] = b'B'; b[1] = b'M';
    b[10..14].copy_from_slice(&54u32.to_le_bytes());
    b[14..18].copy_from_slice(&40u32.to_le_bytes());
    b[18..22].copy_from_slice(&1i32.to_le_bytes());
    b[26..28].copy_from_slice(&1u16.to_le_bytes());
    b[28..30].copy_from_slice(&24u16.to_le_bytes());
    b
}
