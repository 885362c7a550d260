#![no_main]
use imgconv::bmp::BmpDecodeOptions;
use imgconv::Limits;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };

    // Both BMP modes and the PPM decoder must never panic
    let compatible = BmpDecodeOptions::default().with_limits(limits.clone());
    let _ = imgconv::bmp::decode_bmp_bytes(data, &compatible, enough::Unstoppable);
    let strict = BmpDecodeOptions::strict().with_limits(limits.clone());
    let _ = imgconv::bmp::decode_bmp_bytes(data, &strict, enough::Unstoppable);
    let _ = imgconv::pnm::decode_ppm(data, &limits, enough::Unstoppable);
});
