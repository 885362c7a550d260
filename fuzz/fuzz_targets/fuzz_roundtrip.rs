#![no_main]
use imgconv::bmp::{self, BmpDecodeOptions};
use imgconv::Limits;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let options = BmpDecodeOptions::default().with_limits(Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    });
    let Ok(decoded) = bmp::decode_bmp_bytes(data, &options, enough::Unstoppable) else {
        return;
    };

    let reencoded = bmp::encode_bmp_bytes(&decoded, enough::Unstoppable)
        .expect("decoded image must re-encode");
    let Ok(decoded2) = bmp::decode_bmp_bytes(&reencoded, &BmpDecodeOptions::strict(), enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");
});
