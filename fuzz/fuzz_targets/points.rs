#![no_main]
use libfuzzer_sys::fuzz_target;
use sm2_pke::{CurveParams, Point, U256};

fn test_group(curve: &CurveParams, p1: &Point, p2: &Point, s: &U256) {
    let sum = curve.add(p1, p2).unwrap();
    assert!(curve.is_on_curve(&sum));

    // Test that addition and doubling are consistent
    assert_eq!(curve.double(p1).unwrap(), curve.add(p1, p1).unwrap());

    // Test that negation works correctly
    assert_eq!(curve.add(&sum, &curve.negate(&sum)).unwrap(), Point::Identity);

    // Test scalar multiplication distributive property
    let scalar_mul = curve.mul(p1, s).unwrap();
    let twice = s.wrapping_add(s);
    assert_eq!(
        curve.add(&scalar_mul, &scalar_mul).unwrap(),
        curve.mul(p1, &twice).unwrap()
    );
}

fuzz_target!(|data: &[u8]| {
    let curve = CurveParams::sm2p256v1();
    let len = curve.encoded_point_len();
    if data.len() < 2 * len + 8 {
        return;
    }

    // Arbitrary input must never panic the decoder
    let _ = curve.decode_point(&data[..usize::from(data[0]) % (2 * len)]);

    let p1 = curve
        .decode_point_checked(&data[..len])
        .unwrap_or(*curve.generator());
    let p2 = curve
        .decode_point_checked(&data[len..2 * len])
        .unwrap_or(*curve.generator());

    let mut scalar = [0u8; 8];
    scalar.copy_from_slice(&data[2 * len..2 * len + 8]);
    let s = U256::from_u64(u64::from_be_bytes(scalar));

    test_group(&curve, &p1, &p2, &s);
});
