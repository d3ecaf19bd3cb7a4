#![no_main]
use libfuzzer_sys::fuzz_target;
use rand_chacha::{ChaChaRng, rand_core::SeedableRng};
use sm2_pke::{CurveParams, DecryptingKey, Error, Mode};

fuzz_target!(|data: &[u8]| {
    if data.len() < 33 {
        return;
    }

    let curve = CurveParams::sm2p256v1();
    let mut rng = ChaChaRng::from_seed(data[..32].try_into().unwrap());
    let mode = if data[32] & 1 == 0 {
        Mode::C1C2C3
    } else {
        Mode::C1C3C2
    };
    let dk = DecryptingKey::random(&curve, &mut rng).unwrap();
    let dk = DecryptingKey::new_with_mode(&curve, *dk.as_scalar(), mode).unwrap();
    let msg = &data[33..];

    // Untrusted ciphertext: any error is fine, a panic is not
    match dk.decrypt(msg) {
        Ok(_) | Err(Error::MalformedCiphertext)
        | Err(Error::InvalidPointEncoding)
        | Err(Error::TagVerification) => {}
        Err(err) => panic!("unexpected error: {err}"),
    }

    // Round trip the input as a plaintext
    let ciphertext = dk.encrypting_key().encrypt(&mut rng, msg).unwrap();
    assert_eq!(ciphertext.len(), curve.encoded_point_len() + msg.len() + 32);
    assert_eq!(dk.decrypt(&ciphertext).unwrap(), msg);
});
