//! SM2 key derivation function (GB/T 32918.4 § 5.4.3).
//!
//! ```text
//! Ha_i = H(Z ‖ ct_i)    ct_i = i as a 32-bit big endian counter, i = 1..⌈klen/v⌉
//! K    = first klen bits of Ha_1 ‖ Ha_2 ‖ …
//! ```
//!
//! where `v` is the digest size in bits.

use crate::{BitString, Error, Result};
use sm3::digest::Digest;

/// Digest output size in bits.
pub fn hash_bits<D: Digest>() -> u64 {
    u64::try_from(<D as Digest>::output_size())
        .unwrap_or(u64::MAX)
        .saturating_mul(8)
}

/// Check that `klen` bits can be derived with digest `D`.
///
/// Fails with [`Error::KeyLengthTooLarge`] when `klen ≥ (2³² − 1) · v`.
pub fn check_key_length<D: Digest>(klen: usize) -> Result<()> {
    let limit = u64::from(u32::MAX).saturating_mul(hash_bits::<D>());
    match u64::try_from(klen) {
        Ok(klen) if klen < limit => Ok(()),
        _ => Err(Error::KeyLengthTooLarge),
    }
}

/// Derive exactly `klen` bits from the shared secret `z`.
///
/// `z` is packed with [`BitString::to_bytes`] before hashing, so a secret
/// whose length is not a multiple of 8 is zero-padded on the left.
pub fn kdf<D: Digest>(z: &BitString, klen: usize) -> Result<BitString> {
    check_key_length::<D>(klen)?;

    let digest_bits = <D as Digest>::output_size() * 8;
    let blocks = u32::try_from(klen.div_ceil(digest_bits)).map_err(|_| Error::KeyLengthTooLarge)?;
    let z = z.to_bytes();

    let mut key = BitString::new();
    for ct in 1..=blocks {
        let ha = D::new()
            .chain_update(&z)
            .chain_update(ct.to_be_bytes())
            .finalize();
        key.extend_from_bytes(&ha);
    }

    key.truncate(klen);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::{check_key_length, hash_bits, kdf};
    use crate::{BitString, Error};
    use hex_literal::hex;
    use sm3::Sm3;

    /// `x2 ‖ y2` from the GB/T 32918.4 example A.2 (example curve).
    const Z: [u8; 64] = hex!(
        "64D20D27D0632957F8028C1E024F6B02EDF23102A566C932AE8BD613A8E865FE"
        "58D225ECA784AE300A81A2D48281A828E1CEDF11C4219099840265375077BF78"
    );

    #[test]
    fn standard_vector() {
        let t = kdf::<Sm3>(&BitString::from_bytes(&Z), 152).unwrap();
        assert_eq!(t.len(), 152);
        assert_eq!(
            t.as_aligned_bytes().unwrap(),
            hex!("006E30DAE231B071DFAD8AA379E90264491603")
        );
    }

    #[test]
    fn multiple_blocks() {
        // Ha_1 ‖ Ha_2 with the counter incremented between blocks
        let t = kdf::<Sm3>(&BitString::from_bytes(&Z), 512).unwrap();
        assert_eq!(
            t.as_aligned_bytes().unwrap(),
            hex!(
                "006E30DAE231B071DFAD8AA379E90264491603B93FC2D0B2F64C3021E23C6CC8"
                "3065830FEA992082FB7A8CAA831D149A49B9FF1A67BA3954ABF530C363AD80AC"
            )
        );
    }

    #[test]
    fn output_length_is_exact() {
        let z = BitString::from_bytes(&Z);
        for klen in [0, 1, 7, 8, 255, 256, 257, 1000] {
            let t = kdf::<Sm3>(&z, klen).unwrap();
            assert_eq!(t.len(), klen);
        }
    }

    #[test]
    fn prefix_consistency() {
        let z = BitString::from_bytes(&Z);
        let long = kdf::<Sm3>(&z, 300).unwrap();
        let mut short = kdf::<Sm3>(&z, 301).unwrap();
        short.truncate(300);
        assert_eq!(long, short);
    }

    #[test]
    fn deterministic() {
        let z = BitString::from_bytes(b"shared secret");
        assert_eq!(kdf::<Sm3>(&z, 123).unwrap(), kdf::<Sm3>(&z, 123).unwrap());
        assert_ne!(
            kdf::<Sm3>(&z, 128).unwrap(),
            kdf::<Sm3>(&BitString::from_bytes(b"shared secreu"), 128).unwrap()
        );
    }

    #[test]
    fn empty_output() {
        let t = kdf::<Sm3>(&BitString::from_bytes(&Z), 0).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn length_limit() {
        assert_eq!(hash_bits::<Sm3>(), 256);
        let limit = usize::try_from(u64::from(u32::MAX) * 256).unwrap();
        assert!(check_key_length::<Sm3>(limit - 1).is_ok());
        assert_eq!(check_key_length::<Sm3>(limit), Err(Error::KeyLengthTooLarge));
        assert_eq!(
            kdf::<Sm3>(&BitString::new(), usize::MAX).unwrap_err(),
            Error::KeyLengthTooLarge
        );
    }
}
