//! SM2 Encryption Algorithm as defined in GB/T 32918.4 (see also
//! [draft-shen-sm2-ecdsa § 7]).
//!
//! ## Usage
//!
//! ```
//! # fn main() -> Result<(), sm2_pke::Error> {
//! use rand_core::OsRng; // requires `getrandom` feature
//! use sm2_pke::{Cipher, CurveParams, DecryptingKey, Mode, sm3::Sm3};
//!
//! let curve = CurveParams::sm2p256v1();
//!
//! // Encrypting
//! let decrypting_key = DecryptingKey::random(&curve, &mut OsRng)?;
//! let encrypting_key = decrypting_key.encrypting_key();
//! let ciphertext = encrypting_key.encrypt(&mut OsRng, b"plaintext")?;
//!
//! // Decrypting
//! assert_eq!(decrypting_key.decrypt(&ciphertext)?, b"plaintext");
//!
//! // Inspecting the components
//! let cipher = Cipher::<Sm3>::from_slice(&curve, &ciphertext, Mode::C1C2C3)?;
//! assert_eq!(cipher.c2().len(), 9);
//! # Ok(())
//! # }
//! ```
//!
//! [draft-shen-sm2-ecdsa § 7]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-7

mod decrypting;
mod encrypting;

pub use self::{decrypting::DecryptingKey, encrypting::EncryptingKey};

use crate::{
    BitString, CurveParams, Error, FieldElement, Point, Result, U256, encoding::uint_bit_len,
    kdf::kdf,
};
use alloc::vec::Vec;
use core::fmt;
use elliptic_curve::{bigint::Encoding, rand_core::CryptoRngCore, zeroize::Zeroize};
use sm3::{
    Sm3,
    digest::{Digest, Output},
};

/// Ordering of the ciphertext components.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// `C1 ‖ C2 ‖ C3`: the original GB/T 32918.4 layout.
    #[default]
    C1C2C3,

    /// `C1 ‖ C3 ‖ C2`: the layout of GM/T 0009 and later revisions.
    C1C3C2,
}

/// Decoded ciphertext `(C1, C2, C3)`.
///
/// `C1` is the ephemeral point `[k]G`, `C2` the masked message and `C3` the
/// tag `Hash(x2 ‖ M ‖ y2)`.
pub struct Cipher<D: Digest = Sm3> {
    c1: Point,
    c2: Vec<u8>,
    c3: Output<D>,
}

impl<D: Digest> Cipher<D> {
    /// Decode from a byte slice.
    ///
    /// `C1` must be a valid uncompressed point on `curve` with `[h]C1 ≠ O`.
    pub fn from_slice(curve: &CurveParams, ciphertext: &[u8], mode: Mode) -> Result<Self> {
        let c1_len = curve.encoded_point_len();
        let digest_len = <D as Digest>::output_size();
        if ciphertext.len() < c1_len + digest_len {
            return Err(Error::MalformedCiphertext);
        }

        // B1: get C1 from C and verify that it satisfies the curve equation
        let (c1, rest) = ciphertext.split_at(c1_len);
        let c1 = curve.decode_point_checked(c1)?;

        // B2: S = [h]C1 must not be the point at infinity
        if curve.mul(&c1, curve.cofactor())?.is_identity() {
            return Err(Error::InvalidPointEncoding);
        }

        let (c2, c3_bytes) = match mode {
            Mode::C1C2C3 => rest.split_at(rest.len() - digest_len),
            Mode::C1C3C2 => {
                let (c3, c2) = rest.split_at(digest_len);
                (c2, c3)
            }
        };

        let mut c3 = Output::<D>::default();
        c3.copy_from_slice(c3_bytes);

        Ok(Self {
            c1,
            c2: c2.to_vec(),
            c3,
        })
    }

    /// Encode as bytes in the given `mode`.
    pub fn to_vec(&self, curve: &CurveParams, mode: Mode) -> Result<Vec<u8>> {
        let c1 = curve.encode_point(&self.c1)?;
        let mut out = Vec::with_capacity(c1.len() + self.c2.len() + self.c3.len());
        out.extend_from_slice(&c1);
        match mode {
            Mode::C1C2C3 => {
                out.extend_from_slice(&self.c2);
                out.extend_from_slice(&self.c3);
            }
            Mode::C1C3C2 => {
                out.extend_from_slice(&self.c3);
                out.extend_from_slice(&self.c2);
            }
        }
        Ok(out)
    }

    /// Get C1
    pub fn c1(&self) -> &Point {
        &self.c1
    }

    /// Get C2
    pub fn c2(&self) -> &[u8] {
        &self.c2
    }

    /// Get C3
    pub fn c3(&self) -> &Output<D> {
        &self.c3
    }
}

impl<D: Digest> Clone for Cipher<D> {
    fn clone(&self) -> Self {
        Self {
            c1: self.c1,
            c2: self.c2.clone(),
            c3: self.c3.clone(),
        }
    }
}

impl<D: Digest> fmt::Debug for Cipher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("c1", &self.c1)
            .field("c2", &self.c2)
            .field("c3", &&self.c3[..])
            .finish()
    }
}

impl<D: Digest> PartialEq for Cipher<D> {
    fn eq(&self, other: &Self) -> bool {
        self.c1 == other.c1 && self.c2 == other.c2 && self.c3 == other.c3
    }
}

impl<D: Digest> Eq for Cipher<D> {}

/// Is `keystream` unusable for masking a message?
///
/// True iff it is non-empty and every bit is zero, in which case `C2` would
/// equal the plaintext. The empty keystream of an empty message is usable.
pub fn is_degenerate_keystream(keystream: &BitString) -> bool {
    !keystream.is_empty() && keystream.is_all_zero()
}

/// Shared point `(x2, y2)` serialized as field elements, wiped on drop.
struct SharedSecret {
    x2: Vec<u8>,
    y2: Vec<u8>,
}

impl SharedSecret {
    fn new(curve: &CurveParams, x2: &FieldElement, y2: &FieldElement) -> Result<Self> {
        Ok(Self {
            x2: curve.encode_field_element(x2)?,
            y2: curve.encode_field_element(y2)?,
        })
    }

    /// `t = KDF(x2 ‖ y2, klen)`
    fn keystream<D: Digest>(&self, klen: usize) -> Result<BitString> {
        let mut z = BitString::from_bytes(&self.x2);
        z.extend_from_bytes(&self.y2);
        let t = kdf::<D>(&z, klen);
        z.zeroize();
        t
    }

    /// `Hash(x2 ‖ M ‖ y2)`
    fn tag<D: Digest>(&self, msg: &[u8]) -> Output<D> {
        D::new()
            .chain_update(&self.x2)
            .chain_update(msg)
            .chain_update(&self.y2)
            .finalize()
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.x2.as_mut_slice().zeroize();
        self.y2.as_mut_slice().zeroize();
    }
}

/// XORs `data` with the leading bytes of `keystream`.
fn xor_keystream(data: &mut [u8], keystream: &BitString) {
    let mut mask = keystream.to_bytes();
    data.iter_mut()
        .zip(&mask)
        .for_each(|(byte, mask)| *byte ^= mask);
    mask.as_mut_slice().zeroize();
}

/// Bit length of a message of `len` bytes.
fn message_bits(len: usize) -> Result<usize> {
    len.checked_mul(8).ok_or(Error::KeyLengthTooLarge)
}

/// Sample a scalar uniformly from `[1, n − 1]` by rejection.
pub(crate) fn random_scalar<R: CryptoRngCore + ?Sized>(rng: &mut R, order: &U256) -> Result<U256> {
    let bits = uint_bit_len(order);
    let len = bits.div_ceil(8);
    let mut repr = [0u8; 32];
    let start = repr.len() - len;

    loop {
        rng.try_fill_bytes(&mut repr[start..])
            .map_err(|_| Error::RandomSource)?;
        if bits % 8 != 0 {
            repr[start] &= 0xff >> (8 - bits % 8);
        }

        let k = U256::from_be_bytes(repr);
        if k != U256::ZERO && &k < order {
            repr.zeroize();
            return Ok(k);
        }
    }
}
