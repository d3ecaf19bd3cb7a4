use super::{Cipher, Mode, SharedSecret, message_bits, random_scalar, xor_keystream};
use crate::{
    CurveParams, EncryptingKey, Error, Result, U256,
    encoding::{bytes_to_uint, uint_to_bytes},
};
use alloc::vec::Vec;
use core::fmt;
use elliptic_curve::{
    rand_core::CryptoRngCore,
    subtle::{Choice, ConstantTimeEq},
    zeroize::Zeroize,
};
use sm3::{Sm3, digest::Digest};

/// Represents a private key used for decrypting messages.
#[derive(Clone)]
pub struct DecryptingKey {
    secret: U256,
    encrypting_key: EncryptingKey,
}

impl DecryptingKey {
    /// Create a new [`DecryptingKey`] from the private scalar `d`, using
    /// [`Mode::C1C2C3`].
    pub fn new(curve: &CurveParams, secret: U256) -> Result<Self> {
        Self::new_with_mode(curve, secret, Mode::default())
    }

    /// Create a new [`DecryptingKey`] with a specific encoding mode.
    ///
    /// `d` must lie in `[1, n − 1]`.
    pub fn new_with_mode(curve: &CurveParams, secret: U256, mode: Mode) -> Result<Self> {
        if secret == U256::ZERO || &secret >= curve.order() {
            return Err(Error::InvalidKey);
        }

        let point = curve.mul_generator(&secret)?;
        let encrypting_key = EncryptingKey::new_with_mode(curve, point, mode)?;

        Ok(Self {
            secret,
            encrypting_key,
        })
    }

    /// Generate a random [`DecryptingKey`].
    pub fn random<R: CryptoRngCore + ?Sized>(curve: &CurveParams, rng: &mut R) -> Result<Self> {
        let mut secret = random_scalar(rng, curve.order())?;
        let key = Self::new(curve, secret);
        secret.zeroize();
        key
    }

    /// Parse a big endian private scalar.
    pub fn from_slice(curve: &CurveParams, bytes: &[u8]) -> Result<Self> {
        let mut secret = bytes_to_uint(bytes).map_err(|_| Error::InvalidKey)?;
        let key = Self::new(curve, secret);
        secret.zeroize();
        key
    }

    /// Serialize the private scalar as `⌈bits(n)/8⌉` big endian bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let curve = self.encrypting_key.curve();
        uint_to_bytes(&self.secret, curve.order_bit_len().div_ceil(8))
    }

    /// Borrow the private scalar.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    pub fn as_scalar(&self) -> &U256 {
        &self.secret
    }

    /// Get the [`EncryptingKey`] which corresponds to this [`DecryptingKey`].
    pub fn encrypting_key(&self) -> &EncryptingKey {
        &self.encrypting_key
    }

    /// Curve this key belongs to.
    pub fn curve(&self) -> &CurveParams {
        self.encrypting_key.curve()
    }

    /// Ciphertext encoding mode.
    pub fn mode(&self) -> Mode {
        self.encrypting_key.mode()
    }

    /// Decrypt a ciphertext produced with SM3.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.decrypt_digest::<Sm3>(ciphertext)
    }

    /// Decrypt a ciphertext using the specified digest algorithm.
    pub fn decrypt_digest<D: Digest>(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Cipher::<D>::from_slice(self.curve(), ciphertext, self.mode())?;
        self.decrypt_cipher(&cipher)
    }

    /// Decrypt already decoded ciphertext components.
    pub fn decrypt_cipher<D: Digest>(&self, cipher: &Cipher<D>) -> Result<Vec<u8>> {
        decrypt(self.curve(), &self.secret, cipher)
    }
}

//
// Other trait impls
//

impl AsRef<EncryptingKey> for DecryptingKey {
    fn as_ref(&self) -> &EncryptingKey {
        &self.encrypting_key
    }
}

impl ConstantTimeEq for DecryptingKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret.ct_eq(&other.secret)
            & Choice::from(u8::from(self.encrypting_key == other.encrypting_key))
    }
}

impl fmt::Debug for DecryptingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptingKey")
            .field("encrypting_key", &self.encrypting_key)
            .finish_non_exhaustive()
    }
}

impl Drop for DecryptingKey {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

/// Constant-time comparison
impl Eq for DecryptingKey {}

impl PartialEq for DecryptingKey {
    fn eq(&self, other: &DecryptingKey) -> bool {
        self.ct_eq(other).into()
    }
}

fn decrypt<D: Digest>(curve: &CurveParams, secret: &U256, cipher: &Cipher<D>) -> Result<Vec<u8>> {
    // B3: [d]C1 = (x2, y2)
    let (x2, y2) = curve
        .mul(cipher.c1(), secret)?
        .coordinates()
        .ok_or(Error::InvalidPointEncoding)?;
    let shared = SharedSecret::new(curve, &x2, &y2)?;

    // B4: t = KDF(x2 ‖ y2, klen)
    let klen = message_bits(cipher.c2().len())?;
    let mut t = shared.keystream::<D>(klen)?;

    // B5: M' = C2 ⊕ t
    let mut msg = cipher.c2().to_vec();
    xor_keystream(&mut msg, &t);
    t.zeroize();

    // B6: u = Hash(x2 ‖ M' ‖ y2), check u == C3
    let u = shared.tag::<D>(&msg);
    if !bool::from(u[..].ct_eq(&cipher.c3()[..])) {
        msg.as_mut_slice().zeroize();
        trace!(ciphertext_len = cipher.c2().len(), "tag mismatch");
        return Err(Error::TagVerification);
    }

    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::DecryptingKey;
    use crate::{CurveParams, Error, U256};
    use hex_literal::hex;

    #[test]
    fn scalar_range() {
        let curve = CurveParams::example_fp256();
        assert_eq!(
            DecryptingKey::new(&curve, U256::ZERO).unwrap_err(),
            Error::InvalidKey
        );
        assert_eq!(
            DecryptingKey::new(&curve, *curve.order()).unwrap_err(),
            Error::InvalidKey
        );
        let max = curve.order().wrapping_sub(&U256::ONE);
        assert!(DecryptingKey::new(&curve, max).is_ok());
        assert!(DecryptingKey::new(&curve, U256::ONE).is_ok());
    }

    #[test]
    fn public_key_derivation() {
        let curve = CurveParams::example_fp256();
        let key = DecryptingKey::from_slice(
            &curve,
            &hex!("1649AB77A00637BD5E2EFE283FBF353534AA7F7CB89463F208DDBC2920BB0DA0"),
        )
        .unwrap();
        let (x, y) = key.encrypting_key().as_point().coordinates().unwrap();
        assert_eq!(
            x.to_uint(),
            U256::from_be_hex("435B39CCA8F3B508C1488AFC67BE491A0F7BA07E581A0E4849A5CF70628A7E0A")
        );
        assert_eq!(
            y.to_uint(),
            U256::from_be_hex("75DDBA78F15FEECB4C7895E2C1CDF5FE01DEBB2CDBADF45399CCF77BBA076A42")
        );
    }

    #[test]
    fn bytes_round_trip() {
        let curve = CurveParams::sm2p256v1();
        let key = DecryptingKey::new(&curve, U256::from_u64(0x1234)).unwrap();
        let bytes = key.to_bytes().unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[30..], &[0x12, 0x34]);
        assert_eq!(DecryptingKey::from_slice(&curve, &bytes).unwrap(), key);
    }

    #[test]
    fn debug_hides_secret() {
        let curve = CurveParams::sm2p256v1();
        let key = DecryptingKey::new(&curve, U256::from_u64(0x1234)).unwrap();
        let debug = alloc::format!("{key:?}");
        assert!(debug.starts_with("DecryptingKey"));
        assert!(!debug.contains("secret"));
    }
}
