use super::{
    Cipher, Mode, SharedSecret, is_degenerate_keystream, message_bits, random_scalar,
    xor_keystream,
};
use crate::{CurveParams, Error, Point, Result, kdf::check_key_length};
use alloc::vec::Vec;
use elliptic_curve::{rand_core::CryptoRngCore, zeroize::Zeroize};
use sm3::{Sm3, digest::Digest};

/// Represents a public key used for encrypting messages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptingKey {
    curve: CurveParams,
    point: Point,
    mode: Mode,
}

impl EncryptingKey {
    /// Initialize [`EncryptingKey`] from a public point, using
    /// [`Mode::C1C2C3`].
    pub fn new(curve: &CurveParams, point: Point) -> Result<Self> {
        Self::new_with_mode(curve, point, Mode::default())
    }

    /// Initialize [`EncryptingKey`] from a public point and encoding mode.
    ///
    /// The point must lie on `curve`, must not be the identity and must
    /// satisfy `[h]P ≠ O`.
    pub fn new_with_mode(curve: &CurveParams, point: Point, mode: Mode) -> Result<Self> {
        if point.is_identity() || !curve.is_on_curve(&point) {
            return Err(Error::InvalidKey);
        }

        // A3: S = [h]P_B must not be the point at infinity
        if curve.mul(&point, curve.cofactor())?.is_identity() {
            return Err(Error::InvalidKey);
        }

        Ok(Self {
            curve: *curve,
            point,
            mode,
        })
    }

    /// Parse an uncompressed SEC1 encoded public key.
    pub fn from_sec1_bytes(curve: &CurveParams, bytes: &[u8]) -> Result<Self> {
        let point = curve
            .decode_point_checked(bytes)
            .map_err(|_| Error::InvalidKey)?;
        Self::new(curve, point)
    }

    /// Serialize as an uncompressed SEC1 encoded point.
    pub fn to_sec1_bytes(&self) -> Result<Vec<u8>> {
        self.curve.encode_point(&self.point)
    }

    /// Borrow the public point.
    pub fn as_point(&self) -> &Point {
        &self.point
    }

    /// Curve this key belongs to.
    pub fn curve(&self) -> &CurveParams {
        &self.curve
    }

    /// Ciphertext encoding mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Encrypt `msg` using SM3 and the key's default mode.
    pub fn encrypt<R: CryptoRngCore + ?Sized>(&self, rng: &mut R, msg: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_digest::<R, Sm3>(rng, msg)
    }

    /// Encrypt `msg` using the specified digest algorithm.
    pub fn encrypt_digest<R, D>(&self, rng: &mut R, msg: &[u8]) -> Result<Vec<u8>>
    where
        R: CryptoRngCore + ?Sized,
        D: Digest,
    {
        self.encrypt_to_cipher::<R, D>(rng, msg)?
            .to_vec(&self.curve, self.mode)
    }

    /// Encrypt `msg`, returning the components without serializing them.
    pub fn encrypt_to_cipher<R, D>(&self, rng: &mut R, msg: &[u8]) -> Result<Cipher<D>>
    where
        R: CryptoRngCore + ?Sized,
        D: Digest,
    {
        encrypt(&self.curve, &self.point, rng, msg)
    }
}

impl AsRef<Point> for EncryptingKey {
    fn as_ref(&self) -> &Point {
        &self.point
    }
}

fn encrypt<R, D>(
    curve: &CurveParams,
    public_point: &Point,
    rng: &mut R,
    msg: &[u8],
) -> Result<Cipher<D>>
where
    R: CryptoRngCore + ?Sized,
    D: Digest,
{
    let klen = message_bits(msg.len())?;
    check_key_length::<D>(klen)?;

    loop {
        // A1: generate a random number k ∈ [1, n − 1]
        let mut k = random_scalar(rng, curve.order())?;

        // A2: C1 = [k]G = (x1, y1)
        let c1 = curve.mul_generator(&k);

        // A4: [k]P_B = (x2, y2)
        let shared_point = curve.mul(public_point, &k);
        k.zeroize();

        let c1 = c1?;
        let (x2, y2) = shared_point?.coordinates().ok_or(Error::InvalidKey)?;
        let shared = SharedSecret::new(curve, &x2, &y2)?;

        // A5: t = KDF(x2 ‖ y2, klen); if t is all zero go back to A1
        let mut t = shared.keystream::<D>(klen)?;
        if is_degenerate_keystream(&t) {
            warn!(klen, "all-zero keystream, resampling ephemeral scalar");
            continue;
        }

        // A6: C2 = M ⊕ t
        let mut c2 = msg.to_vec();
        xor_keystream(&mut c2, &t);
        t.zeroize();

        // A7: C3 = Hash(x2 ‖ M ‖ y2)
        let c3 = shared.tag::<D>(msg);

        debug!(message_len = msg.len(), "encrypted message");
        return Ok(Cipher { c1, c2, c3 });
    }
}
