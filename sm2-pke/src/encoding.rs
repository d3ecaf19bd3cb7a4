//! Canonical byte encodings.
//!
//! Integers and field elements are big endian and fixed width: a field
//! element occupies `L = ⌈bitlength(p) / 8⌉` bytes. Points use the SEC1
//! uncompressed form `0x04 ‖ x ‖ y` of `2L + 1` bytes.
//!
//! [`BitString`] carries the bit strings consumed and produced by the key
//! derivation function.

use crate::{CurveParams, Error, FieldElement, Point, Result, U256};
use alloc::vec::Vec;
use core::fmt;
use elliptic_curve::{bigint::Encoding, sec1::Tag, zeroize::Zeroize};

/// Number of significant bits in `n`; zero for zero.
pub fn uint_bit_len(n: &U256) -> usize {
    let bytes = n.to_be_bytes();
    match bytes.iter().position(|&byte| byte != 0) {
        Some(i) => (bytes.len() - i) * 8 - bytes[i].leading_zeros() as usize,
        None => 0,
    }
}

/// Serialize `n` as exactly `len` big endian bytes.
///
/// Fails with [`Error::ValueTooLarge`] if `n ≥ 256^len`.
pub fn uint_to_bytes(n: &U256, len: usize) -> Result<Vec<u8>> {
    let bytes = n.to_be_bytes();

    if len >= bytes.len() {
        let mut out = alloc::vec![0u8; len - bytes.len()];
        out.extend_from_slice(&bytes);
        return Ok(out);
    }

    let (prefix, value) = bytes.split_at(bytes.len() - len);
    if prefix.iter().any(|&byte| byte != 0) {
        return Err(Error::ValueTooLarge);
    }

    Ok(value.to_vec())
}

/// Parse a big endian integer of any length.
///
/// Fails with [`Error::ValueTooLarge`] if the value does not fit in a
/// [`U256`].
pub fn bytes_to_uint(bytes: &[u8]) -> Result<U256> {
    let mut repr = [0u8; 32];

    if bytes.len() > repr.len() {
        let (prefix, value) = bytes.split_at(bytes.len() - repr.len());
        if prefix.iter().any(|&byte| byte != 0) {
            return Err(Error::ValueTooLarge);
        }
        repr.copy_from_slice(value);
    } else {
        repr[32 - bytes.len()..].copy_from_slice(bytes);
    }

    Ok(U256::from_be_bytes(repr))
}

impl CurveParams {
    /// Serialize a field element as `L` big endian bytes.
    pub fn encode_field_element(&self, element: &FieldElement) -> Result<Vec<u8>> {
        uint_to_bytes(&element.to_uint(), self.field().byte_len())
    }

    /// Parse a big endian field element.
    ///
    /// Fails with [`Error::ValueTooLarge`] unless the value is below `p`.
    pub fn decode_field_element(&self, bytes: &[u8]) -> Result<FieldElement> {
        self.field().element(&bytes_to_uint(bytes)?)
    }

    /// Length of an uncompressed point encoding: `2L + 1`.
    pub fn encoded_point_len(&self) -> usize {
        2 * self.field().byte_len() + 1
    }

    /// Serialize a point in uncompressed form `0x04 ‖ x ‖ y`.
    ///
    /// The identity has no uncompressed form and fails with
    /// [`Error::InvalidPointEncoding`].
    pub fn encode_point(&self, point: &Point) -> Result<Vec<u8>> {
        let (x, y) = point.coordinates().ok_or(Error::InvalidPointEncoding)?;

        let mut out = Vec::with_capacity(self.encoded_point_len());
        out.push(Tag::Uncompressed as u8);
        out.extend(self.encode_field_element(&x)?);
        out.extend(self.encode_field_element(&y)?);
        Ok(out)
    }

    /// Parse an uncompressed point.
    ///
    /// Checks the length and the `0x04` tag and that both coordinates are
    /// below `p`, but **not** that the point lies on the curve: use
    /// [`CurveParams::decode_point_checked`] for untrusted input.
    pub fn decode_point(&self, bytes: &[u8]) -> Result<Point> {
        if bytes.len() % 2 == 0 || bytes.len() != self.encoded_point_len() {
            return Err(Error::InvalidPointEncoding);
        }

        let tag = bytes
            .first()
            .copied()
            .and_then(|byte| Tag::from_u8(byte).ok())
            .ok_or(Error::InvalidPointEncoding)?;

        if tag != Tag::Uncompressed {
            return Err(Error::InvalidPointEncoding);
        }

        let (x, y) = bytes[1..].split_at(self.field().byte_len());
        let coordinate = |bytes: &[u8]| {
            self.decode_field_element(bytes)
                .map_err(|_| Error::InvalidPointEncoding)
        };

        Ok(Point::Affine {
            x: coordinate(x)?,
            y: coordinate(y)?,
        })
    }

    /// Parse an uncompressed point and verify it lies on the curve.
    pub fn decode_point_checked(&self, bytes: &[u8]) -> Result<Point> {
        let point = self.decode_point(bytes)?;

        if !self.is_on_curve(&point) {
            return Err(Error::InvalidPointEncoding);
        }

        Ok(point)
    }
}

/// String of bits, most significant first.
///
/// Bits are packed into bytes from the most significant bit down; the unused
/// low bits of the final byte are always zero.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

impl BitString {
    /// Empty bit string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bit string of exactly `8 × bytes.len()` bits.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is this bit string empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the bit at `index`, counting from the most significant end.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }

        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Iterate over the bits, most significant first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).filter_map(|i| self.bit(i))
    }

    /// Are all bits zero? True for the empty string.
    pub fn is_all_zero(&self) -> bool {
        self.bytes.iter().all(|&byte| byte == 0)
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }

        if bit {
            self.bytes[self.len / 8] |= 0x80 >> (self.len % 8);
        }

        self.len += 1;
    }

    /// Append `8 × bytes.len()` bits.
    pub fn extend_from_bytes(&mut self, bytes: &[u8]) {
        if self.len % 8 == 0 {
            self.bytes.extend_from_slice(bytes);
            self.len += bytes.len() * 8;
            return;
        }

        for &byte in bytes {
            for i in (0..8).rev() {
                self.push((byte >> i) & 1 == 1);
            }
        }
    }

    /// Append another bit string.
    pub fn append(&mut self, other: &BitString) {
        if other.len % 8 == 0 {
            self.extend_from_bytes(&other.bytes);
        } else {
            other.iter().for_each(|bit| self.push(bit));
        }
    }

    /// Keep only the first `len` bits. No-op if `len ≥ self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        self.bytes.truncate(len.div_ceil(8));
        if len % 8 != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= 0xff << (8 - len % 8);
            }
        }
        self.len = len;
    }

    /// Pack into bytes, zero-padding on the left to a multiple of 8 bits.
    ///
    /// Equivalent to reading the bits as a big endian integer of
    /// `⌈len / 8⌉` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let shift = (8 - self.len % 8) % 8;
        if shift == 0 {
            return self.bytes.clone();
        }

        let mut out = Vec::with_capacity(self.bytes.len());
        let mut carry = 0u8;
        for &byte in &self.bytes {
            out.push(carry | (byte >> shift));
            carry = byte << (8 - shift);
        }
        out
    }

    /// The packed bytes, if the length is a multiple of 8.
    pub fn as_aligned_bytes(&self) -> Option<&[u8]> {
        (self.len % 8 == 0).then_some(self.bytes.as_slice())
    }
}

impl fmt::Binary for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter()
            .try_for_each(|bit| f.write_str(if bit { "1" } else { "0" }))
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitString")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl Zeroize for BitString {
    fn zeroize(&mut self) {
        self.bytes.as_mut_slice().zeroize();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{BitString, bytes_to_uint, uint_bit_len, uint_to_bytes};
    use crate::{CurveParams, Error, Point, U256};
    use alloc::{format, vec, vec::Vec};
    use hex_literal::hex;

    const P_HEX: &str = "8542D69E4C044F18E8B92435BF6FF7DE457283915C45517D722EDB8B08F1DFC3";

    #[test]
    fn bit_len() {
        assert_eq!(uint_bit_len(&U256::ZERO), 0);
        assert_eq!(uint_bit_len(&U256::ONE), 1);
        assert_eq!(uint_bit_len(&U256::from_u16(0x100)), 9);
        assert_eq!(uint_bit_len(&U256::MAX), 256);
        assert_eq!(uint_bit_len(&U256::from_be_hex(P_HEX)), 256);
    }

    #[test]
    fn uint_fixed_width() {
        let n = U256::from_u32(0x0102_0304);
        assert_eq!(uint_to_bytes(&n, 4).unwrap(), hex!("01020304"));
        assert_eq!(uint_to_bytes(&n, 6).unwrap(), hex!("000001020304"));
        assert_eq!(uint_to_bytes(&n, 3), Err(Error::ValueTooLarge));
        assert_eq!(uint_to_bytes(&U256::ZERO, 0).unwrap(), Vec::<u8>::new());
        assert_eq!(uint_to_bytes(&n, 40).unwrap().len(), 40);
    }

    #[test]
    fn uint_parse() {
        assert_eq!(bytes_to_uint(&hex!("01020304")).unwrap(), U256::from_u32(0x0102_0304));
        assert_eq!(bytes_to_uint(&[]).unwrap(), U256::ZERO);
        assert_eq!(bytes_to_uint(&[0u8; 40]).unwrap(), U256::ZERO);

        let mut wide = [0u8; 33];
        wide[0] = 1;
        assert_eq!(bytes_to_uint(&wide), Err(Error::ValueTooLarge));
    }

    #[test]
    fn field_element_width() {
        let curve = CurveParams::example_fp256();
        let one = curve.field().one();
        let bytes = curve.encode_field_element(&one).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[31], 1);
        assert_eq!(curve.decode_field_element(&bytes).unwrap(), one);
        assert_eq!(
            curve.decode_field_element(&hex!(
                "8542D69E4C044F18E8B92435BF6FF7DE457283915C45517D722EDB8B08F1DFC3"
            )),
            Err(Error::ValueTooLarge)
        );
    }

    #[test]
    fn point_encoding() {
        let curve = CurveParams::example_fp256();
        let g = *curve.generator();
        let bytes = curve.encode_point(&g).unwrap();
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], 0x04);
        assert_eq!(
            &bytes[1..33],
            hex!("421DEBD61B62EAB6746434EBC3CC315E32220B3BADD50BDC4C4E6C147FEDD43D")
        );
        assert_eq!(curve.decode_point(&bytes).unwrap(), g);
        assert_eq!(curve.decode_point_checked(&bytes).unwrap(), g);
    }

    #[test]
    fn point_encoding_errors() {
        let curve = CurveParams::example_fp256();
        let bytes = curve.encode_point(curve.generator()).unwrap();

        assert_eq!(curve.encode_point(&Point::Identity), Err(Error::InvalidPointEncoding));
        assert_eq!(curve.decode_point(&[]), Err(Error::InvalidPointEncoding));
        assert_eq!(curve.decode_point(&bytes[..64]), Err(Error::InvalidPointEncoding));
        assert_eq!(curve.decode_point(&bytes[..63]), Err(Error::InvalidPointEncoding));

        let mut compressed = bytes.clone();
        compressed[0] = 0x02;
        assert_eq!(curve.decode_point(&compressed), Err(Error::InvalidPointEncoding));

        let mut bad_tag = bytes.clone();
        bad_tag[0] = 0x05;
        assert_eq!(curve.decode_point(&bad_tag), Err(Error::InvalidPointEncoding));

        let mut oversized = bytes.clone();
        oversized[1..33].fill(0xff);
        assert_eq!(curve.decode_point(&oversized), Err(Error::InvalidPointEncoding));
    }

    #[test]
    fn decode_does_not_check_curve_membership() {
        let curve = CurveParams::example_fp256();
        let mut bytes = curve.encode_point(curve.generator()).unwrap();
        bytes[64] ^= 1;

        let point = curve.decode_point(&bytes).unwrap();
        assert!(!curve.is_on_curve(&point));
        assert_eq!(curve.decode_point_checked(&bytes), Err(Error::InvalidPointEncoding));
    }

    #[test]
    fn bits_from_bytes() {
        let bits = BitString::from_bytes(&[0b1010_0000, 0x01]);
        assert_eq!(bits.len(), 16);
        assert_eq!(bits.bit(0), Some(true));
        assert_eq!(bits.bit(1), Some(false));
        assert_eq!(bits.bit(15), Some(true));
        assert_eq!(bits.bit(16), None);
        assert_eq!(bits.to_bytes(), vec![0b1010_0000, 0x01]);
        assert_eq!(bits.as_aligned_bytes(), Some(&[0b1010_0000, 0x01][..]));
    }

    #[test]
    fn bits_to_bytes_pads_left() {
        let mut bits = BitString::new();
        for bit in [true, false, true] {
            bits.push(bit);
        }
        assert_eq!(format!("{bits:b}"), "101");
        assert_eq!(bits.to_bytes(), vec![0b101]);
        assert_eq!(bits.as_aligned_bytes(), None);

        // 1 ‖ 0xff = 0b1_1111_1111, left padded to 16 bits
        let mut bits = BitString::new();
        bits.push(true);
        bits.extend_from_bytes(&[0xff]);
        assert_eq!(bits.len(), 9);
        assert_eq!(bits.to_bytes(), vec![0x01, 0xff]);
    }

    #[test]
    fn truncate_and_append() {
        let mut bits = BitString::from_bytes(&[0xff, 0xff]);
        bits.truncate(12);
        assert_eq!(bits.len(), 12);
        assert_eq!(bits.to_bytes(), vec![0x0f, 0xff]);
        bits.truncate(20);
        assert_eq!(bits.len(), 12);

        let mut head = BitString::from_bytes(&[0xab]);
        head.append(&bits);
        assert_eq!(head.len(), 20);
        assert_eq!(format!("{head:b}"), "10101011111111111111");

        let mut tail = BitString::new();
        tail.append(&BitString::from_bytes(&[0x12, 0x34]));
        assert_eq!(tail.as_aligned_bytes(), Some(&hex!("1234")[..]));
    }

    #[test]
    fn all_zero() {
        assert!(BitString::new().is_all_zero());
        assert!(BitString::from_bytes(&[0, 0]).is_all_zero());
        assert!(!BitString::from_bytes(&[0, 1]).is_all_zero());

        let mut bits = BitString::from_bytes(&[0x00, 0x01]);
        bits.truncate(15);
        assert!(bits.is_all_zero());
    }
}
