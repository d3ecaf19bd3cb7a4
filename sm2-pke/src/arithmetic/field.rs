//! Arithmetic modulo a runtime prime `p`.
//!
//! Elements are kept in Montgomery form with runtime parameters, so a single
//! implementation serves every curve whose modulus fits in a [`U256`].

use crate::{Error, Result, U256};
use core::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::bigint::{
    Encoding,
    modular::runtime_mod::{DynResidue, DynResidueParams},
};

/// Number of limbs in a [`U256`] on the target platform.
const LIMBS: usize = U256::LIMBS;

/// Prime field `𝔽p` with a modulus chosen at runtime.
#[derive(Clone, Copy)]
pub struct Field {
    modulus: U256,
    params: DynResidueParams<LIMBS>,
}

impl Field {
    /// Create a field from an odd modulus greater than 3.
    ///
    /// Primality is not checked.
    pub fn new(modulus: U256) -> Result<Self> {
        let is_odd = modulus.to_be_bytes().last().is_some_and(|byte| byte & 1 == 1);
        if !is_odd || modulus <= U256::from_u8(3) {
            return Err(Error::InvalidCurveParameters);
        }

        Ok(Self::from_modulus_unchecked(modulus))
    }

    /// Create a field from a modulus known to be odd.
    pub(crate) fn from_modulus_unchecked(modulus: U256) -> Self {
        Self {
            modulus,
            params: DynResidueParams::new(&modulus),
        }
    }

    /// The modulus `p`.
    pub fn modulus(&self) -> &U256 {
        &self.modulus
    }

    /// Bit length of the modulus.
    pub fn bit_len(&self) -> usize {
        crate::encoding::uint_bit_len(&self.modulus)
    }

    /// Length in bytes of a serialized field element: `⌈bitlength(p) / 8⌉`.
    pub fn byte_len(&self) -> usize {
        self.bit_len().div_ceil(8)
    }

    /// Additive identity.
    pub fn zero(&self) -> FieldElement {
        FieldElement(DynResidue::zero(self.params))
    }

    /// Multiplicative identity.
    pub fn one(&self) -> FieldElement {
        FieldElement(DynResidue::one(self.params))
    }

    /// Interpret `n` as an element of this field.
    ///
    /// Returns [`Error::ValueTooLarge`] unless `n < p`.
    pub fn element(&self, n: &U256) -> Result<FieldElement> {
        if n >= &self.modulus {
            return Err(Error::ValueTooLarge);
        }

        Ok(self.reduce(n))
    }

    /// Reduce an arbitrary integer modulo `p`.
    pub fn reduce(&self, n: &U256) -> FieldElement {
        FieldElement(DynResidue::new(n, self.params))
    }

    /// Small constant as a field element.
    pub fn from_u64(&self, n: u64) -> FieldElement {
        self.reduce(&U256::from_u64(n))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("modulus", &self.modulus)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
    }
}

impl Eq for Field {}

/// Element of a [`Field`], always reduced into `[0, p)`.
///
/// Operands of the arithmetic operators must belong to the same field.
#[derive(Clone, Copy)]
pub struct FieldElement(DynResidue<LIMBS>);

impl FieldElement {
    /// Canonical integer representative in `[0, p)`.
    pub fn to_uint(&self) -> U256 {
        self.0.retrieve()
    }

    /// Is this element zero?
    pub fn is_zero(&self) -> bool {
        self.to_uint() == U256::ZERO
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Returns `self * self`.
    pub fn square(&self) -> Self {
        Self(self.0.square())
    }

    /// Returns the multiplicative inverse of `self`.
    ///
    /// Fails with [`Error::NoInverse`] when `gcd(self, p) ≠ 1`, which for a
    /// prime modulus means `self = 0`.
    pub fn invert(&self) -> Result<Self> {
        let (inverse, _) = self.0.invert();

        // an inverse exists iff x·x⁻¹ = 1
        if (self.0 * inverse).retrieve() != U256::ONE {
            return Err(Error::NoInverse);
        }

        Ok(Self(inverse))
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldElement").field(&self.to_uint()).finish()
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.to_uint() == other.to_uint()
    }
}

impl Eq for FieldElement {}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for FieldElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
