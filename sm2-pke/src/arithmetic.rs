//! Field and point arithmetic on a short Weierstrass curve
//! `y² = x³ + ax + b` over a prime field `𝔽p`.
//!
//! Domain parameters are runtime values held by [`CurveParams`]; see
//! [`crate::params`] for the built-in curves.

pub(crate) mod field;
mod point;

pub use self::{
    field::{Field, FieldElement},
    point::Point,
};

use crate::{Error, Result, U256};

/// Elliptic curve domain parameters `(p, a, b, h, G, n)`.
///
/// Immutable once constructed; share freely between concurrent operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CurveParams {
    field: Field,
    a: FieldElement,
    b: FieldElement,
    cofactor: U256,
    generator: Point,
    order: U256,
}

impl CurveParams {
    /// Create curve parameters from their integer representation.
    ///
    /// Checks that the modulus is odd and greater than 3, that the
    /// coefficients and base point coordinates are field elements, that the
    /// curve is non-singular, that `G` lies on it, that `n > 1` and that
    /// `h ≠ 0`. Primality of `p` and `n` is assumed, not verified.
    pub fn new(
        p: U256,
        a: U256,
        b: U256,
        cofactor: U256,
        generator: (U256, U256),
        order: U256,
    ) -> Result<Self> {
        let field = Field::new(p)?;
        let element = |n: &U256| {
            field
                .element(n)
                .map_err(|_| Error::InvalidCurveParameters)
        };

        let a = element(&a)?;
        let b = element(&b)?;

        // 4a³ + 27b² ≠ 0
        let discriminant = field.from_u64(4) * a.square() * a + field.from_u64(27) * b.square();
        if discriminant.is_zero() {
            return Err(Error::InvalidCurveParameters);
        }

        if order <= U256::ONE || cofactor == U256::ZERO {
            return Err(Error::InvalidCurveParameters);
        }

        let generator = Point::Affine {
            x: element(&generator.0)?,
            y: element(&generator.1)?,
        };

        let params = Self {
            field,
            a,
            b,
            cofactor,
            generator,
            order,
        };

        if !params.is_on_curve(&generator) {
            return Err(Error::InvalidCurveParameters);
        }

        Ok(params)
    }

    /// Build parameters from big endian hex strings without validation.
    ///
    /// Only for the built-in curves in [`crate::params`], whose constants
    /// are checked by that module's tests.
    pub(crate) fn from_be_hex_unchecked(
        p: &str,
        a: &str,
        b: &str,
        cofactor: u64,
        generator: (&str, &str),
        order: &str,
    ) -> Self {
        let modulus = U256::from_be_hex(p);
        let field = Field::from_modulus_unchecked(modulus);

        Self {
            field,
            a: field.reduce(&U256::from_be_hex(a)),
            b: field.reduce(&U256::from_be_hex(b)),
            cofactor: U256::from_u64(cofactor),
            generator: Point::Affine {
                x: field.reduce(&U256::from_be_hex(generator.0)),
                y: field.reduce(&U256::from_be_hex(generator.1)),
            },
            order: U256::from_be_hex(order),
        }
    }

    /// The base field `𝔽p`.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The field modulus `p`.
    pub fn modulus(&self) -> &U256 {
        self.field.modulus()
    }

    /// Curve coefficient `a`.
    pub fn a(&self) -> FieldElement {
        self.a
    }

    /// Curve coefficient `b`.
    pub fn b(&self) -> FieldElement {
        self.b
    }

    /// Cofactor `h`.
    pub fn cofactor(&self) -> &U256 {
        &self.cofactor
    }

    /// Base point `G`.
    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// Order `n` of the base point.
    pub fn order(&self) -> &U256 {
        &self.order
    }

    /// Bit length of the base point order `n`.
    pub fn order_bit_len(&self) -> usize {
        crate::encoding::uint_bit_len(&self.order)
    }

    /// Build an affine point from integer coordinates.
    ///
    /// Fails with [`Error::ValueTooLarge`] when a coordinate is not below
    /// `p`, and with [`Error::InvalidPointEncoding`] when the point is not on
    /// the curve.
    pub fn point(&self, x: &U256, y: &U256) -> Result<Point> {
        let point = Point::Affine {
            x: self.field.element(x)?,
            y: self.field.element(y)?,
        };

        if !self.is_on_curve(&point) {
            return Err(Error::InvalidPointEncoding);
        }

        Ok(point)
    }
}
