//! Affine point arithmetic.
//!
//! Chord-and-tangent formulas in affine coordinates; every slope needs a
//! field inversion, whose failure surfaces as [`Error::NoInverse`].

use super::{CurveParams, FieldElement};
use crate::{Result, U256};
use elliptic_curve::bigint::Encoding;

#[cfg(doc)]
use crate::Error;

/// Point on the curve: the identity (point at infinity) or an affine
/// coordinate pair.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Point {
    /// Additive identity of the group a.k.a. the point at infinity.
    #[default]
    Identity,

    /// Affine point `(x, y)`.
    Affine {
        /// x-coordinate
        x: FieldElement,

        /// y-coordinate
        y: FieldElement,
    },
}

impl Point {
    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Identity)
    }

    /// Affine coordinates, or `None` for the identity.
    pub fn coordinates(&self) -> Option<(FieldElement, FieldElement)> {
        match self {
            Point::Identity => None,
            Point::Affine { x, y } => Some((*x, *y)),
        }
    }

    /// Affine x-coordinate, or `None` for the identity.
    pub fn x(&self) -> Option<FieldElement> {
        self.coordinates().map(|(x, _)| x)
    }

    /// Affine y-coordinate, or `None` for the identity.
    pub fn y(&self) -> Option<FieldElement> {
        self.coordinates().map(|(_, y)| y)
    }
}

impl CurveParams {
    /// Does `point` satisfy `y² = x³ + ax + b`? The identity always does.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Identity => true,
            Point::Affine { x, y } => y.square() == x.square() * *x + self.a * *x + self.b,
        }
    }

    /// Returns `-point`.
    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::Affine { x: *x, y: -*y },
        }
    }

    /// Returns `lhs + rhs`.
    pub fn add(&self, lhs: &Point, rhs: &Point) -> Result<Point> {
        let (x1, y1) = match lhs {
            Point::Identity => return Ok(*rhs),
            Point::Affine { x, y } => (*x, *y),
        };
        let (x2, y2) = match rhs {
            Point::Identity => return Ok(*lhs),
            Point::Affine { x, y } => (*x, *y),
        };

        if x1 == x2 {
            return if y1 == y2 {
                self.double(lhs)
            } else {
                Ok(Point::Identity)
            };
        }

        // λ = (y2 − y1) / (x2 − x1)
        let lambda = (y2 - y1) * (x2 - x1).invert()?;
        let x3 = lambda.square() - x1 - x2;
        let y3 = lambda * (x1 - x3) - y1;
        Ok(Point::Affine { x: x3, y: y3 })
    }

    /// Returns `point + point`.
    ///
    /// A point with `y = 0` has no tangent slope and fails with
    /// [`Error::NoInverse`]; prime-order curves have no such points.
    pub fn double(&self, point: &Point) -> Result<Point> {
        let (x1, y1) = match point {
            Point::Identity => return Ok(Point::Identity),
            Point::Affine { x, y } => (*x, *y),
        };

        // λ = (3x1² + a) / 2y1
        let lambda = (self.field.from_u64(3) * x1.square() + self.a) * y1.double().invert()?;
        let x3 = lambda.square() - x1.double();
        let y3 = lambda * (x1 - x3) - y1;
        Ok(Point::Affine { x: x3, y: y3 })
    }

    /// Returns `[k]point` using double-and-add, most significant bit first.
    ///
    /// `k` is used as given: reducing it modulo `n` is up to the caller.
    pub fn mul(&self, point: &Point, k: &U256) -> Result<Point> {
        let mut acc = Point::Identity;

        for &byte in k.to_be_bytes().iter().skip_while(|&&byte| byte == 0) {
            for i in (0..8).rev() {
                acc = self.double(&acc)?;
                if (byte >> i) & 1 == 1 {
                    acc = self.add(point, &acc)?;
                }
            }
        }

        Ok(acc)
    }

    /// Returns `[k]G`.
    pub fn mul_generator(&self, k: &U256) -> Result<Point> {
        self.mul(&self.generator, k)
    }
}
