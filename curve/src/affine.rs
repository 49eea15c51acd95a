// E(GF(p)) : y^2 = x^3 + 7, p = 2^256 - 2^32 - 977
// E generator point: (0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798 :
//                     0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8 : 1)
// Curve prime order: 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
// Curve cofactor: 1

use crate::field::FieldElement;
use crate::{Group, Scalar};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// The 'b' coefficient of the curve. 'a' is zero.
pub(crate) const CURVE_B: FieldElement = FieldElement::from_u64(7);

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affine {
    pub x: FieldElement,
    pub y: FieldElement,
    /// Whether this point is the point at infinity (identity element)
    pub is_infinity: bool,
}

impl Affine {
    /// The point at infinity (identity element)
    pub const INFINITY: Self = Affine {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        is_infinity: true,
    };

    pub const GENERATOR: Self = Affine {
        x: FieldElement::from_limbs_unchecked([
            0x59f2815b16f81798,
            0x029bfcdb2dce28d9,
            0x55a06295ce870b07,
            0x79be667ef9dcbbac,
        ]),
        y: FieldElement::from_limbs_unchecked([
            0x9c47d08ffb10d4b8,
            0xfd17b448a6855419,
            0x5da4fbfc0e1108a8,
            0x483ada7726a3c465,
        ]),
        is_infinity: false,
    };

    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        Affine {
            x,
            y,
            is_infinity: false,
        }
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.is_infinity
    }

    /// Check if a point is on the curve: y^2 = x^3 + 7.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity {
            return true;
        }
        self.y.square() == curve_rhs(self.x)
    }

    pub fn generator() -> Self {
        Self::GENERATOR
    }

    /// Recovers the point with the given x coordinate and y parity.
    pub fn from_x(x: FieldElement, y_is_odd: bool) -> Option<Self> {
        let y = curve_rhs(x).sqrt()?;
        let y = if y.is_odd() == y_is_odd { y } else { -y };
        Some(Affine::new(x, y))
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        if self.is_infinity {
            return *self;
        }

        if self.y.is_zero() {
            return Self::INFINITY;
        }

        // λ = 3x^2 / 2y
        let x2 = self.x.square();
        let numerator = x2 + x2 + x2;
        let lambda = numerator * self.y.double().invert();

        // x_r = λ^2 - 2x
        let x_r = lambda.square() - self.x.double();

        // y_r = λ(x - x_r) - y
        let y_r = lambda * (self.x - x_r) - self.y;

        Affine::new(x_r, y_r)
    }

    pub fn negate(&self) -> Self {
        if self.is_infinity {
            return *self;
        }
        Affine::new(self.x, -self.y)
    }
}

/// x^3 + 7
#[inline]
pub(crate) fn curve_rhs(x: FieldElement) -> FieldElement {
    x.square() * x + CURVE_B
}

impl Group for Affine {
    type Scalar = Scalar;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity
    }

    #[inline]
    fn generator() -> Self {
        Self::GENERATOR
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        if self.is_infinity {
            return other;
        }
        if other.is_infinity {
            return self;
        }

        if self.x == other.x {
            if self.y == other.y {
                return self.double();
            } else {
                return Self::INFINITY;
            }
        }

        // λ = (y2 - y1) / (x2 - x1)
        let lambda = (other.y - self.y) * (other.x - self.x).invert();

        // x_r = λ^2 - x1 - x2
        let x_r = lambda.square() - self.x - other.x;

        // y_r = λ(x1 - x_r) - y1
        let y_r = lambda * (self.x - x_r) - self.y;

        Affine::new(x_r, y_r)
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<&Scalar> for Affine {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        <Self as Group>::mul_binary(&self, scalar)
    }
}
