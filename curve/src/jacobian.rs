use crate::affine::{Affine, CURVE_B};
use crate::field::FieldElement;
use crate::generator_table::mul_generator_jacobian;
use crate::{Group, Scalar};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Point on the curve in Jacobian coordinates.
/// (X:Y:Z) represents the affine point (X/Z^2, Y/Z^3); any point with Z = 0
/// is the point at infinity.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Jacobian {
    pub x: FieldElement,
    pub y: FieldElement,
    pub z: FieldElement,
}

impl Jacobian {
    /// The point at infinity (identity element): (1:1:0)
    pub const INFINITY: Self = Jacobian {
        x: FieldElement::ONE,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    pub fn new(x: FieldElement, y: FieldElement, z: FieldElement) -> Self {
        Jacobian { x, y, z }
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn from_affine(point: &Affine) -> Self {
        if point.is_infinity() {
            return Self::INFINITY;
        }

        Jacobian::new(point.x, point.y, FieldElement::ONE)
    }

    /// Convert to affine coordinates with one field inversion.
    pub fn to_affine(&self) -> Affine {
        if self.is_infinity() {
            return Affine::INFINITY;
        }

        let z_inv = self.z.invert();
        let z_inv2 = z_inv.square();
        Affine::new(self.x * z_inv2, self.y * z_inv2 * z_inv)
    }

    /// Batch normalization: convert many points to affine with a single
    /// inversion shared across the whole slice.
    pub fn batch_normalize(points: &[Self]) -> Vec<Affine> {
        let mut z_invs: Vec<FieldElement> = points.iter().map(|p| p.z).collect();
        FieldElement::batch_invert(&mut z_invs);

        points
            .iter()
            .zip(z_invs.iter())
            .map(|(p, z_inv)| {
                if p.is_infinity() {
                    return Affine::INFINITY;
                }
                let z_inv2 = z_inv.square();
                Affine::new(p.x * z_inv2, p.y * z_inv2 * *z_inv)
            })
            .collect()
    }

    /// Check Y^2 = X^3 + 7*Z^6.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity() {
            return true;
        }

        let z2 = self.z.square();
        let z6 = z2.square() * z2;
        self.y.square() == self.x.square() * self.x + CURVE_B * z6
    }

    /// The same point with coordinates (λ^2 X : λ^3 Y : λ Z).
    pub fn scale(&self, lambda: &FieldElement) -> Self {
        let l2 = lambda.square();
        Jacobian::new(self.x * l2, self.y * l2 * *lambda, self.z * *lambda)
    }

    pub fn generator() -> Self {
        Self::from_affine(&Affine::GENERATOR)
    }

    /// Point doubling for a = 0 (dbl-2009-l).
    pub fn double(&self) -> Self {
        if self.is_infinity() {
            return *self;
        }

        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + b).square() - a - c).double();
        let e = a.double() + a;
        let f = e.square();

        let x3 = f - d.double();
        let y3 = e * (d - x3) - c.double().double().double();
        let z3 = (self.y * self.z).double();

        Jacobian::new(x3, y3, z3)
    }

    /// General addition. Equal inputs are routed to [`Jacobian::double`] and
    /// opposite inputs give the point at infinity.
    pub fn add_point(&self, other: &Self) -> Self {
        if self.is_infinity() {
            return *other;
        }
        if other.is_infinity() {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;

        let h = u2 - u1;
        let r = s2 - s1;
        if h.is_zero() {
            return if r.is_zero() {
                self.double()
            } else {
                Self::INFINITY
            };
        }

        let hh = h.square();
        let hhh = h * hh;
        let v = u1 * hh;

        let x3 = r.square() - hhh - v.double();
        let y3 = r * (v - x3) - s1 * hhh;
        let z3 = self.z * other.z * h;

        Jacobian::new(x3, y3, z3)
    }

    /// Mixed addition with an affine point (Z2 = 1).
    pub fn add_mixed(&self, other: &Affine) -> Self {
        if other.is_infinity() {
            return *self;
        }
        if self.is_infinity() {
            return Self::from_affine(other);
        }

        let z1z1 = self.z.square();
        let u2 = other.x * z1z1;
        let s2 = other.y * self.z * z1z1;

        let h = u2 - self.x;
        let r = s2 - self.y;
        if h.is_zero() {
            return if r.is_zero() {
                self.double()
            } else {
                Self::INFINITY
            };
        }

        let hh = h.square();
        let hhh = h * hh;
        let v = self.x * hh;

        let x3 = r.square() - hhh - v.double();
        let y3 = r * (v - x3) - self.y * hhh;
        let z3 = self.z * h;

        Jacobian::new(x3, y3, z3)
    }

    pub fn negate(&self) -> Self {
        if self.is_infinity() {
            return *self;
        }
        Jacobian::new(self.x, -self.y, self.z)
    }

    /// Multiply the fixed generator using a precomputed table.
    pub fn mul_generator(scalar: &Scalar) -> Self {
        mul_generator_jacobian(scalar)
    }
}

impl PartialEq for Jacobian {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_infinity(), other.is_infinity()) {
            (true, true) => return true,
            (true, false) | (false, true) => return false,
            (false, false) => {}
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        self.x * z2z2 == other.x * z1z1
            && self.y * z2z2 * other.z == other.y * z1z1 * self.z
    }
}

impl Eq for Jacobian {}

impl Group for Jacobian {
    type Scalar = Scalar;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    #[inline]
    fn generator() -> Self {
        Jacobian::generator()
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

impl Add for Jacobian {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.add_point(&other)
    }
}

impl AddAssign for Jacobian {
    fn add_assign(&mut self, other: Self) {
        *self = self.add_point(&other);
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Jacobian {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.add_point(&other.negate())
    }
}

impl SubAssign for Jacobian {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Jacobian {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<&Scalar> for Jacobian {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        <Self as Group>::mul_windowed(&self, scalar)
    }
}

impl From<Affine> for Jacobian {
    fn from(point: Affine) -> Self {
        Jacobian::from_affine(&point)
    }
}

impl From<&Affine> for Jacobian {
    fn from(point: &Affine) -> Self {
        Jacobian::from_affine(point)
    }
}

impl From<Jacobian> for Affine {
    fn from(point: Jacobian) -> Self {
        point.to_affine()
    }
}

impl From<&Jacobian> for Affine {
    fn from(point: &Jacobian) -> Self {
        point.to_affine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, RandomField};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn random_point(rng: &mut StdRng) -> Jacobian {
        let k = Scalar::random(rng);
        let lambda = FieldElement::random(rng);
        (Jacobian::generator() * &k).scale(&lambda)
    }

    #[test]
    fn test_infinity() {
        let inf = Jacobian::INFINITY;
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve());
        assert_eq!(inf.double(), inf);
        assert_eq!(inf.to_affine(), Affine::INFINITY);
        // Any Z = 0 triple is the identity.
        let other = Jacobian::new(FieldElement::from_u64(9), FieldElement::from_u64(4), FieldElement::ZERO);
        assert_eq!(other, inf);
    }

    #[test]
    fn test_conversion_affine_jacobian() {
        let affine = Affine::generator();
        let jacobian = Jacobian::from_affine(&affine);
        assert_eq!(jacobian.to_affine(), affine);

        let scaled = jacobian.scale(&FieldElement::from_u64(12345));
        assert_eq!(scaled.to_affine(), affine);
        assert_eq!(scaled, jacobian);
    }

    #[test]
    fn test_double_matches_affine() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..8 {
            let p = random_point(&mut rng);
            let doubled = p.double();
            assert!(doubled.is_on_curve(), "Doubled point is not on the curve");
            assert_eq!(doubled.to_affine(), p.to_affine().double());
        }
    }

    #[test]
    fn test_add_matches_affine() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..8 {
            let p = random_point(&mut rng);
            let q = random_point(&mut rng);
            let sum = p + q;
            assert!(sum.is_on_curve(), "Sum is not on the curve");
            assert_eq!(sum.to_affine(), p.to_affine() + q.to_affine());
        }
    }

    #[test]
    fn test_add_same_point_doubles() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = random_point(&mut rng);
        let same = p.scale(&FieldElement::from_u64(77));

        assert_eq!((p + p).to_affine(), p.double().to_affine());
        assert_eq!((p + same).to_affine(), p.double().to_affine());
        assert_eq!(p.add_mixed(&p.to_affine()), p.double());
    }

    #[test]
    fn test_add_with_infinity() {
        let g = Jacobian::generator();
        let inf = Jacobian::INFINITY;

        assert_eq!(g + inf, g);
        assert_eq!(inf + g, g);
        assert_eq!(inf + inf, inf);
        assert_eq!(g.add_mixed(&Affine::INFINITY), g);
        assert_eq!(inf.add_mixed(&Affine::GENERATOR), g);
    }

    #[test]
    fn test_negation() {
        let mut rng = StdRng::seed_from_u64(4);
        let p = random_point(&mut rng);
        let neg = -p;

        assert!(neg.is_on_curve());
        assert_eq!(p + neg, Jacobian::INFINITY);
        assert_eq!(p.add_mixed(&neg.to_affine()), Jacobian::INFINITY);
        assert_eq!(p - p, Jacobian::INFINITY);
    }

    #[test]
    fn test_mixed_matches_general() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..8 {
            let p = random_point(&mut rng);
            let q = random_point(&mut rng);
            assert_eq!(p.add_mixed(&q.to_affine()), p + q);
        }
    }

    #[test]
    fn test_generator_doubled_by_scalar_two() {
        let g = Jacobian::generator();
        let two = Scalar::from_u64(2);

        assert_eq!(g.mul_binary(&two), g.double());
        assert_eq!(g.mul_windowed(&two), g.double());
        assert_eq!(
            g.double().to_affine().x,
            FieldElement::from_hex("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5")
                .unwrap()
        );
    }

    #[test]
    fn test_scalar_mul_boundaries() {
        let mut rng = StdRng::seed_from_u64(6);
        let p = random_point(&mut rng);

        assert_eq!(p.mul_binary(&Scalar::ZERO), Jacobian::INFINITY);
        assert_eq!(p.mul_windowed(&Scalar::ZERO), Jacobian::INFINITY);
        assert_eq!(p.mul_binary(&Scalar::ONE), p);
        assert_eq!(p.mul_windowed(&Scalar::ONE), p);
        assert_eq!(Jacobian::INFINITY.mul_binary(&Scalar::MAX), Jacobian::INFINITY);
    }

    #[test]
    fn test_windowed_matches_binary() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = random_point(&mut rng);
        let scalars = [
            Scalar::ZERO,
            Scalar::ONE,
            Scalar::from_u64(2),
            Scalar::from_u64(15),
            Scalar::from_u64(16),
            Scalar::from_limbs([0, 0, 0, 1 << 63]),
            Scalar::MAX,
            Scalar::GROUP_ORDER,
            Scalar::random(&mut rng),
            Scalar::random(&mut rng),
        ];

        for k in scalars.iter() {
            let binary = p.mul_binary(k);
            let windowed = p.mul_windowed(k);
            assert_eq!(binary, windowed, "mismatch for {}", k);
            assert_eq!(binary.to_affine(), windowed.to_affine());
            assert!(binary.is_on_curve());
        }
    }

    #[test]
    fn test_group_order_annihilates() {
        let g = Jacobian::generator();
        assert_eq!(g.mul_binary(&Scalar::GROUP_ORDER), Jacobian::INFINITY);
        assert_eq!(g.mul_windowed(&Scalar::GROUP_ORDER), Jacobian::INFINITY);

        // 2^256 - 1 = (2^256 - 1 - n) mod n
        let reduced = Scalar::MAX.wrapping_sub(&Scalar::GROUP_ORDER);
        assert_eq!(g.mul_binary(&Scalar::MAX), g.mul_binary(&reduced));
    }

    #[test]
    fn test_leading_zero_bits_are_irrelevant() {
        let g = Jacobian::generator();
        let k = Scalar::from_u64(0xdead_beef);
        let from_bytes = Scalar::from_be_slice(&[0xde, 0xad, 0xbe, 0xef]).unwrap();

        assert_eq!(g.mul_binary(&k), g.mul_binary(&from_bytes));
        assert_eq!(g.mul_binary(&k), g.mul_u64(0xdead_beef));
    }

    #[test]
    fn test_linearity() {
        let g = Jacobian::generator();
        let a = Scalar::from_u64(3);
        let b = Scalar::from_u64(5);

        // (a + b) * G = a*G + b*G
        let left = g * &Scalar::from_u64(8);
        let right = (g * &a) + (g * &b);
        assert_eq!(left, right);
    }

    #[test]
    fn test_batch_normalize() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut points: Vec<Jacobian> = (0..6).map(|_| random_point(&mut rng)).collect();
        points.insert(2, Jacobian::INFINITY);
        points.push(Jacobian::INFINITY);

        let affine_points = Jacobian::batch_normalize(&points);

        assert_eq!(affine_points.len(), points.len());
        for (proj, aff) in points.iter().zip(affine_points.iter()) {
            assert_eq!(proj.to_affine(), *aff);
        }
        assert!(Jacobian::batch_normalize(&[]).is_empty());
    }

    #[test]
    fn test_mul_generator() {
        let mut rng = StdRng::seed_from_u64(9);
        let g = Jacobian::generator();
        for k in [Scalar::ZERO, Scalar::ONE, Scalar::MAX, Scalar::random(&mut rng)] {
            assert_eq!(Jacobian::mul_generator(&k), g.mul_binary(&k));
        }
    }
}
