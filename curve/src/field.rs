//! Base field of secp256k1. p = 2^256 - 2^32 - 977
//!
//! Elements are stored as [u64; 4] in little-endian limb order and are kept
//! fully reduced: every operation returns the canonical representative in
//! [0, p). Multiplication reduces the 512-bit product with the identity
//! 2^256 = 2^32 + 977 (mod p) instead of a generic division.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt::{self, Debug, Display, Formatter};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Element of the secp256k1 base field.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FieldElement {
    limbs: [u64; 4],
}

// Field modulus: p = 0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f
const MODULUS: [u64; 4] = [
    0xfffffffefffffc2f,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
];

// 2^256 mod p
const REDUCTION: u64 = 0x1000003d1;

// p - 2, exponent for Fermat inversion
const P_MINUS_2: [u64; 4] = [
    0xfffffffefffffc2d,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
];

// (p + 1) / 4, exponent for square roots (p = 3 mod 4)
const P_PLUS_1_DIV_4: [u64; 4] = [
    0xffffffffbfffff0c,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x3fffffffffffffff,
];

impl FieldElement {
    pub const ZERO: Self = FieldElement {
        limbs: [0, 0, 0, 0],
    };

    pub const ONE: Self = FieldElement {
        limbs: [1, 0, 0, 0],
    };

    /// Builds an element from limbs the caller guarantees are below p.
    #[inline]
    pub(crate) const fn from_limbs_unchecked(limbs: [u64; 4]) -> Self {
        FieldElement { limbs }
    }

    #[inline]
    pub const fn from_u64(val: u64) -> Self {
        FieldElement {
            limbs: [val, 0, 0, 0],
        }
    }

    /// Returns `None` unless `limbs` encodes a value below p.
    #[inline]
    pub const fn from_limbs(limbs: [u64; 4]) -> Option<Self> {
        if is_canonical(limbs) {
            Some(FieldElement { limbs })
        } else {
            None
        }
    }

    /// Reduces an arbitrary 256-bit value modulo p.
    #[inline]
    pub const fn from_limbs_reduced(limbs: [u64; 4]) -> Self {
        // 2^256 < 2p, so one subtraction is enough.
        if is_canonical(limbs) {
            FieldElement { limbs }
        } else {
            FieldElement {
                limbs: sub_limbs(limbs, MODULUS).0,
            }
        }
    }

    /// Decodes a big-endian 32-byte value, rejecting anything >= p.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Self::from_limbs(limbs_from_be_bytes(bytes))
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        be_bytes_from_limbs(&self.limbs)
    }

    /// Parses exactly 64 hex digits (big-endian).
    pub fn from_hex(s: &str) -> Option<Self> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).ok()?;
        Self::from_be_bytes(&bytes)
    }

    #[inline]
    pub const fn limbs(&self) -> [u64; 4] {
        self.limbs
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_be_bytes())
    }

    /// The field modulus p.
    pub fn modulus() -> BigUint {
        BigUint::from_bytes_be(&be_bytes_from_limbs(&MODULUS))
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.limbs[0] == 0 && self.limbs[1] == 0 && self.limbs[2] == 0 && self.limbs[3] == 0
    }

    #[inline]
    pub const fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    #[inline]
    pub const fn double(&self) -> Self {
        FieldElement {
            limbs: add_mod(self.limbs, self.limbs),
        }
    }

    #[inline]
    pub fn square(&self) -> Self {
        FieldElement {
            limbs: reduce_wide(square_wide(&self.limbs)),
        }
    }

    /// Square-and-multiply, most significant exponent bit first.
    pub fn pow(&self, exp: &[u64; 4]) -> Self {
        let mut result = Self::ONE;
        for &limb in exp.iter().rev() {
            for bit in (0..64).rev() {
                result = result.square();
                if (limb >> bit) & 1 == 1 {
                    result *= *self;
                }
            }
        }
        result
    }

    /// Multiplicative inverse by Fermat's little theorem. Zero maps to zero.
    #[inline]
    pub fn invert(&self) -> Self {
        self.pow(&P_MINUS_2)
    }

    pub fn try_invert(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(self.invert())
        }
    }

    /// Square root, if one exists.
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow(&P_PLUS_1_DIV_4);
        if root.square() == *self {
            Some(root)
        } else {
            None
        }
    }

    /// Inverts every element in place with a single field inversion.
    /// Zero entries are left as zero.
    pub fn batch_invert(elements: &mut [Self]) {
        let mut prefix = Vec::with_capacity(elements.len());
        let mut acc = Self::ONE;
        for element in elements.iter() {
            prefix.push(acc);
            if !element.is_zero() {
                acc *= *element;
            }
        }

        let mut inv = acc.invert();
        for (element, before) in elements.iter_mut().zip(prefix.iter()).rev() {
            if element.is_zero() {
                continue;
            }
            let original = *element;
            *element = inv * *before;
            inv *= original;
        }
    }
}

pub(crate) fn limbs_from_be_bytes(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let start = 32 - (i + 1) * 8;
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&bytes[start..start + 8]);
        *limb = u64::from_be_bytes(chunk);
    }
    limbs
}

pub(crate) fn be_bytes_from_limbs(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        let start = 32 - (i + 1) * 8;
        bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

/// Add two reduced values mod p.
#[inline]
const fn add_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    let (sum, carry) = add_limbs(a, b);
    // With a carry the true sum is 2^256 + sum; wrapping off p yields sum + 2^256 - p.
    if carry || !is_canonical(sum) {
        sub_limbs(sum, MODULUS).0
    } else {
        sum
    }
}

/// Subtract two reduced values mod p.
#[inline]
const fn sub_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    let (diff, borrow) = sub_limbs(a, b);
    if borrow {
        add_limbs(diff, MODULUS).0
    } else {
        diff
    }
}

#[inline]
const fn neg_mod(a: [u64; 4]) -> [u64; 4] {
    if a[0] == 0 && a[1] == 0 && a[2] == 0 && a[3] == 0 {
        return [0, 0, 0, 0];
    }
    sub_limbs(MODULUS, a).0
}

#[inline]
fn mul_mod(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    reduce_wide(mul_wide(a, b))
}

#[inline]
const fn is_canonical(limbs: [u64; 4]) -> bool {
    sub_limbs(limbs, MODULUS).1
}

#[inline]
const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

#[inline]
const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

#[inline]
const fn add_limbs(a: [u64; 4], b: [u64; 4]) -> ([u64; 4], bool) {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);
    ([r0, r1, r2, r3], carry)
}

#[inline]
const fn sub_limbs(a: [u64; 4], b: [u64; 4]) -> ([u64; 4], bool) {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

/// Schoolbook 256x256 -> 512-bit product.
#[inline]
fn mul_wide(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut t = [0u64; 8];
    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }
    t
}

/// 512-bit square: off-diagonal products once, doubled, plus the diagonal.
#[inline]
fn square_wide(a: &[u64; 4]) -> [u64; 8] {
    let mut t = [0u64; 8];
    for i in 0..4 {
        let mut carry = 0u128;
        for j in (i + 1)..4 {
            let product = (a[i] as u128) * (a[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }

    for i in (1..8).rev() {
        t[i] = (t[i] << 1) | (t[i - 1] >> 63);
    }
    t[0] <<= 1;

    let mut carry = 0u128;
    for i in 0..4 {
        let sq = (a[i] as u128) * (a[i] as u128);
        let lo = (t[2 * i] as u128) + (sq as u64 as u128) + carry;
        t[2 * i] = lo as u64;
        let hi = (t[2 * i + 1] as u128) + (sq >> 64) + (lo >> 64);
        t[2 * i + 1] = hi as u64;
        carry = hi >> 64;
    }
    t
}

/// Reduces a 512-bit value modulo p using 2^256 = 0x1000003d1 (mod p).
#[inline]
fn reduce_wide(t: [u64; 8]) -> [u64; 4] {
    let mut r = [0u64; 4];
    let mut carry = 0u128;
    for i in 0..4 {
        let v = (t[i] as u128) + (t[i + 4] as u128) * (REDUCTION as u128) + carry;
        r[i] = v as u64;
        carry = v >> 64;
    }

    // carry < 2^34; fold it once more.
    let v = (r[0] as u128) + carry * (REDUCTION as u128);
    r[0] = v as u64;
    let mut carry = v >> 64;
    for limb in r.iter_mut().skip(1) {
        let v = (*limb as u128) + carry;
        *limb = v as u64;
        carry = v >> 64;
    }

    // A final wrap leaves r below 2^68, so adding 2^256 mod p cannot overflow.
    if carry != 0 {
        let (sum, _) = add_limbs(r, [REDUCTION, 0, 0, 0]);
        r = sum;
    }

    if is_canonical(r) {
        r
    } else {
        sub_limbs(r, MODULUS).0
    }
}

impl Distribution<FieldElement> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FieldElement {
        loop {
            let bytes: [u8; 32] = rng.random();
            if let Some(element) = FieldElement::from_be_bytes(&bytes) {
                return element;
            }
        }
    }
}

impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        FieldElement {
            limbs: add_mod(self.limbs, rhs.limbs),
        }
    }
}

impl AddAssign for FieldElement {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.limbs = add_mod(self.limbs, rhs.limbs);
    }
}

impl Sub for FieldElement {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        FieldElement {
            limbs: sub_mod(self.limbs, rhs.limbs),
        }
    }
}

impl SubAssign for FieldElement {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.limbs = sub_mod(self.limbs, rhs.limbs);
    }
}

impl Neg for FieldElement {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        FieldElement {
            limbs: neg_mod(self.limbs),
        }
    }
}

impl Mul for FieldElement {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        FieldElement {
            limbs: mul_mod(&self.limbs, &rhs.limbs),
        }
    }
}

impl MulAssign for FieldElement {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.limbs = mul_mod(&self.limbs, &rhs.limbs);
    }
}

impl Sum for FieldElement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for FieldElement {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_be_bytes()))
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RandomField;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn p_minus(k: u64) -> FieldElement {
        FieldElement::ZERO - FieldElement::from_u64(k)
    }

    #[test]
    fn test_clone_self_is_noop() {
        let mut a = FieldElement::from_limbs_unchecked([1, 2, 3, 4]);
        let same = a;
        a.clone_from(&same);
        assert_eq!(a.limbs(), [1, 2, 3, 4]);

        #[allow(clippy::redundant_clone)]
        let b = a.clone();
        assert_eq!(b.limbs(), a.limbs());
    }

    #[test]
    fn test_modulus() {
        let p = FieldElement::modulus();
        let expected = (BigUint::from(1u8) << 256u32) - (BigUint::from(1u8) << 32u32) - 977u32;
        assert_eq!(p, expected);
        assert!(FieldElement::from_limbs(MODULUS).is_none());
        assert_eq!(FieldElement::from_limbs_reduced(MODULUS), FieldElement::ZERO);
        assert_eq!(
            FieldElement::from_limbs_reduced([u64::MAX; 4]),
            FieldElement::from_u64(REDUCTION - 1)
        );
    }

    #[test]
    fn test_add_sub_wraparound() {
        let one = FieldElement::ONE;
        assert_eq!(p_minus(1) + one, FieldElement::ZERO);
        assert_eq!(FieldElement::ZERO - one, p_minus(1));
        assert_eq!(p_minus(1) + p_minus(1), p_minus(2));
        assert_eq!(-one, p_minus(1));
        assert_eq!(-FieldElement::ZERO, FieldElement::ZERO);
    }

    #[test]
    fn test_in_place_aliasing() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = FieldElement::random(&mut rng);

        let mut x = a;
        x += x;
        assert_eq!(x, a.double());

        let mut x = a;
        x *= x;
        assert_eq!(x, a.square());

        let mut x = a;
        x -= x;
        assert_eq!(x, FieldElement::ZERO);
    }

    #[test]
    fn test_mul_matches_biguint() {
        let mut rng = StdRng::seed_from_u64(42);
        let p = FieldElement::modulus();
        for _ in 0..200 {
            let a = FieldElement::random(&mut rng);
            let b = FieldElement::random(&mut rng);
            let expected = (a.to_biguint() * b.to_biguint()) % &p;
            assert_eq!((a * b).to_biguint(), expected);
            assert_eq!(a.square(), a * a);
        }
    }

    #[test]
    fn test_results_stay_canonical() {
        let edges = [
            FieldElement::ZERO,
            FieldElement::ONE,
            p_minus(1),
            p_minus(2),
            FieldElement::from_limbs_unchecked([u64::MAX, u64::MAX, u64::MAX, 0]),
            FieldElement::from_u64(REDUCTION),
        ];
        for a in edges.iter() {
            for b in edges.iter() {
                for r in [*a + *b, *a - *b, *a * *b, a.square()] {
                    assert!(is_canonical(r.limbs()), "{:?} not reduced", r);
                }
            }
        }
        assert_eq!(p_minus(1).square(), FieldElement::ONE);
    }

    #[test]
    fn test_inverse() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let a = FieldElement::random(&mut rng);
            if a.is_zero() {
                continue;
            }
            assert_eq!(a * a.invert(), FieldElement::ONE);
        }
        assert_eq!(FieldElement::from_u64(2).invert() * FieldElement::from_u64(2), FieldElement::ONE);
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);
        assert!(FieldElement::ZERO.try_invert().is_none());
    }

    #[test]
    fn test_batch_invert() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut values: Vec<FieldElement> = (0..9).map(|_| FieldElement::random(&mut rng)).collect();
        values[0] = FieldElement::ZERO;
        values[4] = FieldElement::ZERO;
        let expected: Vec<FieldElement> = values.iter().map(|v| v.invert()).collect();

        FieldElement::batch_invert(&mut values);
        assert_eq!(values, expected);

        let mut empty: [FieldElement; 0] = [];
        FieldElement::batch_invert(&mut empty);
    }

    #[test]
    fn test_sqrt() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            let a = FieldElement::random(&mut rng);
            let root = a.square().sqrt().expect("square has a root");
            assert!(root == a || root == -a);
        }
        // -1 is a non-residue because p = 3 mod 4
        assert!(p_minus(1).sqrt().is_none());
    }

    #[test]
    fn test_bytes_and_hex() {
        let x = FieldElement::from_hex(
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        )
        .unwrap();
        assert_eq!(x.limbs()[0], 0x59f2815b16f81798);
        assert_eq!(x.limbs()[3], 0x79be667ef9dcbbac);
        assert_eq!(FieldElement::from_be_bytes(&x.to_be_bytes()), Some(x));
        assert_eq!(
            x.to_string(),
            "0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert!(FieldElement::from_hex(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"
        )
        .is_none());
        assert!(FieldElement::from_hex("1234").is_none());
    }
}
