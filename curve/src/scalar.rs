//! 256-bit scalars for point multiplication.
//!
//! A scalar is a plain unsigned integer in [0, 2^256) stored as [u64; 4] in
//! little-endian limb order. No reduction modulo the group order happens
//! here; callers choose the range.

use core::fmt::{self, Debug, Display, Formatter};
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::field::{be_bytes_from_limbs, limbs_from_be_bytes};
use crate::group::ScalarBits;

/// Width of a scalar in bits.
pub const SCALAR_BITS: usize = 256;

#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Scalar {
    limbs: [u64; 4],
}

impl Scalar {
    pub const ZERO: Self = Scalar {
        limbs: [0, 0, 0, 0],
    };

    pub const ONE: Self = Scalar {
        limbs: [1, 0, 0, 0],
    };

    /// 2^256 - 1
    pub const MAX: Self = Scalar {
        limbs: [u64::MAX; 4],
    };

    /// Order n of the secp256k1 group.
    pub const GROUP_ORDER: Self = Scalar {
        limbs: [
            0xbfd25e8cd0364141,
            0xbaaedce6af48a03b,
            0xfffffffffffffffe,
            0xffffffffffffffff,
        ],
    };

    #[inline]
    pub const fn from_u64(val: u64) -> Self {
        Scalar {
            limbs: [val, 0, 0, 0],
        }
    }

    #[inline]
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Scalar { limbs }
    }

    #[inline]
    pub const fn limbs(&self) -> [u64; 4] {
        self.limbs
    }

    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        Scalar {
            limbs: limbs_from_be_bytes(bytes),
        }
    }

    /// Decodes a big-endian scalar of at most 32 bytes. Shorter input is
    /// left-padded with zeros; wider input does not fit and yields `None`.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > 32 {
            return None;
        }
        let mut padded = [0u8; 32];
        padded[32 - bytes.len()..].copy_from_slice(bytes);
        Some(Self::from_be_bytes(&padded))
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        be_bytes_from_limbs(&self.limbs)
    }

    /// Parses up to 64 hex digits (big-endian).
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        Self::from_be_slice(&bytes)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.limbs[0] == 0 && self.limbs[1] == 0 && self.limbs[2] == 0 && self.limbs[3] == 0
    }

    /// Bit `i`, counting from the least significant bit.
    #[inline]
    pub const fn bit(&self, i: usize) -> bool {
        (self.limbs[i / 64] >> (i % 64)) & 1 == 1
    }

    /// `width` bits starting at bit `offset`. `width` must be in 1..=8 and the
    /// window must not cross a limb boundary.
    #[inline]
    pub const fn window(&self, offset: usize, width: usize) -> usize {
        ((self.limbs[offset / 64] >> (offset % 64)) & ((1u64 << width) - 1)) as usize
    }

    /// Position of the highest set bit plus one; zero for the zero scalar.
    pub fn bits(&self) -> usize {
        for i in (0..4).rev() {
            if self.limbs[i] != 0 {
                return i * 64 + (64 - self.limbs[i].leading_zeros() as usize);
            }
        }
        0
    }

    /// Wrapping subtraction modulo 2^256.
    pub fn wrapping_sub(&self, rhs: &Self) -> Self {
        let mut limbs = [0u64; 4];
        let mut borrow = false;
        for (i, limb) in limbs.iter_mut().enumerate() {
            let (diff, b1) = self.limbs[i].overflowing_sub(rhs.limbs[i]);
            let (diff, b2) = diff.overflowing_sub(borrow as u64);
            *limb = diff;
            borrow = b1 || b2;
        }
        Scalar { limbs }
    }
}

impl ScalarBits for Scalar {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.limbs
    }
}

impl From<u64> for Scalar {
    fn from(val: u64) -> Self {
        Scalar::from_u64(val)
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.limbs.iter().rev().cmp(other.limbs.iter().rev())
    }
}

impl Distribution<Scalar> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Scalar {
        let bytes: [u8; 32] = rng.random();
        Scalar::from_be_bytes(&bytes)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_be_bytes()))
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", self)
    }
}
