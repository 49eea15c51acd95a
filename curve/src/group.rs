use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Access to the raw little-endian limbs of a scalar.
pub trait ScalarBits {
    fn to_u64_limbs(&self) -> [u64; 4];
}

/// Window width of [`Group::mul_windowed`].
pub const WINDOW_BITS: usize = 4;

const WINDOW_TABLE_SIZE: usize = 1 << WINDOW_BITS;

pub trait Group:
    Sized + Copy + Add<Output = Self> + AddAssign + Sub<Output = Self> + SubAssign + Neg<Output = Self>
{
    type Scalar: ScalarBits;

    fn identity() -> Self;
    fn is_identity(&self) -> bool;
    fn generator() -> Self;
    fn double(&self) -> Self;
    fn negate(&self) -> Self;

    /// Double-and-add over all 256 bits, most significant first.
    ///
    /// This is the reference every other multiplication path must match.
    fn mul_binary(&self, scalar: &Self::Scalar) -> Self {
        let scalar_limbs = scalar.to_u64_limbs();
        let mut result = Self::identity();

        for &limb in scalar_limbs.iter().rev() {
            for shift in (0..64).rev() {
                result = result.double();
                if (limb >> shift) & 1 == 1 {
                    result = result + *self;
                }
            }
        }

        result
    }

    /// Fixed 4-bit window multiplication over a 16-entry table of multiples.
    fn mul_windowed(&self, scalar: &Self::Scalar) -> Self {
        if self.is_identity() {
            return Self::identity();
        }

        let mut table = [Self::identity(); WINDOW_TABLE_SIZE];
        table[1] = *self;

        for i in 2..WINDOW_TABLE_SIZE {
            table[i] = if i % 2 == 0 {
                table[i / 2].double()
            } else {
                table[i - 1] + table[1]
            };
        }

        let scalar_limbs = scalar.to_u64_limbs();
        let mut result = Self::identity();

        for &limb in scalar_limbs.iter().rev() {
            for shift in (0..64).step_by(WINDOW_BITS).rev() {
                for _ in 0..WINDOW_BITS {
                    result = result.double();
                }

                let window = ((limb >> shift) & (WINDOW_TABLE_SIZE as u64 - 1)) as usize;
                if window != 0 {
                    result = result + table[window];
                }
            }
        }

        result
    }

    fn mul_u64(&self, n: u64) -> Self {
        if n == 0 {
            return Self::identity();
        }
        if n == 1 {
            return *self;
        }

        let mut result = Self::identity();
        let mut temp = *self;
        let mut bits = n;

        while bits > 0 {
            if bits & 1 == 1 {
                result = result + temp;
            }
            temp = temp.double();
            bits >>= 1;
        }

        result
    }
}
