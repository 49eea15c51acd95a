//! Elliptic curve group secp256k1: y^2 = x^3 + 7 over GF(2^256 - 2^32 - 977).
//!
//! This crate provides the base field engine, 256-bit scalars, affine and
//! Jacobian curve points, and scalar multiplication by double-and-add, by
//! fixed 4-bit windows, and against a precomputed generator table. All
//! arithmetic works on caller-owned `Copy` values with no shared state, so it
//! can be driven from any number of threads at once.
//!
//! Field elements and scalars are stored as four little-endian `u64` limbs;
//! byte encodings are big-endian and never depend on host byte order.

mod affine;
mod field;
mod generator_table;
mod group;
mod jacobian;
mod random;
mod scalar;

pub use affine::Affine;
pub use field::FieldElement;
pub use generator_table::mul_generator_affine;
pub use group::{Group, ScalarBits, WINDOW_BITS};
pub use jacobian::Jacobian;
pub use random::RandomField;
pub use scalar::{Scalar, SCALAR_BITS};
