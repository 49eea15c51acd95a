//! Error types for batch submission and execution.

use core::fmt::{self, Display, Formatter};

/// Coordinate of a submitted point.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Coordinate {
    X,
    Y,
    Z,
}

/// Why a single submission was rejected before dispatch.
///
/// Every variant carries the index of the offending submission. A rejected
/// item never affects the other items of the same batch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// The scalar does not fit in 256 bits.
    ScalarTooWide { index: usize, len: usize },
    /// A coordinate is not a field element, i.e. its value is >= p.
    CoordinateOutOfRange { index: usize, coordinate: Coordinate },
    /// The point is finite but does not satisfy y^2 = x^3 + 7.
    NotOnCurve { index: usize },
}

impl ItemError {
    pub fn index(&self) -> usize {
        match *self {
            ItemError::ScalarTooWide { index, .. }
            | ItemError::CoordinateOutOfRange { index, .. }
            | ItemError::NotOnCurve { index } => index,
        }
    }
}

impl Display for ItemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::ScalarTooWide { index, len } => {
                write!(f, "item {index}: scalar is {len} bytes, at most 32 fit")
            }
            ItemError::CoordinateOutOfRange { index, coordinate } => {
                write!(f, "item {index}: coordinate {coordinate:?} is not below the field modulus")
            }
            ItemError::NotOnCurve { index } => write!(f, "item {index}: point is not on the curve"),
        }
    }
}

impl std::error::Error for ItemError {}

/// Errors raised while setting up a [`crate::BatchExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The configuration cannot be used, e.g. a thread count of zero.
    InvalidConfig(&'static str),
    /// The dedicated worker pool could not be created.
    ThreadPool(String),
}

impl Display for BatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::InvalidConfig(reason) => write!(f, "invalid batch configuration: {reason}"),
            BatchError::ThreadPool(reason) => write!(f, "failed to build worker pool: {reason}"),
        }
    }
}

impl std::error::Error for BatchError {}
