//! Work submissions and their validation.

use ecloop_curve::{Affine, FieldElement, Jacobian, Scalar};
use serde::{Deserialize, Serialize};

use crate::errors::{Coordinate, ItemError};

/// A base point as handed over by the caller, with unchecked coordinate limbs
/// (little-endian `u64` limbs, independent of host byte order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointInput {
    Identity,
    Affine { x: [u64; 4], y: [u64; 4] },
    Jacobian { x: [u64; 4], y: [u64; 4], z: [u64; 4] },
}

impl From<&Affine> for PointInput {
    fn from(point: &Affine) -> Self {
        if point.is_infinity() {
            return PointInput::Identity;
        }
        PointInput::Affine {
            x: point.x.limbs(),
            y: point.y.limbs(),
        }
    }
}

impl From<&Jacobian> for PointInput {
    fn from(point: &Jacobian) -> Self {
        PointInput::Jacobian {
            x: point.x.limbs(),
            y: point.y.limbs(),
            z: point.z.limbs(),
        }
    }
}

/// One `(point, scalar)` pair as submitted. The scalar is big-endian and may
/// be shorter than 32 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub point: PointInput,
    pub scalar: Vec<u8>,
}

impl Submission {
    pub fn new(point: PointInput, scalar: Vec<u8>) -> Self {
        Submission { point, scalar }
    }
}

impl From<&WorkItem> for Submission {
    fn from(item: &WorkItem) -> Self {
        Submission {
            point: PointInput::from(&item.point),
            scalar: item.scalar.to_be_bytes().to_vec(),
        }
    }
}

/// A validated work item: a point on the curve and a 256-bit scalar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub point: Jacobian,
    pub scalar: Scalar,
}

impl WorkItem {
    pub fn new(point: Jacobian, scalar: Scalar) -> Self {
        WorkItem { point, scalar }
    }

    /// Checks a submission and converts it into a work item.
    ///
    /// The scalar must fit in 32 bytes and every coordinate must be below p.
    /// A finite point must lie on the curve; a Jacobian point with Z = 0 is
    /// the identity whatever its X and Y.
    pub fn try_from_submission(index: usize, submission: &Submission) -> Result<Self, ItemError> {
        let scalar = Scalar::from_be_slice(&submission.scalar).ok_or(ItemError::ScalarTooWide {
            index,
            len: submission.scalar.len(),
        })?;

        let point = match &submission.point {
            PointInput::Identity => Jacobian::INFINITY,
            PointInput::Affine { x, y } => {
                let x = coordinate(index, Coordinate::X, x)?;
                let y = coordinate(index, Coordinate::Y, y)?;
                let point = Affine::new(x, y);
                if !point.is_on_curve() {
                    return Err(ItemError::NotOnCurve { index });
                }
                Jacobian::from_affine(&point)
            }
            PointInput::Jacobian { x, y, z } => {
                let x = coordinate(index, Coordinate::X, x)?;
                let y = coordinate(index, Coordinate::Y, y)?;
                let z = coordinate(index, Coordinate::Z, z)?;
                let point = Jacobian::new(x, y, z);
                if !point.is_on_curve() {
                    return Err(ItemError::NotOnCurve { index });
                }
                point
            }
        };

        Ok(WorkItem { point, scalar })
    }
}

fn coordinate(index: usize, which: Coordinate, limbs: &[u64; 4]) -> Result<FieldElement, ItemError> {
    FieldElement::from_limbs(*limbs).ok_or(ItemError::CoordinateOutOfRange {
        index,
        coordinate: which,
    })
}
