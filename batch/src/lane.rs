//! Execution lanes: the per-item scalar multiplication kernel.
//!
//! A lane is the contract an accelerator backend has to satisfy: one point
//! and one scalar in by reference, one point out into caller-owned storage.
//! Lanes hold no mutable state, so one lane value serves every worker.

use ecloop_curve::{Affine, Group, Jacobian, Scalar};

use crate::config::Method;

pub trait Lane: Send + Sync {
    fn name(&self) -> &'static str;

    /// `out = scalar * point`, left in Jacobian form.
    fn mul(&self, out: &mut Jacobian, point: &Jacobian, scalar: &Scalar);

    /// `out = scalar * point`, reduced to Z = 1 (or the identity).
    fn mul_reduce(&self, out: &mut Jacobian, point: &Jacobian, scalar: &Scalar) {
        self.mul(out, point, scalar);
        *out = Jacobian::from_affine(&out.to_affine());
    }
}

/// Double-and-add reference lane.
#[derive(Debug, Default, Copy, Clone)]
pub struct BinaryLane;

impl Lane for BinaryLane {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn mul(&self, out: &mut Jacobian, point: &Jacobian, scalar: &Scalar) {
        *out = point.mul_binary(scalar);
    }
}

/// Fixed 4-bit window lane.
#[derive(Debug, Default, Copy, Clone)]
pub struct WindowedLane;

impl Lane for WindowedLane {
    fn name(&self) -> &'static str {
        "windowed"
    }

    fn mul(&self, out: &mut Jacobian, point: &Jacobian, scalar: &Scalar) {
        *out = point.mul_windowed(scalar);
    }
}

pub fn lane_for(method: Method) -> Box<dyn Lane> {
    match method {
        Method::Binary => Box::new(BinaryLane),
        Method::Windowed => Box::new(WindowedLane),
    }
}

/// Runs a single item through `lane` and returns the affine result.
pub fn mul_reduce_one<L: Lane + ?Sized>(lane: &L, point: &Jacobian, scalar: &Scalar) -> Affine {
    let mut out = Jacobian::INFINITY;
    lane.mul_reduce(&mut out, point, scalar);
    out.to_affine()
}
