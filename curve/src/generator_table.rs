//! Fixed-base multiplication of the generator.
//!
//! Row `i` of the table holds `j * 16^i * G` for `j` in 0..16, in affine form,
//! so a multiplication is one mixed addition per 4-bit window and no doublings.

use std::sync::OnceLock;

use crate::affine::Affine;
use crate::group::WINDOW_BITS;
use crate::jacobian::Jacobian;
use crate::scalar::{Scalar, SCALAR_BITS};

const WINDOWS: usize = SCALAR_BITS / WINDOW_BITS;
const ROW: usize = 1 << WINDOW_BITS;

type Row = [Affine; ROW];

static GENERATOR_TABLE: OnceLock<Vec<Row>> = OnceLock::new();

fn build_table() -> Vec<Row> {
    let mut rows = Vec::with_capacity(WINDOWS);
    let mut base = Jacobian::generator();

    for _ in 0..WINDOWS {
        let mut multiples = [Jacobian::INFINITY; ROW];
        for j in 1..ROW {
            multiples[j] = multiples[j - 1] + base;
        }

        let mut row = [Affine::INFINITY; ROW];
        for (slot, point) in row.iter_mut().zip(Jacobian::batch_normalize(&multiples)) {
            *slot = point;
        }
        rows.push(row);

        for _ in 0..WINDOW_BITS {
            base = base.double();
        }
    }

    rows
}

pub(crate) fn affine_table() -> &'static [Row] {
    GENERATOR_TABLE.get_or_init(build_table)
}

pub(crate) fn mul_generator_jacobian(scalar: &Scalar) -> Jacobian {
    let table = affine_table();
    let mut result = Jacobian::INFINITY;

    for (i, row) in table.iter().enumerate() {
        let window = scalar.window(i * WINDOW_BITS, WINDOW_BITS);
        if window != 0 {
            result = result.add_mixed(&row[window]);
        }
    }

    result
}

/// `scalar * G` in affine form.
pub fn mul_generator_affine(scalar: &Scalar) -> Affine {
    mul_generator_jacobian(scalar).to_affine()
}
