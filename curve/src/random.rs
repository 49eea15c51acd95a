use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::{FieldElement, Scalar};

/// Helper trait for sampling random field elements and scalars.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl RandomField for FieldElement {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

impl RandomField for Scalar {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}
