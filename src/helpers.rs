use alloc::{format, string::String, vec::Vec};

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_std::{cfg_into_iter, cfg_iter, rand::RngCore, UniformRand};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use dock_crypto_utils::msm::multiply_field_elems_with_same_group_elem;
use schnorr_pok::error::SchnorrError;
use secret_sharing_and_dkg::common::ParticipantId;

/// Samples a single random value from `rng`.
pub fn rand<T: UniformRand, R: RngCore>(rng: &mut R) -> T {
    T::rand(rng)
}

/// Samples `count` random values lazily from `rng`.
pub fn n_rand<T: UniformRand, R: RngCore>(
    rng: &mut R,
    count: usize,
) -> impl Iterator<Item = T> + '_ {
    core::iter::repeat_with(move || T::rand(rng)).take(count)
}

/// Samples a random non-zero field element from `rng`.
pub fn non_zero_rand<F: PrimeField, R: RngCore>(rng: &mut R) -> F {
    loop {
        let value = F::rand(rng);
        if !value.is_zero() {
            return value;
        }
    }
}

/// `SchnorrError` implements neither `Eq` nor `Clone`, so error variants wrapping one keep its
/// debug rendering instead.
pub fn schnorr_error(err: SchnorrError) -> String {
    format!("{:?}", err)
}

/// Multiplies `base` by each scalar, normalizing the products in one batch.
pub fn points<G: AffineRepr>(base: &G, scalars: &[G::ScalarField]) -> Vec<G> {
    let products = multiply_field_elems_with_same_group_elem(base.into_group(), scalars);

    G::Group::normalize_batch(&products)
}

/// Lagrange basis polynomials of the given participant ids, evaluated at zero:
/// `l_i(0) = \prod_{j != i}(j / (j - i))`.
///
/// Ids must be distinct and non-zero, which callers validate before aggregating.
pub fn lagrange_basis_at_0<F: PrimeField>(participant_ids: &[ParticipantId]) -> Vec<F> {
    let ids: Vec<F> = cfg_iter!(participant_ids)
        .map(|&id| F::from(id as u64))
        .collect();
    let full_product: F = cfg_iter!(ids).product();

    cfg_into_iter!(ids.clone())
        .map(move |i| {
            // `\prod_{j != i}(j)`, recovered by dividing `i` back out of the full product
            let numerator = full_product / i;
            let mut denominator: F = cfg_iter!(ids)
                .filter(|&j| &i != j)
                .map(|&j| j - i)
                .product();
            denominator.inverse_in_place().unwrap();

            numerator * denominator
        })
        .collect()
}

#[cfg(test)]
/// Randomly drops up to `max_skipped` elements while iterating. Tests use it to pick varying
/// authority subsets.
pub fn randomly_skip_up_to<'rng, I>(
    rng: &'rng mut impl RngCore,
    iter: I,
    mut max_skipped: usize,
) -> impl Iterator<Item = I::Item> + 'rng
where
    I: IntoIterator + 'rng,
{
    iter.into_iter().filter(move |_| {
        use ark_std::rand::Rng;

        let keep = max_skipped == 0 || rng.gen_bool(0.5);
        if !keep {
            max_skipped -= 1;
        }

        keep
    })
}
