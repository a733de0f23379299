//! Key generation: standalone authorities and Shamir-dealt threshold federations.

use alloc::vec::Vec;

use ark_ec::pairing::Pairing;
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial, Polynomial};
use ark_std::{cfg_into_iter, rand::RngCore};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use secret_sharing_and_dkg::common::ShareId;

use super::{SecretKey, SetupError, SignatureParams, VerificationKey};

/// Generates a fresh signing key and the matching verification key for the supplied params.
pub fn keygen<R: RngCore, E: Pairing>(
    rng: &mut R,
    params: &SignatureParams<E>,
) -> Result<(SecretKey<E::ScalarField>, VerificationKey<E>), SetupError> {
    if params.h.is_empty() {
        Err(SetupError::ParamsHaveNoMessageGenerators)?
    }

    let sk = SecretKey::rand(rng, params.h.len() as u32);
    let vk = VerificationKey::new(&sk, params);

    Ok((sk, vk))
}

/// Acts as the trusted dealer of a `threshold`-of-`total` federation: samples one random
/// polynomial of degree `threshold - 1` for `x` and one per message for `y`, and hands authority
/// `i ∈ 1..=total` the evaluations at `i` as its key share. Share `j` of the returned vectors
/// belongs to participant id `j + 1`; aggregation consumes `(id, share)` pairs, so the id travels
/// with the share from here on.
///
/// Any `threshold` shares reconstruct the federation key via the Lagrange basis at zero; fewer
/// reveal nothing about it.
pub fn deal<R: RngCore, E: Pairing>(
    rng: &mut R,
    params: &SignatureParams<E>,
    threshold: ShareId,
    total: ShareId,
) -> Result<(Vec<SecretKey<E::ScalarField>>, Vec<VerificationKey<E>>), SetupError> {
    if threshold < 1 || total < threshold {
        Err(SetupError::InvalidThreshold { threshold, total })?
    }
    if params.h.is_empty() {
        Err(SetupError::ParamsHaveNoMessageGenerators)?
    }

    // Polynomial 0 shares `x`, polynomial `i` shares `y_i`.
    let polynomials: Vec<DensePolynomial<E::ScalarField>> = (0..=params.h.len())
        .map(|_| DensePolynomial::rand(threshold as usize - 1, rng))
        .collect();

    let secrets: Vec<_> = cfg_into_iter!(1..=total)
        .map(|id| {
            let at = E::ScalarField::from(id as u64);
            let mut evaluations = polynomials.iter().map(|polynomial| polynomial.evaluate(&at));

            SecretKey {
                x: evaluations.next().unwrap(),
                y: evaluations.collect(),
            }
        })
        .collect();
    let verification_keys = secrets
        .iter()
        .map(|share| VerificationKey::new(share, params))
        .collect();

    Ok((secrets, verification_keys))
}
