//! Aggregation of partial credentials and verification keys, with and without a threshold.
//!
//! Threshold aggregation interpolates in the exponent with the Lagrange basis at zero over the
//! participant ids bundled with each partial, so any subset of `threshold` partials converges to
//! the same group elements regardless of which authorities contributed. Plain aggregation just
//! sums the partials and is used when independent authorities sign the same messages.

use alloc::vec::Vec;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};

use secret_sharing_and_dkg::common::ParticipantId;

use super::{error::AggregationError, ps_signature::Signature};
use crate::{helpers::lagrange_basis_at_0, setup::VerificationKey};

use dock_crypto_utils::impl_deref;

type Result<T, E = AggregationError> = core::result::Result<T, E>;

/// Signature produced by combining several partial credentials. Verified like any other
/// [`Signature`], against the correspondingly aggregated verification key.
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct AggregatedSignature<E: Pairing>(Signature<E>);
impl_deref! { AggregatedSignature<E: Pairing>(Signature<E>) }

impl<E: Pairing> AggregatedSignature<E> {
    /// Combines partial credentials of independent authorities by summing `sigma_2`. All
    /// partials must share `sigma_1`, which holds whenever they were issued over the same blind
    /// sign request or derived deterministically from the same messages.
    pub fn new<'a, SI>(signatures: SI) -> Result<Self>
    where
        SI: IntoIterator<Item = &'a Signature<E>>,
    {
        let signatures: Vec<_> = signatures.into_iter().collect();
        let first = *signatures.first().ok_or(AggregationError::NoSignatures)?;
        validate_shared_sigma_1(&signatures)?;

        let sigma_2 = signatures
            .iter()
            .map(|sig| sig.sigma_2.into_group())
            .sum::<E::G1>();

        Ok(Self(Signature::combine(first.sigma_1, sigma_2)))
    }

    /// Combines `threshold` partial credentials of a federation. Each partial comes bundled with
    /// the participant id it was issued by; ids must be unique and non-zero but may arrive in
    /// any order.
    pub fn new_threshold<'a, SI>(participant_signatures: SI) -> Result<Self>
    where
        SI: IntoIterator<Item = (ParticipantId, &'a Signature<E>)>,
    {
        let (ids, signatures): (Vec<_>, Vec<_>) = participant_signatures.into_iter().unzip();
        let first = *signatures.first().ok_or(AggregationError::NoSignatures)?;
        validate_participant_ids(&ids)?;
        validate_shared_sigma_1(&signatures)?;

        let basis = lagrange_basis_at_0::<E::ScalarField>(&ids);
        let sigma_2s: Vec<_> = signatures.iter().map(|sig| sig.sigma_2).collect();
        let sigma_2 = E::G1::msm_unchecked(&sigma_2s, &basis);

        Ok(Self(Signature::combine(first.sigma_1, sigma_2)))
    }
}

impl<E: Pairing> VerificationKey<E> {
    /// Combines verification keys of independent authorities component-wise.
    pub fn aggregate<'a, VI>(keys: VI) -> Result<Self>
    where
        VI: IntoIterator<Item = &'a Self>,
    {
        let keys: Vec<_> = keys.into_iter().collect();
        let first = *keys.first().ok_or(AggregationError::NoVerificationKeys)?;
        validate_key_shapes(&keys)?;

        let alpha = keys.iter().map(|vk| vk.alpha.into_group()).sum::<E::G2>();
        let beta = (0..first.beta.len())
            .map(|i| keys.iter().map(|vk| vk.beta[i].into_group()).sum::<E::G2>())
            .collect::<Vec<_>>();

        Ok(Self {
            g2: first.g2,
            alpha: alpha.into_affine(),
            beta: E::G2::normalize_batch(&beta),
        })
    }

    /// Combines `threshold` key shares of a federation, bundled with their participant ids. Any
    /// subset of `threshold` shares converges to the federation key.
    pub fn aggregate_threshold<'a, VI>(participant_keys: VI) -> Result<Self>
    where
        VI: IntoIterator<Item = (ParticipantId, &'a Self)>,
    {
        let (ids, keys): (Vec<_>, Vec<_>) = participant_keys.into_iter().unzip();
        let first = *keys.first().ok_or(AggregationError::NoVerificationKeys)?;
        validate_participant_ids(&ids)?;
        validate_key_shapes(&keys)?;

        let basis = lagrange_basis_at_0::<E::ScalarField>(&ids);
        let alphas: Vec<_> = keys.iter().map(|vk| vk.alpha).collect();
        let alpha = E::G2::msm_unchecked(&alphas, &basis);
        let beta = (0..first.beta.len())
            .map(|i| {
                let betas: Vec<_> = keys.iter().map(|vk| vk.beta[i]).collect();

                E::G2::msm_unchecked(&betas, &basis)
            })
            .collect::<Vec<_>>();

        Ok(Self {
            g2: first.g2,
            alpha: alpha.into_affine(),
            beta: E::G2::normalize_batch(&beta),
        })
    }
}

fn validate_participant_ids(ids: &[ParticipantId]) -> Result<()> {
    if ids.iter().any(|&id| id == 0) {
        Err(AggregationError::ZeroParticipantId)?
    }

    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
        Err(AggregationError::DuplicateParticipantId(pair[0]))?
    }

    Ok(())
}

fn validate_shared_sigma_1<E: Pairing>(signatures: &[&Signature<E>]) -> Result<()> {
    let sigma_1 = signatures[0].sigma_1;
    if let Some(index) = signatures.iter().position(|sig| sig.sigma_1 != sigma_1) {
        Err(AggregationError::DivergentSigma1 { index })?
    }

    Ok(())
}

fn validate_key_shapes<E: Pairing>(keys: &[&VerificationKey<E>]) -> Result<()> {
    let first = keys[0];
    if let Some(index) = keys
        .iter()
        .position(|vk| vk.g2 != first.g2 || vk.beta.len() != first.beta.len())
    {
        Err(AggregationError::IncompatibleVerificationKeys { index })?
    }

    Ok(())
}
