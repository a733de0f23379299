//! Proof of knowledge for a shown credential with selective disclosure.

use alloc::{vec, vec::Vec};
use core::iter::once;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, Zero};
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::Zeroize;

use schnorr_pok::{compute_random_oracle_challenge, error::SchnorrError, SchnorrCommitment};

use dock_crypto_utils::{multi_pairing, serde_utils::ArkObjectBytes};

use super::{SchnorrProof, SignaturePoKError};
use crate::{
    helpers::{n_rand, rand, schnorr_error},
    setup::VerificationKey,
    signature::Signature,
};

type Result<T, E = SignaturePoKError> = core::result::Result<T, E>;

/// Reveals a credential while keeping the chosen messages hidden. The shown values are
///
/// - `kappa = alpha + \sum_k(beta_k * m_k) + g2 * r` over the hidden messages,
/// - `nu = sigma_1 * r`,
///
/// together with a proof of knowledge of `(m_1..m_v, r)`. The credential stays valid for a
/// verifier because `e(sigma_1, kappa + \sum_j(pub_j * beta_{v+j})) = e(sigma_2 + nu, g2)`
/// whenever the underlying signature covers `m_1..m_v` followed by the revealed messages.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct SignaturePoK<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub kappa: E::G2Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub nu: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub(crate) challenge: E::ScalarField,
    /// PoK of `(m_1..m_v, r)` in `kappa - alpha` over bases `(beta_1..beta_v, g2)`
    pub(crate) kappa_proof: SchnorrProof<E::G2Affine>,
    /// PoK of `r` in `nu` over base `sigma_1`
    pub(crate) nu_proof: SchnorrProof<E::G1Affine>,
}

impl<E: Pairing> SignaturePoK<E> {
    /// Builds the showing materials for `signature` hiding `blinded_messages`, which must be the
    /// leading messages of the credential.
    pub fn new<R: RngCore, D: Digest>(
        rng: &mut R,
        signature: &Signature<E>,
        blinded_messages: &[E::ScalarField],
        vk: &VerificationKey<E>,
    ) -> Result<Self> {
        let gen_failed =
            |err: SchnorrError| SignaturePoKError::ProofGenerationFailed(schnorr_error(err));

        let blinded = blinded_messages.len();
        if blinded == 0 {
            Err(SignaturePoKError::NoBlindedMessages)?
        }
        if blinded > vk.beta.len() {
            Err(SignaturePoKError::TooManyBlindedMessages {
                received: blinded,
                max: vk.beta.len(),
            })?
        }

        let mut r = rand(rng);
        let kappa_bases: Vec<_> = vk.beta[..blinded]
            .iter()
            .copied()
            .chain(once(vk.g2))
            .collect();
        let mut kappa_witnesses: Vec<_> =
            blinded_messages.iter().copied().chain(once(r)).collect();

        let kappa =
            (E::G2::msm_unchecked(&kappa_bases, &kappa_witnesses) + vk.alpha).into_affine();
        let nu = signature
            .sigma_1
            .mul_bigint(r.into_bigint())
            .into_affine();

        let r_blinding: E::ScalarField = rand(rng);
        let kappa_schnorr = SchnorrCommitment::new(
            &kappa_bases,
            n_rand(rng, blinded).chain(once(r_blinding)).collect(),
        );
        let nu_schnorr = SchnorrCommitment::new(&[signature.sigma_1], vec![r_blinding]);

        let challenge = Self::compute_challenge::<D>(
            signature,
            &kappa,
            &nu,
            &kappa_schnorr.t,
            &nu_schnorr.t,
            vk,
        )
        .map_err(gen_failed)?;

        let kappa_proof =
            SchnorrProof::new(&kappa_schnorr, &kappa_witnesses, &challenge).map_err(gen_failed);
        let nu_proof = SchnorrProof::new(&nu_schnorr, &[r], &challenge).map_err(gen_failed);
        kappa_witnesses.zeroize();
        r.zeroize();

        Ok(Self {
            kappa,
            nu,
            challenge,
            kappa_proof: kappa_proof?,
            nu_proof: nu_proof?,
        })
    }

    /// Full verification of a shown credential: structural bounds, challenge recomputation, both
    /// Schnorr relations, the shared-randomizer binding, and the pairing equation.
    pub fn verify<D: Digest>(
        &self,
        signature: &Signature<E>,
        revealed_messages: &[E::ScalarField],
        vk: &VerificationKey<E>,
    ) -> bool {
        let blinded = match self.kappa_proof.response.len().checked_sub(1) {
            Some(blinded) if blinded >= 1 => blinded,
            _ => return false,
        };
        if blinded + revealed_messages.len() > vk.beta.len() || signature.is_zero() {
            return false;
        }

        match Self::compute_challenge::<D>(
            signature,
            &self.kappa,
            &self.nu,
            &self.kappa_proof.t,
            &self.nu_proof.t,
            vk,
        ) {
            Ok(challenge) if challenge == self.challenge => {}
            _ => return false,
        }

        let kappa_bases: Vec<_> = vk.beta[..blinded]
            .iter()
            .copied()
            .chain(once(vk.g2))
            .collect();
        let kappa_minus_alpha = (self.kappa.into_group() - vk.alpha).into_affine();
        if self
            .kappa_proof
            .verify(&kappa_bases, &kappa_minus_alpha, &self.challenge)
            .is_err()
            || self
                .nu_proof
                .verify(&[signature.sigma_1], &self.nu, &self.challenge)
                .is_err()
        {
            return false;
        }
        // the randomizer `r` is shared between the two relations
        match (
            self.nu_proof.response.get_response(0),
            self.kappa_proof.response.get_response(blinded),
        ) {
            (Ok(left), Ok(right)) if left == right => {}
            _ => return false,
        }

        let revealed_beta = &vk.beta[blinded..blinded + revealed_messages.len()];
        let shown_kappa =
            self.kappa.into_group() + E::G2::msm_unchecked(revealed_beta, revealed_messages);
        let shown_sigma_2 = self.nu.into_group() + signature.sigma_2;

        multi_pairing! {
            signature.sigma_1, shown_kappa;
            -shown_sigma_2, vk.g2
        }
        .is_zero()
    }

    fn compute_challenge<D: Digest>(
        signature: &Signature<E>,
        kappa: &E::G2Affine,
        nu: &E::G1Affine,
        kappa_t: &E::G2Affine,
        nu_t: &E::G1Affine,
        vk: &VerificationKey<E>,
    ) -> Result<E::ScalarField, SchnorrError> {
        let mut bytes = vec![];

        vk.g2.serialize_compressed(&mut bytes)?;
        vk.alpha.serialize_compressed(&mut bytes)?;
        vk.beta.serialize_compressed(&mut bytes)?;
        signature.serialize_compressed(&mut bytes)?;
        kappa.serialize_compressed(&mut bytes)?;
        nu.serialize_compressed(&mut bytes)?;
        kappa_t.serialize_compressed(&mut bytes)?;
        nu_t.serialize_compressed(&mut bytes)?;

        Ok(compute_random_oracle_challenge::<E::ScalarField, D>(&bytes))
    }
}
