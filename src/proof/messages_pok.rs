//! Proof of knowledge for the messages inside a blind issuance request.

use alloc::{vec, vec::Vec};
use core::iter::once;

use ark_ec::pairing::Pairing;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use digest::Digest;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use schnorr_pok::{compute_random_oracle_challenge, error::SchnorrError, SchnorrCommitment};
use serde_with::serde_as;

use dock_crypto_utils::serde_utils::ArkObjectBytes;

use super::{MessagesPoKError, SchnorrProof};
use crate::{
    elgamal::{Encryption, PublicKey},
    helpers::{n_rand, rand, schnorr_error},
    setup::SignatureParams,
};

type Result<T, E = MessagesPoKError> = core::result::Result<T, E>;

/// Proves, under one Fiat-Shamir challenge, that the commitment of a blind issuance request
/// opens to the requested messages and that every attached encryption hides the matching one:
///
/// - `cm = g1 * r + \sum_i(h_i * m_i)` over all messages, blinded first,
/// - `c1_k = g1 * k_k` and `c2_k = gamma * k_k + h * m_k` per blinded message.
///
/// `m_k` and `k_k` each appear in two relations, so their blindings are reused and the verifier
/// additionally checks that the corresponding responses coincide.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct MessagesPoK<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub(crate) challenge: E::ScalarField,
    /// `cm = g1 * r + \sum_i(h_i * m_i)`
    pub(crate) com: SchnorrProof<E::G1Affine>,
    /// `(c1_k, c2_k)` relations, one pair per encrypted message
    pub(crate) enc: Vec<(SchnorrProof<E::G1Affine>, SchnorrProof<E::G1Affine>)>,
}

impl<E: Pairing> MessagesPoK<E> {
    /// Proves knowledge of `(r, messages, enc_randomness)` for the supplied request parts.
    /// `messages` holds the blinded messages first, `enc_randomness` is aligned with them.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new<R: RngCore, D: Digest>(
        rng: &mut R,
        r: &E::ScalarField,
        messages: &[E::ScalarField],
        enc_randomness: &[E::ScalarField],
        commitment: &E::G1Affine,
        encryptions: &[Encryption<E::G1Affine>],
        enc_key: &PublicKey<E::G1Affine>,
        h: &E::G1Affine,
        params: &SignatureParams<E>,
    ) -> Result<Self> {
        let gen_failed =
            |err: SchnorrError| MessagesPoKError::ProofGenerationFailed(schnorr_error(err));

        let blinded = enc_randomness.len();
        let mut m_blindings: Vec<E::ScalarField> = n_rand(rng, messages.len()).collect();
        let mut k_blindings: Vec<E::ScalarField> = n_rand(rng, blinded).collect();

        let com_bases = Self::com_bases(params, messages.len());
        let com_schnorr = SchnorrCommitment::new(
            &com_bases,
            once(rand(rng)).chain(m_blindings.iter().copied()).collect(),
        );
        let enc_schnorrs: Vec<_> = (0..blinded)
            .map(|k| {
                (
                    SchnorrCommitment::new(&[params.g1], vec![k_blindings[k]]),
                    SchnorrCommitment::new(&[enc_key.0, *h], vec![k_blindings[k], m_blindings[k]]),
                )
            })
            .collect();

        let challenge = Self::compute_challenge::<D>(
            commitment,
            encryptions,
            enc_key,
            h,
            &com_schnorr.t,
            enc_schnorrs.iter().map(|(c1, c2)| (&c1.t, &c2.t)),
            params,
        )
        .map_err(gen_failed)?;

        let mut com_witnesses: Vec<_> = once(*r).chain(messages.iter().copied()).collect();
        let com = SchnorrProof::new(&com_schnorr, &com_witnesses, &challenge).map_err(gen_failed);
        com_witnesses.zeroize();
        m_blindings.zeroize();
        k_blindings.zeroize();

        let enc = enc_schnorrs
            .iter()
            .enumerate()
            .map(|(k, (c1, c2))| {
                Ok((
                    SchnorrProof::new(c1, &[enc_randomness[k]], &challenge).map_err(gen_failed)?,
                    SchnorrProof::new(c2, &[enc_randomness[k], messages[k]], &challenge)
                        .map_err(gen_failed)?,
                ))
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            challenge,
            com: com?,
            enc,
        })
    }

    /// Verifies the proof against the request it arrived with. The number of committed messages
    /// is taken from the proof itself; the signer separately bounds it by its own key.
    pub fn verify<D: Digest>(
        &self,
        commitment: &E::G1Affine,
        encryptions: &[Encryption<E::G1Affine>],
        enc_key: &PublicKey<E::G1Affine>,
        h: &E::G1Affine,
        params: &SignatureParams<E>,
    ) -> Result<()> {
        if self.enc.len() != encryptions.len() {
            Err(MessagesPoKError::IncompatibleEncryptionsAndProofs {
                encryptions: encryptions.len(),
                proofs: self.enc.len(),
            })?
        }
        let committed = self
            .com
            .response
            .len()
            .checked_sub(1)
            .filter(|committed| *committed >= encryptions.len())
            .ok_or(MessagesPoKError::FewerCommittedMessagesThanEncryptions {
                committed: self.com.response.len().saturating_sub(1),
                encryptions: encryptions.len(),
            })?;
        if committed > params.h.len() {
            Err(MessagesPoKError::TooManyCommittedMessages {
                committed,
                max: params.h.len(),
            })?
        }

        let challenge = Self::compute_challenge::<D>(
            commitment,
            encryptions,
            enc_key,
            h,
            &self.com.t,
            self.enc.iter().map(|(c1, c2)| (&c1.t, &c2.t)),
            params,
        )
        .map_err(|err| MessagesPoKError::InvalidCommitmentProof(schnorr_error(err)))?;
        if challenge != self.challenge {
            Err(MessagesPoKError::ChallengeMismatch)?
        }

        self.verify_shared_responses()?;

        self.com
            .verify(
                &Self::com_bases(params, committed),
                commitment,
                &self.challenge,
            )
            .map_err(|err| MessagesPoKError::InvalidCommitmentProof(schnorr_error(err)))?;
        for (index, ((c1_proof, c2_proof), encryption)) in
            self.enc.iter().zip_eq(encryptions).enumerate()
        {
            let enc_failed = |err: SchnorrError| MessagesPoKError::InvalidEncryptionProof {
                index,
                error: schnorr_error(err),
            };

            c1_proof
                .verify(&[params.g1], &encryption.c1, &self.challenge)
                .map_err(enc_failed)?;
            c2_proof
                .verify(&[enc_key.0, *h], &encryption.c2, &self.challenge)
                .map_err(enc_failed)?;
        }

        Ok(())
    }

    /// The responses for `m_k` in the commitment relation and in `c2_k`, and for `k_k` in `c1_k`
    /// and `c2_k`, must coincide since the witnesses do.
    fn verify_shared_responses(&self) -> Result<()> {
        for (index, (c1_proof, c2_proof)) in self.enc.iter().enumerate() {
            let equal = |left: Result<_, SchnorrError>, right: Result<_, SchnorrError>| {
                matches!((left, right), (Ok(l), Ok(r)) if l == r)
            };

            // `m_k`: responses at `1 + index` in `com` and at `1` in `c2_k`
            if !equal(
                self.com.response.get_response(1 + index),
                c2_proof.response.get_response(1),
            ) || !equal(
                c1_proof.response.get_response(0),
                c2_proof.response.get_response(0),
            ) {
                Err(MessagesPoKError::SharedResponsesNotEqual { index })?
            }
        }

        Ok(())
    }

    /// `(g1, h_1, ..., h_count)` - the bases of the commitment relation.
    fn com_bases(params: &SignatureParams<E>, count: usize) -> Vec<E::G1Affine> {
        once(params.g1)
            .chain(params.h[..count].iter().copied())
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn compute_challenge<'a, D: Digest>(
        commitment: &E::G1Affine,
        encryptions: &[Encryption<E::G1Affine>],
        enc_key: &PublicKey<E::G1Affine>,
        h: &E::G1Affine,
        com_t: &E::G1Affine,
        enc_ts: impl Iterator<Item = (&'a E::G1Affine, &'a E::G1Affine)>,
        params: &SignatureParams<E>,
    ) -> Result<E::ScalarField, SchnorrError> {
        let mut bytes = vec![];

        params.g1.serialize_compressed(&mut bytes)?;
        params.h.serialize_compressed(&mut bytes)?;
        enc_key.0.serialize_compressed(&mut bytes)?;
        h.serialize_compressed(&mut bytes)?;
        commitment.serialize_compressed(&mut bytes)?;
        for encryption in encryptions {
            encryption.serialize_compressed(&mut bytes)?;
        }
        com_t.serialize_compressed(&mut bytes)?;
        for (c1_t, c2_t) in enc_ts {
            c1_t.serialize_compressed(&mut bytes)?;
            c2_t.serialize_compressed(&mut bytes)?;
        }

        Ok(compute_random_oracle_challenge::<E::ScalarField, D>(&bytes))
    }
}
