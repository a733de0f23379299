//! Blind issuance: the requester commits to its messages and encrypts the blinded ones, each
//! authority signs without seeing them, and the requester decrypts its partial credential.

use alloc::vec::Vec;
use core::iter::once;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_iter, rand::RngCore};
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use dock_crypto_utils::{
    hashing_utils::projective_group_elem_from_try_and_incr, serde_utils::ArkObjectBytes,
};

use crate::{
    elgamal::{self, Encryption},
    helpers::rand,
    proof::MessagesPoK,
    setup::{SecretKey, SignatureParams},
    BlindSignatureError, Signature,
};

type Result<T, E = BlindSignatureError> = core::result::Result<T, E>;

/// Everything a requester hands to an authority for blind signing: the commitment to all its
/// messages, encryptions of the blinded ones under its own key, and a proof binding the two.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct BlindSignRequest<E: Pairing> {
    /// `cm = g1 * r + \sum_i(h_i * m_i)`, blinded messages first
    #[serde_as(as = "ArkObjectBytes")]
    pub commitment: E::G1Affine,
    /// Lifted encryptions of the blinded messages, aligned with the leading `h_i`
    pub encryptions: Vec<Encryption<E::G1Affine>>,
    pub proof: MessagesPoK<E>,
}

impl<E: Pairing> BlindSignRequest<E> {
    /// Commits to `blinded_messages` followed by `revealed_messages`, encrypts the blinded ones
    /// under `enc_key`, and attaches the proof of knowledge. The matching decryption key later
    /// unblinds every [`BlindSignature`] answering this request.
    pub fn new<R: RngCore, D: Digest>(
        rng: &mut R,
        blinded_messages: &[E::ScalarField],
        revealed_messages: &[E::ScalarField],
        enc_key: &elgamal::PublicKey<E::G1Affine>,
        params: &SignatureParams<E>,
    ) -> Result<Self> {
        let blinded = blinded_messages.len();
        if blinded == 0 {
            Err(BlindSignatureError::NoBlindedMessages)?
        }
        let total = blinded + revealed_messages.len();
        if total > params.h.len() {
            Err(BlindSignatureError::TooManyMessages {
                received: total,
                max: params.h.len(),
            })?
        }

        let mut r = rand::<E::ScalarField, _>(rng);
        let messages: Vec<_> = blinded_messages
            .iter()
            .chain(revealed_messages)
            .copied()
            .collect();

        let bases: Vec<_> = once(params.g1)
            .chain(params.h[..total].iter().copied())
            .collect();
        let mut scalars: Vec<_> = once(r).chain(messages.iter().copied()).collect();
        let commitment = E::G1::msm_unchecked(&bases, &scalars).into_affine();
        scalars.zeroize();

        // All authorities will reuse this base as sigma_1, so their partial credentials can be
        // aggregated without interaction.
        let h = signature_base::<E, D>(&commitment)?;

        let mut enc_randomness = Vec::with_capacity(blinded);
        let encryptions: Vec<_> = blinded_messages
            .iter()
            .map(|message| {
                let (encryption, k) = Encryption::new(rng, message, &h, enc_key, &params.g1);
                enc_randomness.push(k);

                encryption
            })
            .collect();

        let proof = MessagesPoK::new::<_, D>(
            rng,
            &r,
            &messages,
            &enc_randomness,
            &commitment,
            &encryptions,
            enc_key,
            &h,
            params,
        )?;
        r.zeroize();
        enc_randomness.zeroize();

        Ok(Self {
            commitment,
            encryptions,
            proof,
        })
    }
}

/// A partial credential produced by a single authority: the shared base together with an
/// encryption of `sigma_2` that only the requester can open.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct BlindSignature<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    sigma_1: E::G1Affine,
    encrypted_sigma_2: Encryption<E::G1Affine>,
}

impl<E: Pairing> BlindSignature<E> {
    /// Blindly signs a verified request over `revealed_messages`. Operating on the encryptions,
    /// the authority assembles an encryption of
    /// `sigma_2 = h * (x + \sum_i(m_i * y_i))` without learning the blinded `m_i`:
    ///
    /// - `c1' = \sum_k(y_k * c1_k)`,
    /// - `c2' = h * (x + \sum_j(y_{v+j} * pub_j)) + \sum_k(y_k * c2_k)`.
    pub fn new<D: Digest>(
        request: &BlindSignRequest<E>,
        sk: &SecretKey<E::ScalarField>,
        enc_key: &elgamal::PublicKey<E::G1Affine>,
        revealed_messages: &[E::ScalarField],
        params: &SignatureParams<E>,
    ) -> Result<Self> {
        let blinded = request.encryptions.len();
        let total = blinded + revealed_messages.len();
        if total > params.h.len() || total > sk.y.len() {
            Err(BlindSignatureError::TooManyMessages {
                received: total,
                max: params.h.len().min(sk.y.len()),
            })?
        }

        let h = signature_base::<E, D>(&request.commitment)?;
        request
            .proof
            .verify::<D>(&request.commitment, &request.encryptions, enc_key, &h, params)?;

        let blinded_y = &sk.y[..blinded];
        let c1s: Vec<_> = cfg_iter!(request.encryptions).map(|enc| enc.c1).collect();
        let c2s: Vec<_> = cfg_iter!(request.encryptions).map(|enc| enc.c2).collect();

        let c1 = E::G1::msm_unchecked(&c1s, blinded_y);

        let revealed_exponent = sk.x
            + sk.y[blinded..total]
                .iter()
                .zip(revealed_messages)
                .map(|(y_j, message)| *y_j * message)
                .sum::<E::ScalarField>();
        let c2 =
            h.mul_bigint(revealed_exponent.into_bigint()) + E::G1::msm_unchecked(&c2s, blinded_y);

        Ok(Self {
            sigma_1: h,
            encrypted_sigma_2: Encryption {
                c1: c1.into_affine(),
                c2: c2.into_affine(),
            },
        })
    }

    /// Decrypts the partial credential. Constant work in the message count.
    pub fn unblind(&self, secret_key: &elgamal::SecretKey<E::ScalarField>) -> Signature<E> {
        Signature::combine(self.sigma_1, self.encrypted_sigma_2.decrypt(secret_key))
    }
}

/// The `G1` base every authority reuses as `sigma_1`, hashed from the request commitment so that
/// requester and authorities agree on it without interaction.
pub(crate) fn signature_base<E: Pairing, D: Digest>(
    commitment: &E::G1Affine,
) -> Result<E::G1Affine> {
    let mut bytes = Vec::new();
    commitment
        .serialize_compressed(&mut bytes)
        .map_err(|err| BlindSignatureError::Serialization(alloc::format!("{:?}", err)))?;

    Ok(projective_group_elem_from_try_and_incr::<E::G1Affine, D>(&bytes).into_affine())
}
