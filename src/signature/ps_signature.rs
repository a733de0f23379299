use alloc::vec::Vec;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_into_iter, rand::RngCore, Zero};
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use dock_crypto_utils::{
    hashing_utils::projective_group_elem_from_try_and_incr, multi_pairing,
    serde_utils::ArkObjectBytes,
};

use crate::{
    helpers::non_zero_rand,
    setup::{SecretKey, SignatureParams, VerificationKey},
    SignatureError,
};

type Result<T, E = SignatureError> = core::result::Result<T, E>;

/// A credential: two `G1` points with `sigma_2 = sigma_1 * (x + \sum_i(m_i * y_i))`. It can be
/// produced directly by a signer, unblinded from a blind issuance, or aggregated from partial
/// credentials, and stays valid under randomization.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct Signature<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub(crate) sigma_1: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub(crate) sigma_2: E::G1Affine,
}

impl<E: Pairing> Signature<E> {
    /// Creates a new signature with a random non-zero `sigma_1`, so repeated calls over the same
    /// messages produce different signatures. Partial credentials meant for aggregation must use
    /// [`Self::new_deterministic`] instead, as aggregation needs a shared `sigma_1`.
    pub fn new<R: RngCore>(
        rng: &mut R,
        messages: &[E::ScalarField],
        sk: &SecretKey<E::ScalarField>,
        SignatureParams { g1, .. }: &SignatureParams<E>,
    ) -> Result<Self> {
        Self::check_message_count(messages, sk)?;

        let r = non_zero_rand::<E::ScalarField, _>(rng);
        let h = g1.mul_bigint(r.into_bigint());

        Ok(Self::from_sigma_1(h, messages, sk))
    }

    /// Creates a new signature whose `sigma_1` is hashed from the messages, so every signer
    /// produces the same `sigma_1` for the same message vector. This is the baseline used when
    /// several authorities sign independently and the results are aggregated.
    pub fn new_deterministic<D: Digest>(
        messages: &[E::ScalarField],
        sk: &SecretKey<E::ScalarField>,
    ) -> Result<Self> {
        Self::check_message_count(messages, sk)?;

        let mut bytes = Vec::new();
        for message in messages {
            bytes.append(&mut message.into_bigint().to_bytes_be());
        }
        let h = projective_group_elem_from_try_and_incr::<E::G1Affine, D>(&bytes);

        Ok(Self::from_sigma_1(h, messages, sk))
    }

    /// Rerandomizes the signature. Validity is preserved since both points are scaled by the
    /// same non-zero factor.
    pub fn randomize<R: RngCore>(&self, rng: &mut R) -> Self {
        let r = non_zero_rand::<E::ScalarField, _>(rng).into_bigint();

        Self::combine(self.sigma_1.mul_bigint(r), self.sigma_2.mul_bigint(r))
    }

    /// Verifies the signature over the given messages, i.e.
    /// `e(sigma_1, alpha + \sum_i(m_i * beta_i)) = e(sigma_2, g2)`. Also covers aggregated and
    /// unblinded signatures. Any mismatch, including a wrong message count or a zero signature,
    /// yields `false`.
    pub fn verify(&self, messages: &[E::ScalarField], vk: &VerificationKey<E>) -> bool {
        if messages.len() != vk.beta.len() || messages.is_empty() || self.is_zero() {
            return false;
        }

        let beta_mul_m = E::G2::msm_unchecked(&vk.beta, messages);

        multi_pairing! {
            self.sigma_1, beta_mul_m + vk.alpha;
            -self.sigma_2.into_group(), vk.g2
        }
        .is_zero()
    }

    /// A valid signature has no zero elements.
    pub fn is_zero(&self) -> bool {
        self.sigma_1.is_zero() || self.sigma_2.is_zero()
    }

    pub(crate) fn combine<S1, S2>(sigma_1: S1, sigma_2: S2) -> Self
    where
        S1: Into<E::G1Affine>,
        S2: Into<E::G1Affine>,
    {
        Self {
            sigma_1: sigma_1.into(),
            sigma_2: sigma_2.into(),
        }
    }

    /// `sigma_2 = sigma_1 * (x + \sum_i(m_i * y_i))`
    fn from_sigma_1(h: E::G1, messages: &[E::ScalarField], sk: &SecretKey<E::ScalarField>) -> Self {
        let exponent = sk.x
            + cfg_into_iter!(0..messages.len())
                .map(|i| messages[i] * sk.y[i])
                .sum::<E::ScalarField>();

        Self::combine(h.into_affine(), (h * exponent).into_affine())
    }

    fn check_message_count(
        messages: &[E::ScalarField],
        sk: &SecretKey<E::ScalarField>,
    ) -> Result<()> {
        if messages.len() != sk.y.len() {
            Err(SignatureError::MessageCountMismatch {
                received: messages.len(),
                expected: sk.y.len(),
            })?
        }

        Ok(())
    }
}
