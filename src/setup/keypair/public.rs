use alloc::vec::Vec;

use ark_ec::{pairing::Pairing, AffineRepr};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use core::iter::once;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{helpers::points, setup::SignatureParams};
use dock_crypto_utils::{join, serde_utils::ArkObjectBytes};

use super::SecretKey;

/// Verification key matching a [`SecretKey`]: `alpha = g2 * x`, `beta_i = g2 * y_i`. Keys of a
/// threshold federation share `g2` and combine component-wise.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct VerificationKey<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub g2: E::G2Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub alpha: E::G2Affine,
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub beta: Vec<E::G2Affine>,
}

impl<E: Pairing> VerificationKey<E> {
    /// Derives the verification key of the supplied secret key.
    pub fn new(
        SecretKey { x, y }: &SecretKey<E::ScalarField>,
        SignatureParams { g2, .. }: &SignatureParams<E>,
    ) -> Self {
        let (alpha, beta) = join!(g2.mul_bigint(x.into_bigint()).into(), points(g2, y));

        VerificationKey {
            g2: *g2,
            alpha,
            beta,
        }
    }

    /// Max amount of messages supported by this verification key.
    pub fn supported_message_count(&self) -> usize {
        self.beta.len()
    }

    /// Returns `true` if the key has no zero elements.
    pub fn is_valid(&self) -> bool {
        !once(&self.g2)
            .chain(once(&self.alpha))
            .chain(&self.beta)
            .any(AffineRepr::is_zero)
    }
}
