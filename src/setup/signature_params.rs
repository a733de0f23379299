use alloc::vec::Vec;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_into_iter, cfg_iter, rand::RngCore, UniformRand};
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use dock_crypto_utils::{
    concat_slices, hashing_utils::projective_group_elem_from_try_and_incr,
    serde_utils::ArkObjectBytes,
};

use super::SetupError;

/// Public params shared by all authorities and requesters. Size is proportional to the maximum
/// number of messages a credential can carry, which is fixed at creation.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct SignatureParams<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub g1: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub g2: E::G2Affine,
    /// One independent `G1` generator per supported message.
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub h: Vec<E::G1Affine>,
}

impl<E: Pairing> SignatureParams<E> {
    /// Derives params supporting `message_count` messages by hashing a public label. The
    /// derivation is deterministic, so distinct authorities obtain identical params from the
    /// same label, and no party knows a discrete log relation between the generators.
    pub fn new<D: Digest>(label: &[u8], message_count: u32) -> Result<Self, SetupError> {
        if message_count == 0 {
            Err(SetupError::AtLeastOneMessageRequired)?
        }

        let g1 = projective_group_elem_from_try_and_incr::<E::G1Affine, D>(&concat_slices![
            label, b" : g1"
        ]);
        let g2 = projective_group_elem_from_try_and_incr::<E::G2Affine, D>(&concat_slices![
            label, b" : g2"
        ]);
        let h = cfg_into_iter!(1..=message_count)
            .map(|i| {
                projective_group_elem_from_try_and_incr::<E::G1Affine, D>(&concat_slices![
                    label,
                    b" : h_",
                    i.to_le_bytes()
                ])
            })
            .collect::<Vec<_>>();

        Ok(Self {
            g1: g1.into_affine(),
            g2: g2.into_affine(),
            h: E::G1::normalize_batch(&h),
        })
    }

    /// Generates params supporting `message_count` messages using a random number generator.
    pub fn generate_using_rng<R: RngCore>(
        rng: &mut R,
        message_count: u32,
    ) -> Result<Self, SetupError> {
        if message_count == 0 {
            Err(SetupError::AtLeastOneMessageRequired)?
        }

        let h: Vec<_> = (0..message_count).map(|_| E::G1::rand(rng)).collect();

        Ok(Self {
            g1: E::G1::rand(rng).into_affine(),
            g2: E::G2::rand(rng).into_affine(),
            h: E::G1::normalize_batch(&h),
        })
    }

    /// Maximum number of messages a credential issued under these params can carry.
    pub fn supported_message_count(&self) -> usize {
        self.h.len()
    }

    /// Returns `true` if no generator is the group identity.
    pub fn is_valid(&self) -> bool {
        !(self.g1.is_zero()
            || self.g2.is_zero()
            || self.h.is_empty()
            || cfg_iter!(self.h).any(AffineRepr::is_zero))
    }
}
