use alloc::vec::Vec;

use ark_ff::{
    field_hashers::{DefaultFieldHasher, HashToField},
    PrimeField,
};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::helpers::{n_rand, rand};
use dock_crypto_utils::{
    aliases::{FullDigest, SyncIfParallel},
    join,
    serde_utils::ArkObjectBytes,
};

/// Signing key of a single authority, or one share of the federation key. A share is always the
/// evaluation of the dealer's polynomials at the authority's participant id.
#[serde_as]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
    Zeroize,
    ZeroizeOnDrop,
)]
pub struct SecretKey<F: PrimeField> {
    #[serde_as(as = "ArkObjectBytes")]
    pub x: F,
    /// One scalar per supported message.
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub y: Vec<F>,
}

impl<F: PrimeField> SecretKey<F> {
    const X_SALT: &'static [u8] = b"COCONUT-SIG-X-KEYGEN-SALT";
    const Y_SALT: &'static [u8] = b"COCONUT-SIG-Y-KEYGEN-SALT";

    /// Generates random secret key compatible with `message_count` messages.
    pub fn rand<R: RngCore>(rng: &mut R, message_count: u32) -> Self {
        let x = rand(rng);
        let y = n_rand(rng, message_count as usize).collect();

        Self { x, y }
    }

    /// Derives secret key compatible with `message_count` messages from the supplied seed.
    /// The same seed produces the same key.
    pub fn from_seed<D: FullDigest + SyncIfParallel>(seed: &[u8], message_count: u32) -> Self {
        let hasher = <DefaultFieldHasher<D> as HashToField<F>>::new;

        let (x, y) = join!(
            hasher(Self::X_SALT).hash_to_field(seed, 1).pop().unwrap(),
            hasher(Self::Y_SALT).hash_to_field(seed, message_count as usize)
        );

        Self { x, y }
    }

    /// Max amount of messages supported by this secret key.
    pub fn supported_message_count(&self) -> usize {
        self.y.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Fr;
    use blake2::Blake2b512;

    #[test]
    fn from_seed() {
        let seed = b"test-seed";
        let other_seed = b"other-seed";

        assert_eq!(
            SecretKey::<Fr>::from_seed::<Blake2b512>(seed, 10),
            SecretKey::<Fr>::from_seed::<Blake2b512>(seed, 10),
        );

        assert!(
            SecretKey::<Fr>::from_seed::<Blake2b512>(seed, 10)
                != SecretKey::<Fr>::from_seed::<Blake2b512>(other_seed, 10)
        );
    }
}
