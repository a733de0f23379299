//! Scheme setup: public params, authority keypairs, and threshold key generation.

#[cfg(test)]
use alloc::vec::Vec;

mod error;
pub mod keygen;
mod keypair;
mod signature_params;

pub use error::*;
pub use keypair::*;
pub use signature_params::*;

/// **Not intended to be used anywhere except for tests.**
/// Initializes secret/verification key along with params and messages to be used in tests.
#[cfg(test)]
pub fn test_setup<E, D, R>(
    rng: &mut R,
    message_count: u32,
) -> (
    SecretKey<E::ScalarField>,
    VerificationKey<E>,
    SignatureParams<E>,
    Vec<E::ScalarField>,
)
where
    E: ark_ec::pairing::Pairing,
    D: digest::Digest,
    R: ark_std::rand::RngCore,
{
    use crate::helpers::n_rand;

    let params = SignatureParams::new::<D>(b"test", message_count).unwrap();
    let secret = SecretKey::rand(rng, message_count);
    let verification = VerificationKey::new(&secret, &params);
    let messages = n_rand(rng, message_count as usize).collect();

    (secret, verification, params, messages)
}
