//! Threshold anonymous credentials with blind issuance based on the [Coconut](https://arxiv.org/abs/1802.07344)
//! selective-disclosure credential scheme.
//!
//! A federation of `n` authorities jointly issues short randomizable signatures over a vector of
//! messages; any `t` of the `n` partial credentials reconstruct a valid one via Lagrange
//! interpolation in the exponent. Messages can be blinded during issuance: the requester commits
//! to them, encrypts the blinded ones under a lifted ElGamal key and proves consistency, so a
//! signer produces a valid partial credential without ever seeing the blinded values.
//!
//! The overall flow:
//!
//! 1. [`SignatureParams`] are derived from a public label.
//! 2. Each authority gets a keypair from [`keygen`], or a trusted dealer shares one with [`deal`].
//! 3. The requester builds a [`BlindSignRequest`], each authority answers with a
//!    [`BlindSignature`], and the requester unblinds it into a [`Signature`].
//! 4. Partial credentials and verification keys are combined with [`AggregatedSignature`] and
//!    [`VerificationKey::aggregate_threshold`], then randomized.
//! 5. The credential is shown with a [`SignaturePoK`] which reveals only the chosen messages.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod elgamal;
mod helpers;
pub mod proof;
pub mod setup;
pub mod signature;

#[cfg(test)]
mod tests;

pub use proof::*;
pub use setup::{
    keygen::{deal, keygen},
    SecretKey, SetupError, SignatureParams, VerificationKey,
};
pub use signature::*;
