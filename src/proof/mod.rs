//! Zero-knowledge proofs used by the issuance and showing protocols.
//!
//! Both proofs are non-interactive Σ-protocols over [`schnorr_pok`] primitives: each relation
//! gets a Schnorr commitment and responses, witnesses appearing in several relations reuse one
//! blinding so their responses must coincide, and the Fiat-Shamir challenge is recomputed by the
//! verifier from the domain-separated transcript carried alongside.

use ark_ec::AffineRepr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use schnorr_pok::{error::SchnorrError, SchnorrCommitment, SchnorrResponse};

use dock_crypto_utils::serde_utils::ArkObjectBytes;

mod error;
pub mod messages_pok;
pub mod signature_pok;

pub use error::*;
pub use messages_pok::MessagesPoK;
pub use signature_pok::SignaturePoK;

/// A single proven relation: the commitment `t` to the blindings together with the responses
/// produced for the protocol challenge.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub(crate) struct SchnorrProof<G: AffineRepr> {
    #[serde_as(as = "ArkObjectBytes")]
    pub t: G,
    pub response: SchnorrResponse<G>,
}

impl<G: AffineRepr> SchnorrProof<G> {
    /// Finishes the post-challenge phase for `commitment` over the given witnesses.
    pub fn new(
        commitment: &SchnorrCommitment<G>,
        witnesses: &[G::ScalarField],
        challenge: &G::ScalarField,
    ) -> Result<Self, SchnorrError> {
        Ok(Self {
            t: commitment.t,
            response: commitment.response(witnesses, challenge)?,
        })
    }

    /// Checks the relation `y = \sum_i(bases_i * witnesses_i)` against this proof.
    pub fn verify(
        &self,
        bases: &[G],
        y: &G,
        challenge: &G::ScalarField,
    ) -> Result<(), SchnorrError> {
        self.response.is_valid(bases, y, &self.t, challenge)
    }
}
