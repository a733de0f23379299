use alloc::string::String;

use secret_sharing_and_dkg::common::ParticipantId;

use crate::proof::MessagesPoKError;

/// An error originated from `Signature`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    MessageCountMismatch { received: usize, expected: usize },
}

/// An error originated from the blind issuance pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlindSignatureError {
    /// A request must blind at least one message.
    NoBlindedMessages,
    /// The request carries more messages than the params or the signing key support.
    TooManyMessages { received: usize, max: usize },
    /// The request proof was rejected or could not be produced.
    Proof(MessagesPoKError),
    Serialization(String),
}

impl From<MessagesPoKError> for BlindSignatureError {
    fn from(err: MessagesPoKError) -> Self {
        Self::Proof(err)
    }
}

/// An error originated from aggregating partial signatures or verification keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    NoSignatures,
    NoVerificationKeys,
    /// Partial signatures must share `sigma_1`; the one at this position does not.
    DivergentSigma1 { index: usize },
    ZeroParticipantId,
    DuplicateParticipantId(ParticipantId),
    /// Keys must agree on `g2` and on the supported message count.
    IncompatibleVerificationKeys { index: usize },
}
