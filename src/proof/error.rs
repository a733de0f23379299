use alloc::string::String;

/// An error originated from the blind issuance request proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagesPoKError {
    IncompatibleEncryptionsAndProofs {
        encryptions: usize,
        proofs: usize,
    },
    TooManyCommittedMessages {
        committed: usize,
        max: usize,
    },
    FewerCommittedMessagesThanEncryptions {
        committed: usize,
        encryptions: usize,
    },
    /// The recomputed Fiat-Shamir challenge differs from the one carried by the proof.
    ChallengeMismatch,
    /// A witness shared between two relations produced diverging responses.
    SharedResponsesNotEqual {
        index: usize,
    },
    InvalidCommitmentProof(String),
    InvalidEncryptionProof {
        index: usize,
        error: String,
    },
    ProofGenerationFailed(String),
}

/// An error originated from showing a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignaturePoKError {
    NoBlindedMessages,
    TooManyBlindedMessages { received: usize, max: usize },
    ProofGenerationFailed(String),
}
