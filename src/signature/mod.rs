//! Randomizable Pointcheval-Sanders style signatures used as credentials, their blind issuance,
//! and threshold aggregation.

mod aggregated_signature;
mod blind_signature;
mod error;
mod ps_signature;

pub use aggregated_signature::AggregatedSignature;
pub use blind_signature::*;
pub use error::{AggregationError, BlindSignatureError, SignatureError};
pub use ps_signature::Signature;
