use secret_sharing_and_dkg::common::ShareId;

/// An error originated from params creation or key generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// Params must support at least one message.
    AtLeastOneMessageRequired,
    /// Supplied params carry no message generators.
    ParamsHaveNoMessageGenerators,
    /// Threshold key generation needs `1 <= threshold <= total`.
    InvalidThreshold { threshold: ShareId, total: ShareId },
}
