use derive_more::{Display, Error};

/// Classified alignment failures. Engines return them wrapped into `eyre::Report`,
/// use `report.downcast_ref::<Error>()` to tell them apart.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
pub enum Error {
    /// The request can't be aligned as is: invalid coordinates, duplicated dots,
    /// incompatible alphabets and so on. Nothing was written to the sink.
    #[display("invalid input: {reason}")]
    InvalidInput { reason: String },
    /// The engine reached a state that the fill step should never produce.
    #[display("internal inconsistency: {reason}")]
    InternalInconsistency { reason: String },
}

impl Error {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::InternalInconsistency {
            reason: reason.into(),
        }
    }
}
