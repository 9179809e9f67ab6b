use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("Qualifying spend must be a non-negative number (got {raw:?}).")]
    InvalidPrimarySpend { raw: String },

    #[error("Unknown region code {code:?}.")]
    UnknownRegion { code: String },
}
