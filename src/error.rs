use crate::core::field::Field;
use crate::state::validation::ErrorMap;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("unknown preset `{0}` (expected `unpas` or `compact`)")]
    UnknownPreset(String),
}

/// Faults raised by the store when a caller breaks the form's contract.
/// These are not reachable from the fixed catalogs in normal use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown interest key `{0}`")]
    UnknownInterest(String),
    #[error("field `{field}` expects a {expected} value")]
    TypeMismatch { field: Field, expected: &'static str },
    #[error("`{value}` is not a valid choice for `{field}`")]
    InvalidChoice { field: Field, value: String },
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("a submission is in flight")]
    Busy,
    #[error("nothing to reset; no lead has been submitted yet")]
    NotSubmitted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("no submission endpoint configured")]
    MissingEndpoint,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server responded with status {code}: {message}")]
    Status { code: u16, message: String },
    #[error("{message}")]
    Rejected { message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Reasons a submit request never reached the sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(ErrorMap),
    #[error("a submission is already in flight")]
    Busy,
    #[error("lead already submitted; reset before submitting again")]
    AlreadySubmitted,
}
