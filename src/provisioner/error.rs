use thiserror::Error;

use crate::types::TargetKind;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON format: {reason}")]
    InvalidJson { reason: String },

    #[error("Invalid YAML format: {reason}")]
    InvalidYaml { reason: String },

    #[error("Unknown configuration format")]
    UnknownFormat,

    #[error("Configuration root must be a mapping, found {found}")]
    NotAMapping { found: String },
}

/// Structural failure while building the typed plan. Decoding stops at the first.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("{field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("{field}: expected {expected}, got {value}")]
    InvalidValue {
        field: String,
        expected: &'static str,
        value: String,
    },

    #[error("{field}: neither playbook nor module is set")]
    MissingTarget { field: String },

    #[error("{field}: playbook and module are both set")]
    AmbiguousTarget { field: String },
}

/// One semantic finding. Validation collects every finding before reporting.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("{field}: expected {expected}, got {value}")]
    InvalidValue {
        field: String,
        expected: &'static str,
        value: String,
    },

    #[error("{field}: unsupported become method {method:?}")]
    UnsupportedBecomeMethod { field: String, method: String },

    #[error("{field}: playbook and module can't be used together")]
    AmbiguousTarget { field: String },

    #[error("{field}: playbook or module must be set")]
    MissingTarget { field: String },

    #[error("{field}: can't be used with {kind}")]
    FieldNotAllowed { field: String, kind: TargetKind },

    #[error("{field}: file {path} does not exist")]
    FileNotFound { field: String, path: String },

    #[error("{field}: not applicable when running locally")]
    LocalConflict { field: String },

    #[error("{field}: unknown field")]
    UnknownField { field: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationWarning {
    #[error("Nothing to play: no enabled play is free of errors")]
    NothingToPlay,
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Configuration is invalid: {}", format_errors(.errors))]
    Invalid { errors: Vec<ValidationError> },
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
