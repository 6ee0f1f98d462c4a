//! Model-specific error types.

use mf_core::MfError;

/// Errors surfaced while validating and freezing a model tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Two direct children of the same group share a name.
    DuplicateChild { parent: String, name: String },

    /// A child name is empty or contains a path separator.
    BadChildName { parent: String, name: String },

    /// Two variables of the same component share a name.
    DuplicateVar { unit: String, name: String },

    /// A connection or driver path failed to parse.
    BadPath { path: String },

    /// A dotted path does not resolve to any variable.
    UnknownPath { path: String },

    /// A connection source is not an output.
    SourceNotOutput { path: String },

    /// A connection destination is not a param.
    DestNotParam { path: String },

    /// Connected endpoints hold values of different lengths.
    LengthMismatch {
        src: String,
        dst: String,
        src_len: usize,
        dst_len: usize,
    },

    /// A driver declaration must reference an output.
    DriverTargetNotOutput { path: String },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::DuplicateChild { parent, name } => {
                write!(f, "Group '{}' has two children named '{}'", parent, name)
            }
            ModelError::BadChildName { parent, name } => {
                write!(f, "Group '{}' has an invalid child name '{}'", parent, name)
            }
            ModelError::DuplicateVar { unit, name } => {
                write!(f, "Component '{}' declares '{}' twice", unit, name)
            }
            ModelError::BadPath { path } => {
                write!(f, "Malformed dotted path '{}'", path)
            }
            ModelError::UnknownPath { path } => {
                write!(f, "Path '{}' does not resolve to a variable", path)
            }
            ModelError::SourceNotOutput { path } => {
                write!(f, "Connection source '{}' is not an output", path)
            }
            ModelError::DestNotParam { path } => {
                write!(f, "Connection destination '{}' is not a param", path)
            }
            ModelError::LengthMismatch {
                src,
                dst,
                src_len,
                dst_len,
            } => {
                write!(
                    f,
                    "Cannot connect '{}' (len {}) to '{}' (len {})",
                    src, src_len, dst, dst_len
                )
            }
            ModelError::DriverTargetNotOutput { path } => {
                write!(f, "Driver declaration '{}' must reference an output", path)
            }
        }
    }
}

impl std::error::Error for ModelError {}

impl From<ModelError> for MfError {
    fn from(err: ModelError) -> Self {
        MfError::Invariant {
            what: Box::leak(err.to_string().into_boxed_str()),
        }
    }
}
