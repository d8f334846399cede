use thiserror::Error;

pub type Result<T> = core::result::Result<T, ValidationError>;

/// First contract violation found in an untyped record, with a dotted
/// field path such as `author.email` or `attachments[1].url`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value at `{path}`: {kind}")]
pub struct ValidationError {
    pub path: String,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViolationKind {
    #[error("required field is missing")]
    MissingField,
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{value}` is not an allowed value")]
    InvalidEnumValue { value: String },
    #[error("count must not be negative")]
    NegativeCount,
    #[error("malformed nested value")]
    MalformedNestedValue,
}

impl ValidationError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::MissingField,
        }
    }

    pub fn mismatch(path: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::TypeMismatch { expected, found },
        }
    }

    pub fn invalid_enum(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::InvalidEnumValue {
                value: value.into(),
            },
        }
    }

    pub fn negative(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::NegativeCount,
        }
    }

    pub fn malformed(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::MalformedNestedValue,
        }
    }
}
