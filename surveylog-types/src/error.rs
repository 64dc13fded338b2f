/// Error type for decoding a session-log row into a record.
///
/// A wrong field count is not an error; see [`Decoded::NotARecord`](crate::Decoded).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// An integer field held something that is not an integer.
    #[error("Field '{field}' is not an integer: {text:?}")]
    InvalidInteger { field: &'static str, text: String },
}

impl CodecError {
    /// The schema name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInteger { field, .. } => field,
        }
    }
}

/// Error type for reading or writing a typed answer value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// Neither the answer nor the caller supplied a type tag.
    #[error("No type defined for answer '{uid}'")]
    MissingType { uid: String },

    /// The type tag is not one of the known question types.
    #[error("Unknown question type \"{0}\"")]
    UnknownType(String),

    /// The question type is known but cannot carry an answer value.
    #[error("\"{0}\" type is not supported")]
    Unsupported(String),

    /// A scalar could not be read as the required number.
    #[error("\"{tag}\" answer needs {expected}, got {text:?}")]
    Parse {
        tag: String,
        expected: &'static str,
        text: String,
    },

    /// The value has the wrong shape for this question type.
    #[error("\"{tag}\" answer needs to be {expected}")]
    Shape { tag: String, expected: &'static str },

    /// A sequence value decreases at `index`.
    #[error("\"{tag}\" needs to be an ascending list of numbers (element {index} is smaller than its predecessor)")]
    NotAscending { tag: String, index: usize },
}

impl ValueError {
    /// Check if this error is about the type tag rather than the value.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::MissingType { .. } | Self::UnknownType(_) | Self::Unsupported(_)
        )
    }

    /// Check if this error rejects the value itself (parse, shape or ordering).
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Shape { .. } | Self::NotAscending { .. }
        )
    }
}
