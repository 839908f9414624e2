/// A reported rule violation: a message plus the model field names it
/// applies to. An empty member list marks an object-level error.
///
/// This is a reporting artifact handed to callers, not a raised failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
    members: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            message: message.into(),
            members,
        }
    }

    /// An error naming a single model field.
    pub fn field(message: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            members: vec![member.into()],
        }
    }

    /// An error that applies to the object as a whole.
    pub fn object(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            members: Vec::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The affected field names, in the order they were reported.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn is_object_level(&self) -> bool {
        self.members.is_empty()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Error type for model types that cannot be mapped at all.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ShapeError {
    #[error("The model type {type_name} has no mappable fields.")]
    NoFields { type_name: &'static str },

    #[error("The model type {type_name} maps the source key '{key}' more than once.")]
    DuplicateKey {
        type_name: &'static str,
        key: &'static str,
    },
}

/// Error type for value source construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("The collection of source values is empty.")]
    Empty,
}

/// A failed coercion of a raw value into a field's declared type.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{detail}")]
pub struct CoerceError {
    detail: String,
}

impl CoerceError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Error type for a failed read: either the model type is unusable, or the
/// populated instance did not survive coercion and validation.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("{message}")]
    Invalid {
        message: String,
        errors: Vec<ValidationError>,
    },
}

impl ReadError {
    /// The violations attached to the failure, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ReadError::Shape(_) => &[],
            ReadError::Invalid { errors, .. } => errors,
        }
    }
}

/// Format validation errors for terminal display.
pub fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    for error in errors {
        writeln!(&mut output, "\x1b[31mError\x1b[0m: {}", error.message()).ok();
        if !error.members().is_empty() {
            writeln!(&mut output, "  = fields: {}", error.members().join(", ")).ok();
        }
        writeln!(&mut output).ok();
    }

    output
}
