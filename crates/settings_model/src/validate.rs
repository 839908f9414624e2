use crate::error::ValidationError;
use crate::model::SettingsModel;

/// Trait for validating object-level constraints on a model.
///
/// Field-level rules come from `#[settings(...)]` attributes and are checked
/// automatically. Implement this trait for relationships between fields that
/// a single field rule cannot express, for example one field referencing
/// another. Object-level checks run after all field-level checks.
///
/// The default implementation performs no validation.
///
/// ## Example
///
/// ```ignore
/// impl Validate for PortRange {
///     fn validate(&self) -> Vec<ValidationError> {
///         if self.low > self.high {
///             vec![ValidationError::object("low must not exceed high")]
///         } else {
///             Vec::new()
///         }
///     }
/// }
/// ```
pub trait Validate {
    fn validate(&self) -> Vec<ValidationError> {
        Vec::new()
    }
}

/// Outcome of validating a populated model: the collected violations, in
/// evaluation order (field rules in declaration order, then object-level
/// rules). The error list is always present, possibly empty.
#[derive(Debug, Clone)]
pub struct Validation {
    errors: Vec<ValidationError>,
}

impl Validation {
    /// Run every declared rule for `model` and collect the violations.
    pub fn run<T: SettingsModel + Validate>(model: &T) -> Self {
        let mut errors = model.field_violations();
        errors.extend(Validate::validate(model));
        Self { errors }
    }

    pub(crate) fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}
