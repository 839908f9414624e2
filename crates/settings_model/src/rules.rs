//! Declarative rule checks evaluated against populated models.
//!
//! The `field_violations` implementations generated by
//! `#[derive(SettingsModel)]` call into these checks; the vocabulary here is
//! what `#[settings(...)]` attributes can express. The validator itself does
//! not know individual rules, it only collects violations.

use crate::error::ValidationError;
use crate::model::SettingsModel;
use crate::validate::Validate;
use crate::validate::Validation;

/// Types that can tell whether a required field was left unpopulated.
///
/// An empty string counts as missing, matching the common convention that a
/// blank setting is no setting.
pub trait RequiredValue {
    fn is_missing(&self) -> bool;
}

impl RequiredValue for String {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T> RequiredValue for Option<T> {
    fn is_missing(&self) -> bool {
        self.is_none()
    }
}

/// Types with a length the max-length rule can measure.
pub trait MaxLengthValue {
    fn rule_len(&self) -> usize;
}

impl MaxLengthValue for String {
    fn rule_len(&self) -> usize {
        self.chars().count()
    }
}

impl<T> MaxLengthValue for Vec<T> {
    fn rule_len(&self) -> usize {
        self.len()
    }
}

// An absent value never violates a length bound.
impl<T: MaxLengthValue> MaxLengthValue for Option<T> {
    fn rule_len(&self) -> usize {
        self.as_ref().map_or(0, MaxLengthValue::rule_len)
    }
}

pub fn required<V: RequiredValue>(value: &V, field: &str) -> Option<ValidationError> {
    if value.is_missing() {
        Some(ValidationError::field(
            format!("The {field} field is required."),
            field,
        ))
    } else {
        None
    }
}

pub fn max_length<V: MaxLengthValue>(
    value: &V,
    field: &str,
    max: usize,
) -> Option<ValidationError> {
    if value.rule_len() > max {
        Some(ValidationError::field(
            format!(
                "The field {field} must be a string or array type with a maximum length of '{max}'."
            ),
            field,
        ))
    } else {
        None
    }
}

/// Recurse into a nested validatable field.
///
/// Inner violations are summarized as a single error at the outer field;
/// inner member names never escape.
pub fn nested<M: SettingsModel + Validate>(value: &M, field: &str) -> Option<ValidationError> {
    if Validation::run(value).is_valid() {
        None
    } else {
        Some(ValidationError::field(
            format!("The field {field} references an object that failed validation."),
            field,
        ))
    }
}

pub fn nested_opt<M: SettingsModel + Validate>(
    value: &Option<M>,
    field: &str,
) -> Option<ValidationError> {
    value.as_ref().and_then(|inner| nested(inner, field))
}
