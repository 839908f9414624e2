use toml::Value;

use crate::error::CoerceError;
use crate::error::ValidationError;
use crate::mapping::FieldId;
use crate::mapping::FieldSpec;

/// The per-type contract generated by `#[derive(SettingsModel)]`.
///
/// Implementations are mechanical: a static table of field specs plus match
/// arms over field handles. Hand-written implementations are possible but
/// the derive macro is the supported path.
pub trait SettingsModel: Default + Sized + 'static {
    /// Short type name used in error messages.
    const MODEL_NAME: &'static str;

    /// Field specifications in declaration order.
    fn field_specs() -> &'static [FieldSpec];

    /// Coerce `raw` into the field's declared type and assign it.
    ///
    /// On failure the field keeps its current value.
    fn assign(&mut self, field: FieldId, raw: &Value) -> Result<(), CoerceError>;

    /// Field-level rule violations, evaluated in declaration order.
    fn field_violations(&self) -> Vec<ValidationError>;
}
