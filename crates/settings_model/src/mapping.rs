use crate::error::ShapeError;

/// Opaque handle to a model field, consumed by the generated assignment code.
///
/// The value is the field's declaration index within its model type.
pub type FieldId = usize;

/// Static description of one model field, emitted in declaration order by
/// `#[derive(SettingsModel)]`.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// The model field's own name.
    pub name: &'static str,
    /// Explicit external key from `#[settings(key = "...")]`, when present.
    pub key: Option<&'static str>,
    /// Whether the field carries a required rule.
    pub required: bool,
}

/// Association between a model field and the key used to look up its value
/// in a source. Immutable once derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    source_key: &'static str,
    field_name: &'static str,
    required: bool,
    field: FieldId,
}

impl FieldMapping {
    pub fn source_key(&self) -> &'static str {
        self.source_key
    }

    pub fn field_name(&self) -> &'static str {
        self.field_name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn field(&self) -> FieldId {
        self.field
    }
}

/// The full set of field mappings for one model type, in declaration order.
///
/// Derived once per type and shared read-only afterwards; see
/// [`crate::mapping_set`].
#[derive(Debug)]
pub struct MappingSet {
    type_name: &'static str,
    mappings: Vec<FieldMapping>,
}

impl MappingSet {
    /// Build a mapping set from a model type's field specs.
    ///
    /// Fails when the type exposes no fields, and when two fields resolve to
    /// the same source key. Source keys are compared exactly here; the
    /// configured key matching of a source does not loosen this check.
    pub fn from_specs(
        type_name: &'static str,
        specs: &[FieldSpec],
    ) -> Result<Self, ShapeError> {
        if specs.is_empty() {
            return Err(ShapeError::NoFields { type_name });
        }

        let mut mappings: Vec<FieldMapping> = Vec::with_capacity(specs.len());
        for (field, spec) in specs.iter().enumerate() {
            let source_key = spec.key.unwrap_or(spec.name);
            if mappings.iter().any(|m| m.source_key == source_key) {
                return Err(ShapeError::DuplicateKey {
                    type_name,
                    key: source_key,
                });
            }

            mappings.push(FieldMapping {
                source_key,
                field_name: spec.name,
                required: spec.required,
                field,
            });
        }

        Ok(Self {
            type_name,
            mappings,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Mappings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldMapping> {
        self.mappings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spec_list_is_rejected() {
        let result = MappingSet::from_specs("Empty", &[]);
        assert!(matches!(
            result,
            Err(ShapeError::NoFields { type_name: "Empty" })
        ));
    }

    #[test]
    fn test_explicit_key_overrides_field_name() {
        let specs = [
            FieldSpec {
                name: "banana",
                key: Some("Apple"),
                required: false,
            },
            FieldSpec {
                name: "contains_period",
                key: Some("Contains.Period"),
                required: true,
            },
        ];

        let set = MappingSet::from_specs("Fruit", &specs).unwrap();
        let mappings: Vec<_> = set.iter().collect();

        assert_eq!(set.len(), 2);
        assert_eq!(mappings[0].source_key(), "Apple");
        assert_eq!(mappings[0].field_name(), "banana");
        assert!(!mappings[0].is_required());
        assert_eq!(mappings[1].source_key(), "Contains.Period");
        assert!(mappings[1].is_required());
    }

    #[test]
    fn test_field_handles_follow_declaration_order() {
        let specs = [
            FieldSpec {
                name: "first",
                key: None,
                required: false,
            },
            FieldSpec {
                name: "second",
                key: None,
                required: false,
            },
        ];

        let set = MappingSet::from_specs("Ordered", &specs).unwrap();
        let fields: Vec<_> = set.iter().map(|m| m.field()).collect();
        assert_eq!(fields, [0, 1]);
    }

    #[test]
    fn test_duplicate_source_key_is_rejected() {
        let specs = [
            FieldSpec {
                name: "first",
                key: Some("Same"),
                required: false,
            },
            FieldSpec {
                name: "second",
                key: Some("Same"),
                required: false,
            },
        ];

        let result = MappingSet::from_specs("Duplicated", &specs);
        assert!(matches!(
            result,
            Err(ShapeError::DuplicateKey { key: "Same", .. })
        ));
    }
}
