//! Process-wide cache of derived mapping sets, keyed by type identity.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::OnceLock;
use std::sync::RwLock;

use crate::error::ShapeError;
use crate::mapping::MappingSet;
use crate::model::SettingsModel;

static REGISTRY: OnceLock<RwLock<HashMap<TypeId, &'static MappingSet>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<TypeId, &'static MappingSet>> {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Derive, or fetch the cached, mapping set for `T`.
///
/// The first successful derivation is published for the process lifetime;
/// when two threads race on the same type, the first published set wins and
/// the loser's derivation is discarded.
pub fn mapping_set<T: SettingsModel>() -> Result<&'static MappingSet, ShapeError> {
    let registry = registry();

    if let Some(set) = registry.read().unwrap().get(&TypeId::of::<T>()).copied() {
        return Ok(set);
    }

    let set = MappingSet::from_specs(T::MODEL_NAME, T::field_specs())?;

    let mut map = registry.write().unwrap();
    Ok(*map
        .entry(TypeId::of::<T>())
        .or_insert_with(|| Box::leak(Box::new(set))))
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::*;
    use crate::error::CoerceError;
    use crate::error::ValidationError;
    use crate::mapping::FieldId;
    use crate::mapping::FieldSpec;
    use crate::rules;

    #[derive(Debug, Default)]
    struct Sample {
        name: String,
    }

    impl SettingsModel for Sample {
        const MODEL_NAME: &'static str = "Sample";

        fn field_specs() -> &'static [FieldSpec] {
            const SPECS: &[FieldSpec] = &[FieldSpec {
                name: "name",
                key: None,
                required: true,
            }];
            SPECS
        }

        fn assign(&mut self, field: FieldId, raw: &Value) -> Result<(), CoerceError> {
            match field {
                0 => match raw.clone().try_into::<String>() {
                    Ok(value) => {
                        self.name = value;
                        Ok(())
                    }
                    Err(e) => Err(CoerceError::new(e.to_string())),
                },
                _ => Ok(()),
            }
        }

        fn field_violations(&self) -> Vec<ValidationError> {
            let mut violations = Vec::new();
            if let Some(error) = rules::required(&self.name, "name") {
                violations.push(error);
            }
            violations
        }
    }

    #[derive(Debug, Default)]
    struct Bare;

    impl SettingsModel for Bare {
        const MODEL_NAME: &'static str = "Bare";

        fn field_specs() -> &'static [FieldSpec] {
            &[]
        }

        fn assign(&mut self, _field: FieldId, _raw: &Value) -> Result<(), CoerceError> {
            Ok(())
        }

        fn field_violations(&self) -> Vec<ValidationError> {
            Vec::new()
        }
    }

    #[test]
    fn test_mapping_set_is_cached() {
        let first = mapping_set::<Sample>().unwrap();
        let second = mapping_set::<Sample>().unwrap();

        assert!(std::ptr::eq(first, second));
        assert_eq!(first.len(), 1);
        assert_eq!(first.iter().next().unwrap().source_key(), "name");
    }

    #[test]
    fn test_zero_field_type_always_fails() {
        let result = mapping_set::<Bare>();
        assert!(matches!(result, Err(ShapeError::NoFields { .. })));

        // Failed derivations are never published.
        let again = mapping_set::<Bare>();
        assert!(again.is_err());
    }
}
