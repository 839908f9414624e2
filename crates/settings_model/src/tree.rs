//! Adapter over a parsed configuration tree.
//!
//! Unlike [`crate::ModelReader`], which populates a model key by key, the
//! tree adapter lets serde bind a whole table at once and then runs the rule
//! validator over the result. Models bound through it should carry
//! `#[serde(default)]` so missing keys defer to rule validation instead of
//! failing the bind.

use serde::de::DeserializeOwned;
use toml::Table;
use toml::Value;

use crate::error::ValidationError;
use crate::model::SettingsModel;
use crate::validate::Validate;
use crate::validate::Validation;

/// A configuration tree backed by a TOML table.
#[derive(Debug, Clone)]
pub struct TreeSource {
    root: Table,
}

impl TreeSource {
    pub fn new(root: Table) -> Self {
        Self { root }
    }

    /// Parse a TOML document into a tree source.
    pub fn parse(document: &str) -> Result<Self, toml::de::Error> {
        Ok(Self {
            root: toml::from_str(document)?,
        })
    }

    /// Bind `section` (or the whole tree when `None`) into `T` and validate.
    ///
    /// A missing or empty section yields no instance and a single
    /// object-level "The configuration was not found." error. A binding
    /// failure yields no instance and the decode detail at object level.
    /// Otherwise the bound instance is returned together with its validation
    /// outcome.
    pub fn get_and_validate<T>(&self, section: Option<&str>) -> (Option<T>, Validation)
    where
        T: SettingsModel + Validate + DeserializeOwned,
    {
        let table = match section {
            Some(name) => match self.root.get(name) {
                Some(Value::Table(table)) => table,
                _ => return Self::not_found(),
            },
            None => &self.root,
        };

        if table.is_empty() {
            return Self::not_found();
        }

        match Value::Table(table.clone()).try_into::<T>() {
            Ok(model) => {
                let validation = Validation::run(&model);
                (Some(model), validation)
            }
            Err(e) => (
                None,
                Validation::from_errors(vec![ValidationError::object(e.to_string())]),
            ),
        }
    }

    fn not_found<T>() -> (Option<T>, Validation) {
        (
            None,
            Validation::from_errors(vec![ValidationError::object(
                "The configuration was not found.",
            )]),
        )
    }
}
