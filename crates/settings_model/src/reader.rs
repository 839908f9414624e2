use crate::error::ReadError;
use crate::error::ValidationError;
use crate::model::SettingsModel;
use crate::registry;
use crate::source::Lookup;
use crate::source::ValueSource;
use crate::validate::Validate;
use crate::validate::Validation;

/// Reads keyed values from a source into typed, validated model instances.
///
/// Two modes are supported. [`read`](Self::read) is fail-fast: the first
/// unrecoverable problem is raised as a [`ReadError`]. With
/// [`read_collect`](Self::read_collect) the caller supplies an error sink;
/// data-quality problems accumulate there and a best-effort instance is
/// still returned, with failed fields left at their defaults. Programmer
/// errors (a model type with no mappable fields, duplicate source keys)
/// raise in both modes.
pub struct ModelReader<S> {
    source: S,
}

impl<S: ValueSource> ModelReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read a model in fail-fast mode.
    ///
    /// A validation failure carries the full violation list; the message is
    /// the single violation's text, or a count when there are several.
    pub fn read<T>(&self) -> Result<T, ReadError>
    where
        T: SettingsModel + Validate,
    {
        self.read_inner(None)
    }

    /// Read a model in collect mode.
    ///
    /// Coercion failures and rule violations are appended to `errors` and
    /// the populated instance is returned so the caller can inspect a
    /// partially valid object alongside its errors.
    pub fn read_collect<T>(&self, errors: &mut Vec<ValidationError>) -> Result<T, ReadError>
    where
        T: SettingsModel + Validate,
    {
        self.read_inner(Some(errors))
    }

    fn read_inner<T>(&self, mut sink: Option<&mut Vec<ValidationError>>) -> Result<T, ReadError>
    where
        T: SettingsModel + Validate,
    {
        let mappings = registry::mapping_set::<T>()?;

        let mut model = T::default();

        for mapping in mappings.iter() {
            match self.source.lookup(mapping.source_key()) {
                // Missing value. The validator reports required fields that
                // stayed unset; reporting here too would duplicate it.
                Lookup::NotFound => {}
                Lookup::Found(raw) => {
                    if let Err(coerce) = model.assign(mapping.field(), raw) {
                        let error =
                            ValidationError::field(coerce.detail(), mapping.field_name());
                        match sink.as_mut() {
                            Some(sink) => sink.push(error),
                            None => {
                                return Err(ReadError::Invalid {
                                    message: format!(
                                        "Cannot read the settings into {}.{}. {}",
                                        T::MODEL_NAME,
                                        mapping.field_name(),
                                        coerce.detail()
                                    ),
                                    errors: vec![error],
                                });
                            }
                        }
                    }
                }
            }
        }

        let validation = Validation::run(&model);
        if !validation.is_valid() {
            match sink {
                Some(sink) => sink.extend(validation.into_errors()),
                None => {
                    let errors = validation.into_errors();
                    let message = if errors.len() == 1 {
                        format!(
                            "Cannot read the settings into {}. {}",
                            T::MODEL_NAME,
                            errors[0].message()
                        )
                    } else {
                        format!(
                            "Cannot read the settings into {}. There are {} validation errors.",
                            T::MODEL_NAME,
                            errors.len()
                        )
                    };
                    return Err(ReadError::Invalid { message, errors });
                }
            }
        }

        Ok(model)
    }
}
