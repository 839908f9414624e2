mod error;
mod mapping;
mod model;
mod reader;
mod registry;
pub mod rules;
mod source;
mod tree;
mod validate;

// Re-export the public surface
pub use error::CoerceError;
pub use error::ReadError;
pub use error::ShapeError;
pub use error::SourceError;
pub use error::ValidationError;
pub use error::format_errors;
pub use mapping::FieldId;
pub use mapping::FieldMapping;
pub use mapping::FieldSpec;
pub use mapping::MappingSet;
pub use model::SettingsModel;
pub use reader::ModelReader;
pub use registry::mapping_set;
pub use settings_model_derive::SettingsModel;
pub use source::DictSource;
pub use source::KeyMatch;
pub use source::Lookup;
pub use source::ValueSource;
pub use tree::TreeSource;
pub use validate::Validate;
pub use validate::Validation;

// Raw values are TOML values; generated code refers to this re-export.
pub use toml::Value;
