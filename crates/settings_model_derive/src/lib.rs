use proc_macro::TokenStream;
use syn::DeriveInput;
use syn::parse_macro_input;

mod generate;

/// Derive macro wiring a model struct into the settings pipeline.
///
/// Generates the `SettingsModel` implementation: a static field-spec table
/// in declaration order, the per-field coercion/assignment code, and the
/// field-level rule checks. Object-level checks stay manual via the
/// `Validate` trait.
///
/// # Attributes
///
/// - `#[settings(key = "External.Name")]`: look the field up under an
///   explicit source key instead of the field's own name
/// - `#[settings(required)]`: the field must be populated; empty strings and
///   `None` count as missing
/// - `#[settings(max_length = N)]`: bound the length of a string or vector
///   field
/// - `#[settings(nested)]`: the field is itself a model; validation recurses
///   into it and summarizes any inner failure as a single error at this
///   field
///
/// # Example
///
/// ```ignore
/// use settings_model::SettingsModel;
/// use settings_model::Validate;
///
/// #[derive(Debug, Default, SettingsModel)]
/// struct AppSettings {
///     #[settings(required)]
///     endpoint: String,
///     #[settings(key = "Api.Key", required)]
///     api_key: String,
///     #[settings(max_length = 16)]
///     label: String,
/// }
///
/// impl Validate for AppSettings {}
/// ```
#[proc_macro_derive(SettingsModel, attributes(settings))]
pub fn derive_settings_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate::expand_settings_model(input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
