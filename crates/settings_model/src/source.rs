use toml::Value;

use crate::error::SourceError;

/// Outcome of a source lookup.
///
/// A missing key is an explicit variant rather than an error: the reader
/// skips it and lets the validator report any required-field violation.
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'a> {
    Found(&'a Value),
    NotFound,
}

/// Anything that can answer "what raw value corresponds to this source key".
pub trait ValueSource {
    fn lookup(&self, key: &str) -> Lookup<'_>;
}

/// How source entry keys are matched against mapping keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyMatch {
    /// Exact, case-sensitive comparison.
    Exact,
    /// Unicode case-insensitive comparison.
    #[default]
    IgnoreCase,
}

impl KeyMatch {
    fn matches(self, entry_key: &str, source_key: &str) -> bool {
        match self {
            KeyMatch::Exact => entry_key == source_key,
            KeyMatch::IgnoreCase => entry_key.to_lowercase() == source_key.to_lowercase(),
        }
    }
}

/// An in-memory keyed collection of raw values.
///
/// Entries keep their insertion order. When [`KeyMatch::IgnoreCase`] makes
/// several entries match one key, the first inserted entry wins; this is a
/// documented policy, not an accident of iteration order.
#[derive(Debug, Clone)]
pub struct DictSource {
    entries: Vec<(String, Value)>,
    key_match: KeyMatch,
}

impl DictSource {
    /// Build a source from a non-empty keyed collection.
    ///
    /// An empty collection can never satisfy a mapping, so it is rejected
    /// here rather than at read time.
    pub fn new<I, K>(entries: I) -> Result<Self, SourceError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let entries: Vec<(String, Value)> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();

        if entries.is_empty() {
            return Err(SourceError::Empty);
        }

        Ok(Self {
            entries,
            key_match: KeyMatch::default(),
        })
    }

    pub fn with_key_match(mut self, key_match: KeyMatch) -> Self {
        self.key_match = key_match;
        self
    }

    pub fn key_match(&self) -> KeyMatch {
        self.key_match
    }
}

impl ValueSource for DictSource {
    fn lookup(&self, key: &str) -> Lookup<'_> {
        match self
            .entries
            .iter()
            .find(|(entry_key, _)| self.key_match.matches(entry_key, key))
        {
            Some((_, value)) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: &str) -> (String, Value) {
        (key.to_string(), Value::String(value.to_string()))
    }

    #[test]
    fn test_empty_collection_fails_at_construction() {
        let result = DictSource::new(Vec::<(String, Value)>::new());
        assert!(matches!(result, Err(SourceError::Empty)));
    }

    #[test]
    fn test_lookup_ignores_case_by_default() {
        let source = DictSource::new([entry("needed", "Yellow")]).unwrap();

        match source.lookup("Needed") {
            Lookup::Found(value) => assert_eq!(value.as_str(), Some("Yellow")),
            Lookup::NotFound => panic!("expected a match"),
        }
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let source = DictSource::new([entry("needed", "Yellow")])
            .unwrap()
            .with_key_match(KeyMatch::Exact);

        assert!(matches!(source.lookup("Needed"), Lookup::NotFound));
        assert!(matches!(source.lookup("needed"), Lookup::Found(_)));
    }

    #[test]
    fn test_first_inserted_entry_wins_under_loose_matching() {
        let source =
            DictSource::new([entry("Needed", "first"), entry("needed", "second")]).unwrap();

        match source.lookup("NEEDED") {
            Lookup::Found(value) => assert_eq!(value.as_str(), Some("first")),
            Lookup::NotFound => panic!("expected a match"),
        }
    }
}
