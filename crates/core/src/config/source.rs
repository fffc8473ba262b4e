use std::fmt;

/// A single value read from a configuration section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    /// Any other value type, kept as its textual form for diagnostics
    Other { type_name: String, text: String },
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{s:?}"),
            ConfigValue::Integer(i) => write!(f, "{i}"),
            ConfigValue::Other { text, .. } => f.write_str(text),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

/// Section based configuration, one section per scanner
pub trait ConfigSource {
    /// Section names in the order they appear in the source
    fn sections(&self) -> Vec<String>;

    fn has_option(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    fn get(&self, section: &str, key: &str) -> Option<ConfigValue>;
}

/// In-memory [`ConfigSource`] that keeps insertion order
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    sections: Vec<(String, Vec<(String, ConfigValue)>)>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section, replacing any earlier section with the same name
    pub fn section<I, K, V>(mut self, name: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ConfigValue>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        match self.sections.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = entries,
            None => self.sections.push((name.to_string(), entries)),
        }
        self
    }
}

impl ConfigSource for MapSource {
    fn sections(&self) -> Vec<String> {
        self.sections.iter().map(|(name, _)| name.clone()).collect()
    }

    fn get(&self, section: &str, key: &str) -> Option<ConfigValue> {
        self.sections
            .iter()
            .find(|(name, _)| name == section)?
            .1
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}
