use super::source::{ConfigSource, ConfigValue};
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// JSON configuration: an object whose members are scanner sections
#[derive(Debug, Clone)]
pub struct JsonSource {
    root: Map<String, Value>,
}

impl JsonSource {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    pub fn parse(contents: &str, origin: &str) -> Result<Self> {
        let parse_error = |message: String| Error::ConfigParse {
            origin: origin.to_string(),
            message,
        };

        let value: Value = serde_json::from_str(contents).map_err(|e| parse_error(e.to_string()))?;
        let Value::Object(root) = value else {
            return Err(parse_error("expected an object of sections".to_string()));
        };

        if let Some((key, _)) = root.iter().find(|(_, v)| !v.is_object()) {
            return Err(parse_error(format!(
                "top-level key '{key}' is not an object section"
            )));
        }

        Ok(Self { root })
    }
}

impl ConfigSource for JsonSource {
    fn sections(&self) -> Vec<String> {
        self.root.keys().cloned().collect()
    }

    fn get(&self, section: &str, key: &str) -> Option<ConfigValue> {
        let value = self.root.get(section)?.as_object()?.get(key)?;
        Some(match value {
            Value::String(s) => ConfigValue::String(s.clone()),
            Value::Number(n) if n.is_i64() => ConfigValue::Integer(n.as_i64()?),
            other => ConfigValue::Other {
                type_name: json_type_name(other).to_string(),
                text: other.to_string(),
            },
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
