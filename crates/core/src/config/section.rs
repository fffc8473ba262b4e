use super::source::{ConfigSource, ConfigValue};
use crate::error::{ConfigErrorKind, Error, Result};

pub const KEY_CMD: &str = "cmd";
pub const KEY_DETECT_CMD: &str = "detect_cmd";
pub const KEY_ROOT_PATH: &str = "root_path";
pub const KEY_PRIORITY: &str = "priority";

/// Validated contents of one scanner section, before path resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerSection {
    pub cmd: String,
    pub detect_cmd: Option<String>,
    pub root_path: Option<String>,
    pub priority: Option<i64>,
}

impl ScannerSection {
    /// Read and validate `section` from `source`
    pub fn read(section: &str, source: &dyn ConfigSource) -> Result<Self> {
        if !source.has_option(section, KEY_CMD) {
            return Err(Error::configuration(section, ConfigErrorKind::MissingCommand));
        }

        let cmd = read_string(section, source, KEY_CMD)?.unwrap_or_default();
        if cmd.trim().is_empty() {
            return Err(Error::invalid_value(
                section,
                KEY_CMD,
                format!("{cmd:?}"),
                "command must not be empty",
            ));
        }

        Ok(Self {
            cmd,
            detect_cmd: read_string(section, source, KEY_DETECT_CMD)?,
            root_path: read_string(section, source, KEY_ROOT_PATH)?,
            priority: read_priority(section, source)?,
        })
    }
}

fn read_string(section: &str, source: &dyn ConfigSource, key: &str) -> Result<Option<String>> {
    match source.get(section, key) {
        None => Ok(None),
        Some(ConfigValue::String(s)) => Ok(Some(s)),
        Some(other) => Err(Error::invalid_value(
            section,
            key,
            other.to_string(),
            "expected a string",
        )),
    }
}

/// Priorities may be written as integers or as strings holding an integer
fn read_priority(section: &str, source: &dyn ConfigSource) -> Result<Option<i64>> {
    match source.get(section, KEY_PRIORITY) {
        None => Ok(None),
        Some(ConfigValue::Integer(i)) => Ok(Some(i)),
        Some(ConfigValue::String(s)) => s.trim().parse().map(Some).map_err(|_| {
            Error::invalid_value(section, KEY_PRIORITY, format!("{s:?}"), "expected an integer")
        }),
        Some(other) => Err(Error::invalid_value(
            section,
            KEY_PRIORITY,
            other.to_string(),
            "expected an integer",
        )),
    }
}
