//! Built-in scanners used when no configuration file exists

use super::toml_source::TomlSource;
use crate::error::Result;

pub const DEFAULT_CONFIG: &str = r#"# fzsl scanners
#
# Each section defines one scanner:
#   cmd         command printing candidate paths (required)
#   detect_cmd  command whose zero exit marks the scanner usable for a directory
#   root_path   directory that makes the scanner usable for everything below it;
#               scans always run from here
#   priority    higher wins, negative values are only used when named explicitly

[git]
cmd = "git ls-files"
detect_cmd = "git rev-parse --is-inside-work-tree"
priority = 10

[default]
cmd = "find . -type f -not -path '*/.git/*'"
priority = 0
"#;

pub fn default_source() -> Result<TomlSource> {
    TomlSource::parse(DEFAULT_CONFIG, "<built-in defaults>")
}
