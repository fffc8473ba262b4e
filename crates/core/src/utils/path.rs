//! Path canonicalization used for scanner root paths and scan targets
//!
//! A root path from configuration goes through [`expand_vars`], [`expand_home`],
//! [`normalize`] and [`resolve`], in that order. Targets skip the two expansion
//! steps. Both end up in the same canonical form so that a plain string prefix
//! comparison between them is meaningful.

use regex::{Captures, Regex};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\w+|\{[^}]*\})").unwrap());

/// Expand `$NAME` and `${NAME}` from the process environment.
///
/// Unknown variables are left as written.
pub fn expand_vars(input: &str) -> String {
    expand_vars_with(input, |name| std::env::var(name).ok())
}

pub fn expand_vars_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ENV_VAR
        .replace_all(input, |caps: &Captures| {
            let name = caps[1].trim_start_matches('{').trim_end_matches('}');
            lookup(name).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Expand a leading `~` to the current user's home directory.
///
/// `~user` forms are not supported and are returned unchanged.
pub fn expand_home(input: &str) -> String {
    expand_home_with(input, dirs::home_dir().as_deref())
}

pub fn expand_home_with(input: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return input.to_string();
    };

    if input == "~" {
        home.to_string_lossy().into_owned()
    } else if let Some(rest) = input.strip_prefix("~/") {
        home.join(rest).to_string_lossy().into_owned()
    } else {
        input.to_string()
    }
}

/// Lexically collapse `.`, `..` and repeated separators.
///
/// `..` directly below the root is dropped, leading `..` of a relative path is
/// kept. The empty path normalizes to `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        PathBuf::from(".")
    } else {
        parts.iter().collect()
    }
}

/// Make `path` absolute and resolve symlinks.
///
/// Paths that don't exist are resolved up to their deepest existing ancestor,
/// the remaining components are appended as-is.
pub fn resolve(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&std::env::current_dir()?.join(path))
    };

    if let Ok(resolved) = absolute.canonicalize() {
        return Ok(resolved);
    }

    let mut missing = Vec::new();
    let mut existing = absolute.as_path();
    while let Some(parent) = existing.parent() {
        if let Some(name) = existing.file_name() {
            missing.push(name.to_os_string());
        }
        existing = parent;

        if let Ok(mut resolved) = existing.canonicalize() {
            resolved.extend(missing.iter().rev());
            return Ok(resolved);
        }
    }

    Ok(absolute)
}

/// Canonical form of a configured root path
pub fn canonical_root(raw: &str) -> io::Result<PathBuf> {
    let expanded = expand_home(&expand_vars(raw));
    resolve(&normalize(Path::new(&expanded)))
}

/// Canonical form of a scan target
pub fn canonical_target(path: &Path) -> io::Result<PathBuf> {
    resolve(&normalize(path))
}

/// Raw string prefix test, blind to path component boundaries
///
/// `/home/user2` starts with `/home/user`.
pub fn has_string_prefix(path: &Path, prefix: &Path) -> bool {
    path.as_os_str()
        .as_encoded_bytes()
        .starts_with(prefix.as_os_str().as_encoded_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "PROJECTS" => Some("/srv/projects".to_string()),
            "USER" => Some("alice".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_vars() {
        assert_eq!(expand_vars_with("$PROJECTS/fzsl", lookup), "/srv/projects/fzsl");
        assert_eq!(expand_vars_with("/home/${USER}/src", lookup), "/home/alice/src");
        assert_eq!(expand_vars_with("$UNSET/x", lookup), "$UNSET/x");
        assert_eq!(expand_vars_with("${UNSET}/x", lookup), "${UNSET}/x");
        assert_eq!(expand_vars_with("no vars here", lookup), "no vars here");
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/alice");
        assert_eq!(expand_home_with("~", Some(home)), "/home/alice");
        assert_eq!(expand_home_with("~/src", Some(home)), "/home/alice/src");
        assert_eq!(expand_home_with("~bob/src", Some(home)), "~bob/src");
        assert_eq!(expand_home_with("/opt/~/x", Some(home)), "/opt/~/x");
        assert_eq!(expand_home_with("~/src", None), "~/src");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a//b/./c/")), PathBuf::from("/a/b/c"));
        assert_eq!(normalize(Path::new("/a/b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("../a/./b/..")), PathBuf::from("../a"));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
        assert_eq!(normalize(Path::new("")), PathBuf::from("."));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_follows_symlinks() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir(&real).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let resolved = resolve(&link).unwrap();
        assert_eq!(resolved, real.canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_missing_tail() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not").join("there");

        let resolved = resolve(&missing).unwrap();
        let base = dir.path().canonicalize().unwrap();
        assert_eq!(resolved, base.join("not").join("there"));
    }

    #[test]
    fn test_string_prefix_ignores_boundaries() {
        assert!(has_string_prefix(Path::new("/home/user/src"), Path::new("/home/user")));
        assert!(has_string_prefix(Path::new("/home/user2"), Path::new("/home/user")));
        assert!(has_string_prefix(Path::new("/home/user"), Path::new("/home/user")));
        assert!(!has_string_prefix(Path::new("/home/use"), Path::new("/home/user")));
        assert!(!has_string_prefix(Path::new("/srv/home/user"), Path::new("/home/user")));
    }
}
