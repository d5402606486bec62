use crate::error::{GcpError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CONFIG_DIR: &str = ".config/gcp-tools";
pub const CONFIG_FILE: &str = ".config/gcp-tools/config.yaml";

pub const HISTORY_FILE_PREFIX: &str = ".vs_history-";

/// Namespace of the top-level place history.
pub const PLACES_NAMESPACE: &str = "places";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn home_dir() -> Result<PathBuf> {
    home::home_dir()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(GcpError::HomeNotFound)
}

pub fn default_config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

pub fn history_file(dir: &Path, namespace: &str) -> PathBuf {
    dir.join(format!("{HISTORY_FILE_PREFIX}{namespace}"))
}

/// History namespace for a nested level below `place`, e.g. `github-abc`.
pub fn nested_namespace(place: &str, marker: &str) -> String {
    format!("{place}-{marker}")
}

/// Replace a leading `home` with `~`.
pub fn tilde(path: &str, home: &Path) -> String {
    let home = home.to_string_lossy();
    if path == home {
        return "~".to_string();
    }
    match path.strip_prefix(&format!("{home}/")) {
        Some(rest) => format!("~/{rest}"),
        None => path.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Namespace validation
// ---------------------------------------------------------------------------

static NAMESPACE_RE: OnceLock<Regex> = OnceLock::new();

fn namespace_re() -> &'static Regex {
    NAMESPACE_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._\-]*$").unwrap())
}

/// Namespaces become file-name suffixes, so they must not contain separators.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() || namespace.len() > 64 || !namespace_re().is_match(namespace) {
        return Err(GcpError::InvalidNamespace(namespace.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_namespaces() {
        for ns in ["places", "github", "github-abc", "v1.2", "my_place"] {
            validate_namespace(ns).unwrap_or_else(|_| panic!("expected valid: {ns}"));
        }
    }

    #[test]
    fn invalid_namespaces() {
        for ns in ["", "-dash", "a/b", "..", ".hidden", "has space"] {
            assert!(validate_namespace(ns).is_err(), "expected invalid: {ns}");
        }
    }

    #[test]
    fn path_helpers() {
        let home = Path::new("/home/me");
        assert_eq!(
            default_config_path(home),
            PathBuf::from("/home/me/.config/gcp-tools/config.yaml")
        );
        assert_eq!(
            history_file(home, "places"),
            PathBuf::from("/home/me/.vs_history-places")
        );
        assert_eq!(nested_namespace("github", "abc"), "github-abc");
    }

    #[test]
    fn tilde_abbreviates_home() {
        let home = Path::new("/home/me");
        assert_eq!(tilde("/home/me/bin", home), "~/bin");
        assert_eq!(tilde("/home/me", home), "~");
        assert_eq!(tilde("/home/meow/bin", home), "/home/meow/bin");
        assert_eq!(tilde("/usr/bin", home), "/usr/bin");
    }
}
