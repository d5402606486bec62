use crate::error::Result;
use crate::history::HistoryStore;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Place
// ---------------------------------------------------------------------------

/// A top-level workspace directory under `$HOME`, or on an ssh host when
/// `remote` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// ssh host alias; the place's directories live in that host's home.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

impl Place {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote: None,
        }
    }

    pub fn remote(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote: Some(host.into()),
        }
    }
}

fn default_places() -> Vec<Place> {
    vec![
        Place::local("github"),
        Place::local("iproov"),
        Place::remote("vmi", "vmi"),
        Place::local("other"),
    ]
}

fn default_editor() -> String {
    "code".to_string()
}

fn default_nested() -> Vec<String> {
    vec!["abc".to_string()]
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_places")]
    pub places: Vec<Place>,
    /// Directory holding the history records (default: `$HOME`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_dir: Option<PathBuf>,
    /// Maximum entries kept per history record (default: unbounded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    #[serde(default = "default_editor")]
    pub editor: String,
    /// Directory names whose children are offered as a second-level choice.
    #[serde(default = "default_nested")]
    pub nested: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            places: default_places(),
            history_dir: None,
            history_limit: None,
            editor: default_editor(),
            nested: default_nested(),
        }
    }
}

impl Config {
    /// Load the config at `path`, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    /// `explicit` wins, otherwise `~/.config/gcp-tools/config.yaml`.
    pub fn resolve_path(explicit: Option<&Path>, home: &Path) -> PathBuf {
        match explicit {
            Some(p) => p.to_path_buf(),
            None => paths::default_config_path(home),
        }
    }

    pub fn place(&self, name: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.name == name)
    }

    pub fn place_names(&self) -> Vec<String> {
        self.places.iter().map(|p| p.name.clone()).collect()
    }

    pub fn is_nested(&self, dir_name: &str) -> bool {
        self.nested.iter().any(|n| n == dir_name)
    }

    pub fn history_store(&self, home: &Path) -> HistoryStore {
        let dir = self
            .history_dir
            .clone()
            .unwrap_or_else(|| home.to_path_buf());
        HistoryStore::new(dir, self.history_limit)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.places.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "no places configured".to_string(),
            });
        }

        // Place names double as history namespaces
        let mut seen = HashSet::new();
        for place in &self.places {
            if paths::validate_namespace(&place.name).is_err() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("invalid place name '{}'", place.name),
                });
            }
            if !seen.insert(place.name.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("place '{}' is listed more than once", place.name),
                });
            }
            if matches!(place.remote.as_deref(), Some(h) if h.trim().is_empty()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("place '{}' has an empty remote host", place.name),
                });
            }
        }

        for marker in &self.nested {
            if marker.is_empty() || marker.contains('/') {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("invalid nested marker '{marker}'"),
                });
            }
        }

        if self.editor.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "editor is empty".to_string(),
            });
        }

        if self.history_limit == Some(0) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "history_limit is 0: selections will not be remembered".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
