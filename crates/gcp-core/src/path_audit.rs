//! `$PATH` inspection: executables per entry, missing and repeated entries,
//! and executables hidden behind an earlier entry with the same name.

use crate::error::{GcpError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathEntry {
    pub dir: String,
    pub exists: bool,
    pub executables: usize,
    /// The same directory appeared earlier in `$PATH`.
    pub duplicate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shadow {
    pub name: String,
    /// Directories providing `name`, in `$PATH` order. The first one wins.
    pub dirs: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PathReport {
    pub entries: Vec<PathEntry>,
    pub shadows: Vec<Shadow>,
}

/// Audit a `:`-separated search path.
pub fn audit(path_var: &str) -> Result<PathReport> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut providers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut entries = Vec::new();

    for dir in path_var.split(':') {
        let duplicate = !seen.insert(dir);
        let names = match executables_in(Path::new(dir)) {
            Ok(names) => Some(names),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(GcpError::PathEntry {
                    path: dir.to_string(),
                    source,
                })
            }
        };

        let exists = names.is_some();
        let names = names.unwrap_or_default();
        if !duplicate {
            for name in &names {
                providers
                    .entry(name.clone())
                    .or_default()
                    .push(dir.to_string());
            }
        }
        tracing::debug!(dir, exists, executables = names.len(), duplicate, "path entry");
        entries.push(PathEntry {
            dir: dir.to_string(),
            exists,
            executables: names.len(),
            duplicate,
        });
    }

    let shadows = providers
        .into_iter()
        .filter(|(_, dirs)| dirs.len() > 1)
        .map(|(name, dirs)| Shadow { name, dirs })
        .collect();

    Ok(PathReport { entries, shadows })
}

fn executables_in(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // Dangling symlinks have no target metadata; they can't be run anyway
        let Ok(meta) = std::fs::metadata(entry.path()) else {
            continue;
        };
        if meta.is_file() && is_executable(&meta) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

#[cfg(unix)]
fn is_executable(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &std::fs::Metadata) -> bool {
    true
}
