//! Candidate directories for a place and the command that opens a choice.
//!
//! Candidates are relative to the place's home and always end in `/`, the
//! shape `ls -d1 */` produces: `github/foo/` locally, `foo/` on a remote
//! host. Remote listings go through `ssh <host>`.

use crate::config::Place;
use crate::error::{GcpError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Local { home: PathBuf },
    Remote { host: String, home: String },
}

impl Location {
    /// Remote places ask the host for its home directory.
    pub fn resolve(place: &Place, local_home: &Path) -> Result<Self> {
        match &place.remote {
            None => Ok(Location::Local {
                home: local_home.to_path_buf(),
            }),
            Some(host) => {
                let home = ssh(host, &["pwd"])?.trim().to_string();
                tracing::debug!(host, home, "remote home");
                Ok(Location::Remote {
                    host: host.clone(),
                    home,
                })
            }
        }
    }

    /// Prefix of the first listing: `<place>/` locally, the home itself remotely.
    pub fn root_prefix(&self, place: &Place) -> String {
        match self {
            Location::Local { .. } => format!("{}/", place.name),
            Location::Remote { .. } => String::new(),
        }
    }

    /// Subdirectories under `prefix`, each returned as `<prefix><name>/`.
    pub fn list(&self, prefix: &str) -> Result<Vec<String>> {
        match self {
            Location::Local { home } => list_local(home, prefix),
            Location::Remote { host, .. } => {
                let pattern = format!("{prefix}*/");
                let out = ssh(host, &["ls", "-d1", &pattern])?;
                Ok(out
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect())
            }
        }
    }

    pub fn target(&self, dir: &str) -> Target {
        let dir = dir.trim_end_matches('/');
        match self {
            Location::Local { home } => Target::Local {
                path: home.join(dir),
            },
            Location::Remote { host, home } => Target::Remote {
                host: host.clone(),
                path: format!("{}/{dir}", home.trim_end_matches('/')),
            },
        }
    }
}

fn list_local(home: &Path, prefix: &str) -> Result<Vec<String>> {
    let base = home.join(prefix);
    let mut names = Vec::new();
    for entry in std::fs::read_dir(&base)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        // `*/` skips dotfiles
        if name.starts_with('.') {
            continue;
        }
        // is_dir() follows symlinks, entry.file_type() does not
        if entry.path().is_dir() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names
        .into_iter()
        .map(|name| format!("{prefix}{name}/"))
        .collect())
}

fn ssh(host: &str, args: &[&str]) -> Result<String> {
    let program = which::which("ssh").map_err(|_| GcpError::ToolNotFound("ssh".into()))?;
    let command = format!("ssh {host} {}", args.join(" "));
    tracing::debug!(%command, "running");

    let output = Command::new(program)
        .arg(host)
        .args(args)
        .stdin(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(GcpError::CommandFailed {
            command,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// ---------------------------------------------------------------------------
// Choosing
// ---------------------------------------------------------------------------

/// Last path component of a candidate, without the trailing `/`.
pub fn dir_name(dir: &str) -> &str {
    let trimmed = dir.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Match a user-typed directory against the candidates: exact first, then
/// by last component.
pub fn resolve_dir<'a>(candidates: &'a [String], arg: &str) -> Option<&'a String> {
    if let Some(exact) = candidates.iter().find(|c| c.as_str() == arg) {
        return Some(exact);
    }
    let wanted = arg.trim_end_matches('/');
    candidates
        .iter()
        .find(|c| c.trim_end_matches('/') == wanted || dir_name(c) == wanted)
}

// ---------------------------------------------------------------------------
// Target / OpenCommand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Local { path: PathBuf },
    Remote { host: String, path: String },
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Local { path } => write!(f, "{}", path.display()),
            Target::Remote { host, path } => write!(f, "{host}:{path}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl OpenCommand {
    /// `editor` may carry its own flags, e.g. `code -n`.
    pub fn new(editor: &str, target: &Target) -> Self {
        let mut words = editor.split_whitespace().map(str::to_string);
        let program = words.next().unwrap_or_default();
        let mut args: Vec<String> = words.collect();
        match target {
            Target::Local { path } => args.push(path.to_string_lossy().into_owned()),
            Target::Remote { host, path } => {
                args.push("--remote".to_string());
                args.push(format!("ssh-remote+{host}"));
                args.push(path.clone());
            }
        }
        Self { program, args }
    }

    pub fn run(&self) -> Result<()> {
        let program = which::which(&self.program)
            .map_err(|_| GcpError::ToolNotFound(self.program.clone()))?;
        tracing::debug!(command = %self, "running");
        let status = Command::new(program).args(&self.args).status()?;
        if !status.success() {
            return Err(GcpError::CommandFailed {
                command: self.to_string(),
                stderr: format!("exited with {status}"),
            });
        }
        Ok(())
    }
}

impl fmt::Display for OpenCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn v(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn local_listing_is_sorted_dirs_only() {
        let home = TempDir::new().unwrap();
        for d in ["github/zeta", "github/alpha", "github/.hidden", "github/mid"] {
            std::fs::create_dir_all(home.path().join(d)).unwrap();
        }
        std::fs::write(home.path().join("github/README.md"), "x").unwrap();

        let loc = Location::Local {
            home: home.path().to_path_buf(),
        };
        let prefix = loc.root_prefix(&Place::local("github"));
        assert_eq!(prefix, "github/");
        assert_eq!(
            loc.list(&prefix).unwrap(),
            v(&["github/alpha/", "github/mid/", "github/zeta/"])
        );
    }

    #[test]
    fn local_listing_nested_prefix() {
        let home = TempDir::new().unwrap();
        std::fs::create_dir_all(home.path().join("github/abc/one")).unwrap();
        let loc = Location::Local {
            home: home.path().to_path_buf(),
        };
        assert_eq!(loc.list("github/abc/").unwrap(), v(&["github/abc/one/"]));
    }

    #[test]
    fn local_listing_missing_place_is_error() {
        let home = TempDir::new().unwrap();
        let loc = Location::Local {
            home: home.path().to_path_buf(),
        };
        assert!(loc.list("nowhere/").is_err());
    }

    #[test]
    fn remote_root_prefix_is_home() {
        let loc = Location::Remote {
            host: "vmi".into(),
            home: "/home/me".into(),
        };
        assert_eq!(loc.root_prefix(&Place::remote("vmi", "vmi")), "");
    }

    #[test]
    fn resolve_dir_by_exact_or_name() {
        let candidates = v(&["github/foo/", "github/foobar/", "github/bar/"]);
        assert_eq!(
            resolve_dir(&candidates, "github/bar/").map(String::as_str),
            Some("github/bar/")
        );
        assert_eq!(
            resolve_dir(&candidates, "foo").map(String::as_str),
            Some("github/foo/")
        );
        assert_eq!(
            resolve_dir(&candidates, "github/foobar").map(String::as_str),
            Some("github/foobar/")
        );
        assert_eq!(resolve_dir(&candidates, "baz"), None);
    }

    #[test]
    fn dir_name_strips_prefix_and_slash() {
        assert_eq!(dir_name("github/abc/"), "abc");
        assert_eq!(dir_name("abc/"), "abc");
        assert_eq!(dir_name("abc"), "abc");
    }

    #[test]
    fn open_local_dir() {
        let loc = Location::Local {
            home: PathBuf::from("/home/me"),
        };
        let target = loc.target("github/foo/");
        assert_eq!(target.to_string(), "/home/me/github/foo");
        let cmd = OpenCommand::new("code", &target);
        assert_eq!(cmd.to_string(), "code /home/me/github/foo");
    }

    #[test]
    fn open_remote_dir() {
        let loc = Location::Remote {
            host: "vmi".into(),
            home: "/home/me/".into(),
        };
        let target = loc.target("proj/");
        assert_eq!(target.to_string(), "vmi:/home/me/proj");
        let cmd = OpenCommand::new("code -n", &target);
        assert_eq!(cmd.program, "code");
        assert_eq!(
            cmd.args,
            v(&["-n", "--remote", "ssh-remote+vmi", "/home/me/proj"])
        );
    }
}
