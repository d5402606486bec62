use thiserror::Error;

#[derive(Debug, Error)]
pub enum GcpError {
    #[error("invalid history namespace '{0}': must be alphanumeric with '.', '_' or '-'")]
    InvalidNamespace(String),

    #[error("unknown place: {0}")]
    UnknownPlace(String),

    #[error("no directory matching '{dir}' in {place}")]
    DirNotFound { place: String, dir: String },

    #[error("'{0}' not found on PATH")]
    ToolNotFound(String),

    #[error("command failed: {command}: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("failed to read PATH entry {path}: {source}")]
    PathEntry {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, GcpError>;
