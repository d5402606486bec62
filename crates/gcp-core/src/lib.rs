pub mod config;
pub mod error;
pub mod history;
pub mod io;
pub mod path_audit;
pub mod paths;
pub mod workspace;

pub use error::{GcpError, Result};
