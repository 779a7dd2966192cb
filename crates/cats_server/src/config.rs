//! Server configuration from command-line flags and environment variables.
//!
//! Every setting has a default, so the server starts with no configuration
//! at all.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use clap::Parser;

/// Database name that selects a throwaway in-memory store.
pub const IN_MEMORY_DB_NAME: &str = ":memory:";
const DB_FILE_EXTENSION: &str = "sqlite3";

/// CATS API server.
#[derive(Parser, Debug, Clone)]
#[command(name = "cats-server", about = "CATS customer tracking API server", version)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "LISTEN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Database name; `:memory:` keeps everything in memory.
    #[arg(long = "db-name", env = "DB_NAME", default_value = "cats_db")]
    pub db_name: String,

    /// Directory holding the database file.
    #[arg(long = "db-dir", env = "DB_DIR", default_value = ".")]
    pub db_dir: PathBuf,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long = "log-level", env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr only when unset.
    #[arg(long = "log-dir", env = "LOG_DIR")]
    pub log_dir: Option<String>,
}

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    InMemory,
    File(PathBuf),
}

impl Display for DatabaseLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory => f.write_str(IN_MEMORY_DB_NAME),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves `db_name` + `db_dir` into a store location.
    pub fn database_location(&self) -> DatabaseLocation {
        let name = self.db_name.trim();
        if name == IN_MEMORY_DB_NAME {
            return DatabaseLocation::InMemory;
        }
        DatabaseLocation::File(
            self.db_dir
                .join(format!("{name}.{DB_FILE_EXTENSION}")),
        )
    }

    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(cats_core::default_log_level())
    }
}
