//! Configuration for rconsole
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{RconError, Result};

/// Default RCON port used by Minecraft-style servers
pub const DEFAULT_PORT: u16 = 25575;

/// Default timeout applied to connect, reads and writes (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Default block size for backward log scans
pub const DEFAULT_TAIL_BLOCK_SIZE: usize = 8 * 1024;

/// Log file location relative to the server directory
const LATEST_LOG: &str = "logs/latest.log";

/// Main configuration for an administrative session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Remote Console Configuration
    // -------------------------------------------------------------------------
    /// RCON host name or address
    pub host: String,

    /// RCON TCP port
    pub port: u16,

    /// Shared secret sent in the AUTH packet
    pub password: String,

    /// Timeout for connect and every blocking read/write (milliseconds)
    pub timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Log Configuration
    // -------------------------------------------------------------------------
    /// Server installation directory. The log is expected at
    ///   {server_dir}/logs/latest.log
    pub server_dir: Option<PathBuf>,

    /// Explicit log file path, takes precedence over `server_dir`
    pub log_file: Option<PathBuf>,

    /// Block size used when reading the log backward (bytes)
    pub tail_block_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            password: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            server_dir: None,
            log_file: None,
            tail_block_size: DEFAULT_TAIL_BLOCK_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Resolve the server log file path
    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        match &self.server_dir {
            Some(dir) => Ok(dir.join(LATEST_LOG)),
            None => Err(RconError::Config(
                "no log file or server directory configured".to_string(),
            )),
        }
    }

    /// Check that the values can be used to open a session
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(RconError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(RconError::Config("port must be non-zero".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(RconError::Config("timeout must be non-zero".to_string()));
        }
        if self.tail_block_size == 0 {
            return Err(RconError::Config(
                "tail block size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the RCON host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the RCON port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the RCON password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    /// Set the I/O timeout (in milliseconds)
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set the server installation directory
    pub fn server_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.server_dir = Some(path.into());
        self
    }

    /// Set an explicit log file path
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_file = Some(path.into());
        self
    }

    /// Set the backward scan block size (in bytes)
    pub fn tail_block_size(mut self, size: usize) -> Self {
        self.config.tail_block_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
