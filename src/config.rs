//! Server configuration, with optional overrides from the environment.

use crate::error::{Result, TidewireError};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9092";
pub const DEFAULT_MAX_FRAME_LEN: usize = 100 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Kafka protocol listen address.
    pub listen_addr: String,
    /// Frames declaring more bytes than this close the connection.
    pub max_frame_len: usize,
    /// HTTP admin listener (metrics, api table); disabled when None.
    pub admin_addr: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            admin_addr: None,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by TIDEWIRE_ADDR, TIDEWIRE_MAX_FRAME_BYTES and TIDEWIRE_ADMIN_ADDR.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(addr) = lookup("TIDEWIRE_ADDR").filter(|s| !s.trim().is_empty()) {
            config.listen_addr = addr;
        }
        if let Some(raw) = lookup("TIDEWIRE_MAX_FRAME_BYTES") {
            config.max_frame_len = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(TidewireError::Config(format!(
                        "TIDEWIRE_MAX_FRAME_BYTES must be a positive integer, got {:?}",
                        raw
                    )))
                }
            };
        }
        config.admin_addr = lookup("TIDEWIRE_ADMIN_ADDR").filter(|s| !s.trim().is_empty());
        Ok(config)
    }
}
