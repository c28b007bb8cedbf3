use std::env;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Where the web API listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `TEAM_RANDOMIZER_HOST` and `TEAM_RANDOMIZER_PORT`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("TEAM_RANDOMIZER_HOST").ok(),
            env::var("TEAM_RANDOMIZER_PORT").ok(),
        )
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: host.filter(|h| !h.trim().is_empty()).unwrap_or(defaults.host),
            port: port.and_then(|p| p.trim().parse().ok()).unwrap_or(defaults.port),
        }
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}
