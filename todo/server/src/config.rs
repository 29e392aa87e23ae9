use serde::Deserialize;

/// Server configuration, read from environment variables (`PORT`, `SESSION_TOKEN`).
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bearer token handed out on login and required by the task endpoints.
    #[serde(default = "default_session_token")]
    pub session_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            session_token: default_session_token(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }
}

fn default_port() -> u16 {
    8080
}

fn default_session_token() -> String {
    "mock-jwt-token".to_string()
}
