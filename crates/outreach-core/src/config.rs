use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub fixture: FixtureConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated list of origins allowed by the CORS layer.
    pub allowed_origins: String,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the allowed CORS origins as individual entries.
    #[must_use]
    pub fn allowed_origins(&self) -> Vec<&str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Flat append-only log file consumed by the admin log endpoints.
    pub file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureConfig {
    /// Path of the JSON sample-data fixture loaded by the initialize
    /// operation.
    pub path: String,
}

/// External AI-model settings. Present in configuration for the email
/// generation pipeline; not consumed by any handler in this service.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    pub key: Option<String>,
    pub model: Option<String>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `config.toml` values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.allowed_origins", "http://localhost:4200")?
            .set_default("database.max_connections", 4)?
            .set_default("logging.level", "debug")?
            .set_default("logging.file", "outreach.log")?
            .set_default("fixture.path", "fixtures/sample_data.json")?
            .set_default("ai.key", None::<String>)?
            .set_default("ai.model", None::<String>)?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
