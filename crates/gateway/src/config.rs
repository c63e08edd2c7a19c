use common::{Environment, LogLevel};
use serde::Deserialize;

pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8000/predict";
pub const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub log_level: LogLevel,
    pub environment: Environment,
    pub listen_addr: String,
    pub upstream_url: String,
    pub max_body_bytes: usize,
    #[serde(default)]
    pub otel_endpoint: Option<String>,
}

pub fn get_configuration() -> Result<Config, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("log_level", "info")?
        .set_default("environment", "development")?
        .set_default("listen_addr", "0.0.0.0:3000")?
        .set_default("upstream_url", DEFAULT_UPSTREAM_URL)?
        .set_default("max_body_bytes", DEFAULT_MAX_BODY_BYTES as u64)?
        .add_source(
            config::Environment::with_prefix("GATEWAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = config.try_deserialize::<Config>()?;

    Ok(config)
}
