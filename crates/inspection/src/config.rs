use crate::{
    camera::DeviceKind,
    page::PageConfig,
    render::{DEFAULT_DEFECT_MARKER, Viewport},
};
use common::{Environment, LogLevel};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000/api/detect";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub log_level: LogLevel,
    pub environment: Environment,
    pub proxy_url: String,
    pub defect_marker: String,
    pub scan_linger_ms: u64,
    pub show_overlay: bool,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Config {
    pub fn page_config(&self, device_kind: DeviceKind) -> PageConfig {
        PageConfig {
            defect_marker: self.defect_marker.clone(),
            scan_linger: Duration::from_millis(self.scan_linger_ms),
            show_overlay: self.show_overlay,
            device_kind,
            viewport: Viewport {
                width: self.viewport_width,
                height: self.viewport_height,
            },
        }
    }
}

pub fn get_configuration() -> Result<Config, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("log_level", "warn")?
        .set_default("environment", "development")?
        .set_default("proxy_url", DEFAULT_PROXY_URL)?
        .set_default("defect_marker", DEFAULT_DEFECT_MARKER)?
        .set_default("scan_linger_ms", 1500)?
        .set_default("show_overlay", false)?
        .set_default("viewport_width", 800.0)?
        .set_default("viewport_height", 600.0)?
        .add_source(
            config::Environment::with_prefix("INSPECT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = config.try_deserialize::<Config>()?;

    // An empty marker is a substring of every label.
    if config.defect_marker.trim().is_empty() {
        return Err(config::ConfigError::Message(
            "defect_marker must not be empty".to_string(),
        ));
    }

    Ok(config)
}
