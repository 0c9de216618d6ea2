use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

fn default_filter() -> String {
    "agency_demo=info,agency_order=info,agency_catalog=warn".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default = "default_separator_width")]
    pub separator_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            separator_width: default_separator_width(),
        }
    }
}

fn default_separator_width() -> usize { 60 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Defaults are compiled in, so every file is optional
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `AGENCY_REPORT__FORMAT=json` sets `report.format`
            .add_source(config::Environment::with_prefix("AGENCY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
