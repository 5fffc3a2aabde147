use clap::Parser;
use console::DEFAULT_MAX_ATTEMPTS;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "exporter", version, about = "Export ThingsBoard telemetry to a spreadsheet")]
pub struct Config {
    /// Base URL offered as the default at the prompt
    #[arg(long, env = "TB_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    #[arg(long, env = "TB_USERNAME", default_value = "tenant@thingsboard.org")]
    pub default_username: String,

    #[arg(long, env = "TB_PASSWORD", default_value = "tenant", hide_env_values = true)]
    pub default_password: String,

    /// Directory the workbook is written to
    #[arg(long, env = "EXPORT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Devices requested per page when listing
    #[arg(long, env = "DEVICE_PAGE_SIZE", default_value_t = 500)]
    pub page_size: u32,

    #[arg(long, env = "DEFAULT_INTERVAL_MINUTES", default_value_t = 3)]
    pub default_interval: u32,

    /// How far back the default start time lies
    #[arg(long, env = "DEFAULT_LOOKBACK_DAYS", default_value_t = 7)]
    pub default_lookback_days: i64,

    #[arg(long, env = "MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            default_username: "tenant@thingsboard.org".to_string(),
            default_password: "tenant".to_string(),
            output_dir: PathBuf::from("."),
            page_size: 500,
            default_interval: 3,
            default_lookback_days: 7,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = Config::try_parse_from([
            "exporter",
            "--base-url",
            "https://tb.example.com",
            "--output-dir",
            "/tmp/exports",
            "--page-size",
            "100",
        ])
        .unwrap();
        assert_eq!(config.base_url, "https://tb.example.com");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.page_size, 100);
    }
}
