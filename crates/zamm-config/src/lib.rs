//! Shared configuration for the ZAMM command bridge.
//!
//! Values are layered by [`ortho_config`]: built-in defaults, then an optional
//! configuration file, then `ZAMM_*` environment variables, and finally
//! command-line flags. The CLI forwards only the flags listed in its own
//! allow-list to the loader so the positional method arguments never reach
//! it.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod logging;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_OPENAI_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, default_log_filter,
    default_log_filter_string, default_log_format, default_openai_base_url,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration shared by the CLI and the built-in handlers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ZAMM")]
pub struct Config {
    /// `tracing` filter directive applied to stderr diagnostics.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for stderr diagnostics.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Base URL used by the OpenAI chat provider.
    #[ortho_config(default = default_openai_base_url())]
    pub openai_base_url: String,
    /// Timeout applied to each provider request, in seconds.
    #[ortho_config(default = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            openai_base_url: default_openai_base_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Filter directive for the telemetry subscriber.
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for the telemetry subscriber.
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Base URL for OpenAI requests, without a trailing slash.
    pub fn openai_base_url(&self) -> &str {
        self.openai_base_url.trim_end_matches('/')
    }

    /// Timeout applied to outbound provider requests.
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults_keep_stdout_quiet() {
        let config = Config::default();
        assert_eq!(config.log_filter(), "warn");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[rstest]
    #[case::bare("https://api.openai.com/v1", "https://api.openai.com/v1")]
    #[case::trailing("http://127.0.0.1:9000/v1/", "http://127.0.0.1:9000/v1")]
    fn base_url_drops_trailing_slash(#[case] configured: &str, #[case] expected: &str) {
        let config = Config {
            openai_base_url: configured.to_owned(),
            ..Config::default()
        };
        assert_eq!(config.openai_base_url(), expected);
    }

    #[rstest]
    #[case::json("json", LogFormat::Json)]
    #[case::compact("compact", LogFormat::Compact)]
    #[case::shouting("JSON", LogFormat::Json)]
    fn log_format_parses_case_insensitively(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(input.parse::<LogFormat>().expect("parse format"), expected);
    }

    #[test]
    fn log_format_rejects_unknown_values() {
        assert!("yaml".parse::<LogFormat>().is_err());
    }
}
