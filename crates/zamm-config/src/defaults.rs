use crate::logging::LogFormat;

/// Default log filter expression used by the bridge.
///
/// The bridge writes its response to stdout and diagnostics to stderr, so
/// only warnings are shown unless the operator asks for more.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Base URL of the OpenAI REST API.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Upper bound on a single provider request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default log filter expression used by the bridge.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the bridge.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned OpenAI base URL.
pub fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_owned()
}
