use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "HIV Care";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed REST backend root. Every resource path is appended to this.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Environment override for the backend root (staging / tests).
pub const API_URL_ENV: &str = "HIVCARE_API_URL";

/// Notification screen refresh cadence.
pub const NOTIFICATION_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Durable storage keys, shared with the browser build.
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const ANONYMOUS_BOOKING_KEY: &str = "anonymousBookingId";

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "hivcare_lib=info,reqwest=warn"
}

/// Get the application data directory (~/.hivcare/).
///
/// Falls back to the working directory when no home directory exists
/// (containers, CI).
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hivcare")
}

/// Location of the durable key/value session file.
pub fn storage_path() -> PathBuf {
    app_data_dir().join("session.json")
}

/// Connection settings for the REST client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` keeps the browser behaviour: no client-side timeout.
    pub request_timeout: Option<Duration>,
    /// Server path for anonymous bookings. When unset the booking id is
    /// only kept in local storage.
    pub anonymous_booking_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
            anonymous_booking_path: None,
        }
    }
}

impl ClientConfig {
    /// Point the client at an explicit backend root.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Default configuration, honouring `HIVCARE_API_URL` when set.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::with_base_url(url.trim()),
            _ => Self::default(),
        }
    }
}
