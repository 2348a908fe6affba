use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend base URL, shared by every network-facing component
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// How long `status --wake` waits for a sleeping host to spin up
    #[serde(default = "default_wake_timeout")]
    pub wake_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            wake_timeout_seconds: default_wake_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Reported to the backend as the registering device
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProbeConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

impl ProbeConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_ms: default_probe_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationConfig {
    #[serde(default = "default_true")]
    pub enable_high_accuracy: bool,
    #[serde(default = "default_geo_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub maximum_age_ms: u64,
    /// Fixed position used when none is given on the command line
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: default_geo_timeout_ms(),
            maximum_age_ms: 0,
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,
    /// Countdown indicator step
    #[serde(default = "default_toast_tick_ms")]
    pub tick_ms: u64,
}

impl NotificationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration_ms(),
            tick_ms: default_toast_tick_ms(),
        }
    }
}

fn default_base_url() -> String { "http://localhost:3508".to_string() }
fn default_request_timeout() -> u64 { 30 }
fn default_wake_timeout() -> u64 { 90 }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; rv:109.0) Gecko/20100101 Firefox/115.0".to_string()
}
fn default_max_attempts() -> u32 { 3 }
fn default_retry_delay_ms() -> u64 { 3000 }
fn default_probe_timeout_ms() -> u64 { 5000 }
fn default_true() -> bool { true }
fn default_geo_timeout_ms() -> u64 { 10_000 }
fn default_toast_duration_ms() -> u64 { 3000 }
fn default_toast_tick_ms() -> u64 { 30 }
