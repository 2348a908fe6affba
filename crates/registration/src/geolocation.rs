use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use customerhub_core::config::GeolocationConfig;
use customerhub_core::{Notifier, ToastKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix a source may return; zero forces a fresh one
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_millis(10_000),
            maximum_age: Duration::ZERO,
        }
    }
}

impl From<&GeolocationConfig> for PositionOptions {
    fn from(config: &GeolocationConfig) -> Self {
        Self {
            enable_high_accuracy: config.enable_high_accuracy,
            timeout: Duration::from_millis(config.timeout_ms),
            maximum_age: Duration::from_millis(config.maximum_age_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("Geolocation is not supported by your browser")]
    Unsupported,

    #[error("Failed to get location: Please allow location access in your browser settings.")]
    PermissionDenied,

    #[error("Failed to get location: Location information is unavailable.")]
    Unavailable,

    #[error("Failed to get location: Location request timed out.")]
    Timeout,

    #[error("Failed to get location: {0}")]
    Other(String),
}

/// Platform capability that can report where the device is
#[async_trait]
pub trait PositionSource: Send + Sync {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self, options: &PositionOptions) -> Result<Position, PositionError>;
}

/// A position supplied up front (command line or config)
pub struct FixedPosition {
    position: Position,
}

impl FixedPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Position {
                latitude,
                longitude,
            },
        }
    }
}

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, PositionError> {
        let Position {
            latitude,
            longitude,
        } = self.position;
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(PositionError::Unavailable);
        }
        Ok(self.position)
    }
}

/// Used when nothing can provide a position
pub struct NoPositionSource;

#[async_trait]
impl PositionSource for NoPositionSource {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Position, PositionError> {
        Err(PositionError::Unsupported)
    }
}

/// Single-shot position request with a hard timeout. Never retries.
pub struct GeolocationAcquirer {
    options: PositionOptions,
}

impl GeolocationAcquirer {
    pub fn new(options: PositionOptions) -> Self {
        Self { options }
    }

    pub async fn acquire(
        &self,
        source: &dyn PositionSource,
        notifier: &dyn Notifier,
    ) -> Result<Position, PositionError> {
        if !source.is_supported() {
            let err = PositionError::Unsupported;
            notifier.show(&err.to_string(), ToastKind::Error);
            return Err(err);
        }

        notifier.show("Requesting location access...", ToastKind::Wait);

        let result = match tokio::time::timeout(
            self.options.timeout,
            source.current_position(&self.options),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(PositionError::Timeout),
        };

        match result {
            Ok(position) => {
                info!(
                    latitude = position.latitude,
                    longitude = position.longitude,
                    "location acquired"
                );
                notifier.show("Location fetched successfully!", ToastKind::Success);
                Ok(position)
            }
            Err(err) => {
                warn!(error = %err, "location request failed");
                notifier.show(&err.to_string(), ToastKind::Error);
                Err(err)
            }
        }
    }
}
