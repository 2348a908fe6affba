pub mod customers;
pub mod fingerprint;
pub mod locate;
pub mod register;
pub mod status;

use anyhow::Result;
use tracing::info;

use customerhub_api::HttpApi;
use customerhub_core::config::{AppConfig, GeolocationConfig};
use customerhub_registration::{FixedPosition, NoPositionSource, PositionSource};

use crate::cli::LocationArgs;

pub fn build_api(config: &AppConfig) -> Result<HttpApi> {
    let api = HttpApi::new(&config.api, &config.client.user_agent)?;
    info!(base_url = %config.api.base_url, "using backend");
    Ok(api)
}

/// Command-line coordinates win over configured ones; with neither there
/// is no position to offer.
pub fn position_source(args: &LocationArgs, config: &GeolocationConfig) -> Box<dyn PositionSource> {
    let latitude = args.latitude.or(config.latitude);
    let longitude = args.longitude.or(config.longitude);
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => Box::new(FixedPosition::new(lat, lon)),
        _ => Box::new(NoPositionSource),
    }
}
