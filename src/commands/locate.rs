use anyhow::Result;
use customerhub_core::config::AppConfig;
use customerhub_registration::{GeolocationAcquirer, PositionOptions};

use crate::cli::LocationArgs;
use crate::commands::position_source;
use crate::notifier::ConsoleNotifier;

pub async fn run(config: AppConfig, location: LocationArgs) -> Result<()> {
    let notifier = ConsoleNotifier;
    let acquirer = GeolocationAcquirer::new(PositionOptions::from(&config.geolocation));
    let source = position_source(&location, &config.geolocation);

    let position = acquirer.acquire(source.as_ref(), &notifier).await?;
    println!("Latitude:  {:.8}", position.latitude);
    println!("Longitude: {:.8}", position.longitude);

    Ok(())
}
