use std::time::Duration;

use anyhow::Result;
use customerhub_api::AvailabilityProber;
use customerhub_core::config::AppConfig;
use customerhub_core::{CustomerApi, ServerStatus};

use crate::commands::build_api;
use crate::notifier::ConsoleNotifier;

pub async fn run(config: AppConfig, wake: bool) -> Result<()> {
    let api = build_api(&config)?;
    let notifier = ConsoleNotifier;

    let mut prober = AvailabilityProber::new(config.probe.clone());
    let report = prober.run(&api, &notifier).await;

    println!("\n╔══════════════════════════════════════════════╗");
    println!("║           CustomerHub Server Status          ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║ Status:             {:>20}    ║", report.status.to_string());
    println!("║ Attempts:           {:>20}    ║", report.attempts);
    println!("╚══════════════════════════════════════════════╝\n");

    if report.status != ServerStatus::Sleeping {
        return Ok(());
    }

    let Some(wake_url) = report.wake_url else {
        return Ok(());
    };
    println!("Wake Server: {}", wake_url);

    if wake {
        let timeout = Duration::from_secs(config.api.wake_timeout_seconds);
        println!("Waking server (up to {}s)...", timeout.as_secs());
        match api.liveness(timeout).await {
            Ok(()) => println!("Server is awake."),
            Err(e) => println!("Server did not wake: {}", e),
        }
    }

    Ok(())
}
