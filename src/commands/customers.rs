use anyhow::Result;
use customerhub_api::{load_customers, render_customers};
use customerhub_core::config::AppConfig;

use crate::commands::build_api;
use crate::notifier::ConsoleNotifier;

pub async fn run(config: AppConfig) -> Result<()> {
    let api = build_api(&config)?;
    let notifier = ConsoleNotifier;

    // A failed fetch has already been reported; show the empty state.
    let customers = load_customers(&api, &notifier).await.unwrap_or_default();
    print!("{}", render_customers(&customers));

    Ok(())
}
