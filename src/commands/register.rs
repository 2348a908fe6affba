use anyhow::{bail, Result};
use tracing::info;

use customerhub_core::config::AppConfig;
use customerhub_core::FormField;
use customerhub_registration::{
    strength, strength_label, GeolocationAcquirer, PositionOptions, PositionSource,
    RegistrationSession, SubmitError,
};

use crate::cli::RegisterArgs;
use crate::commands::{build_api, position_source};
use crate::notifier::ConsoleNotifier;

pub async fn run(config: AppConfig, args: RegisterArgs) -> Result<()> {
    let api = build_api(&config)?;
    let notifier = ConsoleNotifier;
    let mut session = RegistrationSession::new(config.client.user_agent.clone());

    let fields = [
        (FormField::FullName, args.full_name),
        (FormField::Email, args.email),
        (FormField::PhoneNumber, args.phone_number),
        (FormField::Gender, args.gender),
        (FormField::DateOfBirth, args.date_of_birth),
        (FormField::Address, args.address),
        (FormField::Password, args.password),
        (FormField::ConfirmPassword, args.confirm_password),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            session.set_field(field, value);
        }
    }

    let score = strength(&session.form().password);
    println!("Password strength: {} ({}/5)", strength_label(score), score);

    // Without coordinates the location rule reports the missing fix.
    let source = position_source(&args.location, &config.geolocation);
    if source.is_supported() {
        let acquirer = GeolocationAcquirer::new(PositionOptions::from(&config.geolocation));
        if let Err(e) = session
            .acquire_location(&acquirer, source.as_ref(), &notifier)
            .await
        {
            info!(error = %e, "continuing without location");
        }
    }

    match session.submit(&api, &notifier).await {
        Ok(_) => Ok(()),
        Err(SubmitError::Invalid(errors)) => {
            println!("\nPlease fix the following fields:");
            for (field, message) in errors.iter() {
                println!("  {:<16} {}", field.as_str(), message);
            }
            bail!("{} field(s) need attention", errors.len())
        }
        Err(SubmitError::Rejected(message)) => bail!(message),
    }
}
