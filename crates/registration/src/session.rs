use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use customerhub_core::{
    CustomerApi, FormField, Notifier, RegisterRequest, RegistrationForm, Toast, ToastKind,
};

use crate::device;
use crate::geolocation::{GeolocationAcquirer, Position, PositionError, PositionSource};
use crate::validator::{validate, ValidationErrors};

const REGISTRATION_FAILED: &str = "Registration failed";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Local validation failed; nothing was sent
    #[error("{} field(s) need attention", .0.len())]
    Invalid(ValidationErrors),

    /// The request was sent and did not succeed
    #[error("{0}")]
    Rejected(String),
}

/// Advisory "operation in flight" marker. Observers can hold a clone.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn enter(&self) -> BusyGuard {
        self.0.store(true, Ordering::SeqCst);
        BusyGuard(Arc::clone(&self.0))
    }
}

/// Clears the flag on every exit path
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// State of one registration form: values, inline errors and the busy flag
pub struct RegistrationSession {
    form: RegistrationForm,
    errors: ValidationErrors,
    submit_error: Option<String>,
    busy: BusyFlag,
    user_agent: String,
}

impl RegistrationSession {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            form: RegistrationForm::default(),
            errors: ValidationErrors::default(),
            submit_error: None,
            busy: BusyFlag::default(),
            user_agent: user_agent.into(),
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Last rejection reported by the backend
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Update a field and drop its stale error until the next validation.
    /// `Location` is not a text field; it is ignored here and filled by
    /// [`Self::acquire_location`].
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        if self.form.set(field, value) {
            self.errors.remove(field);
        } else {
            warn!(field = %field, "not a text field, ignored");
        }
    }

    /// Recompute all errors; true when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.form);
        self.errors.is_empty()
    }

    /// Ask `source` for a position and store it in the form on success.
    pub async fn acquire_location(
        &mut self,
        acquirer: &GeolocationAcquirer,
        source: &dyn PositionSource,
        notifier: &dyn Notifier,
    ) -> Result<Position, PositionError> {
        let _busy = self.busy.enter();
        let position = acquirer.acquire(source, notifier).await?;
        self.form.set_location(position.latitude, position.longitude);
        Ok(position)
    }

    /// Validate, fingerprint the device and send the registration once.
    ///
    /// Invalid forms never reach the network; their errors stay on the
    /// session for inline display. A rejection keeps the entered values.
    pub async fn submit(
        &mut self,
        api: &dyn CustomerApi,
        notifier: &dyn Notifier,
    ) -> Result<Toast, SubmitError> {
        if !self.validate() {
            info!(invalid = self.errors.len(), "registration blocked by validation");
            return Err(SubmitError::Invalid(self.errors.clone()));
        }

        let _busy = self.busy.enter();
        let request = RegisterRequest {
            form: self.form.clone(),
            device_info: device::extract(&self.user_agent),
        };

        match api.register(&request).await {
            Ok(()) => {
                info!(email = %self.form.email, "registration successful");
                let toast = Toast::new("Registration successful!", ToastKind::Success);
                notifier.show(&toast.title, toast.kind);
                self.form.clear();
                self.submit_error = None;
                Ok(toast)
            }
            Err(e) => {
                warn!(error = %e, "registration failed");
                let message = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| REGISTRATION_FAILED.to_string());
                notifier.show(&message, ToastKind::Error);
                self.submit_error = Some(message.clone());
                Err(SubmitError::Rejected(message))
            }
        }
    }
}
