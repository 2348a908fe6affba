use tracing::{info, warn};
use url::Url;

use customerhub_core::config::ProbeConfig;
use customerhub_core::{CustomerApi, Notifier, ServerStatus, ToastKind};

/// Outcome of one probe session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub status: ServerStatus,
    pub attempts: u32,
    /// Where to send the user to wake a sleeping backend
    pub wake_url: Option<Url>,
}

/// Polls the liveness endpoint until the backend answers or the attempt
/// budget runs out. Status only moves forward: `checking` to `ready` or
/// `sleeping`, and a finished session never probes again.
pub struct AvailabilityProber {
    policy: ProbeConfig,
    status: ServerStatus,
    attempts: u32,
    wake_url: Option<Url>,
}

impl AvailabilityProber {
    pub fn new(policy: ProbeConfig) -> Self {
        Self {
            policy,
            status: ServerStatus::Checking,
            attempts: 0,
            wake_url: None,
        }
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    fn report(&self) -> ProbeReport {
        ProbeReport {
            status: self.status,
            attempts: self.attempts,
            wake_url: self.wake_url.clone(),
        }
    }

    /// Run the probe loop. Dropping the returned future cancels any pending
    /// retry delay.
    pub async fn run(&mut self, api: &dyn CustomerApi, notifier: &dyn Notifier) -> ProbeReport {
        if self.status != ServerStatus::Checking {
            return self.report();
        }

        let max_attempts = self.policy.max_attempts.max(1);
        loop {
            self.attempts += 1;
            let attempt = self.attempts;

            match api.liveness(self.policy.timeout()).await {
                Ok(()) => {
                    info!(attempt, url = %api.base_url(), "server is ready");
                    self.status = ServerStatus::Ready;
                    notifier.show("Server is ready to use!", ToastKind::Success);
                    return self.report();
                }
                Err(e) if attempt < max_attempts => {
                    warn!(attempt, max_attempts, error = %e, "liveness probe failed, retrying");
                    notifier.show(
                        &format!(
                            "Attempting to connect to server... ({}/{})",
                            attempt, max_attempts
                        ),
                        ToastKind::Wait,
                    );
                    tokio::time::sleep(self.policy.retry_delay()).await;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "server unreachable, giving up");
                    self.status = ServerStatus::Sleeping;
                    self.wake_url = Some(api.base_url().clone());
                    notifier.show("Server is in sleep mode", ToastKind::Error);
                    return self.report();
                }
            }
        }
    }
}
