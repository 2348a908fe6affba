pub mod config;
pub mod error;
pub mod notify;
pub mod types;

pub use config::AppConfig;
pub use error::ClientError;
pub use notify::{Notifier, RecordingNotifier, Toast, ToastKind, ToastSlot, ToastState};
pub use types::*;
