use customerhub_core::{Notifier, ToastKind};

/// Prints each toast as one line on stderr. A terminal keeps its
/// scrollback, so nothing is dismissed.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&self, title: &str, kind: ToastKind) {
        let icon = match kind {
            ToastKind::Success => "✅",
            ToastKind::Error => "❌",
            ToastKind::Wait => "⏳",
        };
        eprintln!("{} {}", icon, title);
    }
}
