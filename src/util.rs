//! Utility functions and helpers.

use tokio::sync::mpsc;

/// Optional sink for free-text progress messages
pub type StatusSender = mpsc::Sender<String>;

/// Report a status message to an optional sink, logging a warning if it fails.
///
/// Never waits: a full or closed channel drops the message. Callers must not
/// depend on whether anyone is listening.
pub fn report_status(status: Option<&StatusSender>, message: impl Into<String>) {
    let message = message.into();
    tracing::debug!("{}", message);

    if let Some(tx) = status {
        if let Err(e) = tx.try_send(message) {
            tracing::warn!("Failed to send status update: {}", e);
        }
    }
}
