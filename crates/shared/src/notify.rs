//! Notification sender contract.
//!
//! Delivery (SMTP, chat, ...) lives outside this service. Callers hand a
//! [`Notification`] to a [`NotificationSender`] and only learn whether it was
//! accepted.

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

/// A message addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Something that can deliver notifications.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Sends a notification, returning `true` if it was accepted for delivery.
    async fn send(&self, notification: &Notification) -> bool;
}

/// Sender that records notifications in the structured log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationSender;

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send(&self, notification: &Notification) -> bool {
        info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            body_len = notification.body.len(),
            "Notification dispatched"
        );
        true
    }
}
