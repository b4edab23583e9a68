use std::sync::Arc;

use crate::error::Result;
use crate::models::notification::{NewNotification, Notification};
use crate::storage::Storage;

/// Persisted per-user feed. There is no push channel; clients poll the
/// listing on an interval and compute the unread count themselves.
#[derive(Clone)]
pub struct NotificationService {
    storage: Arc<dyn Storage>,
}

impl NotificationService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, notification: NewNotification) -> Result<Notification> {
        let notification = self.storage.create_notification(notification).await?;
        tracing::debug!(
            notification_id = notification.id,
            user_id = notification.user_id,
            kind = %notification.kind,
            "notification created"
        );
        Ok(notification)
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>> {
        self.storage.list_notifications_by_user(user_id).await
    }

    /// Succeeds silently for unknown or already-read ids.
    pub async fn mark_read(&self, id: i64) -> Result<()> {
        self.storage.mark_notification_read(id).await
    }
}
