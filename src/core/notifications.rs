use crate::domain::model::{Notification, NotificationKind};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(
        &self,
        kind: NotificationKind,
        title: &str,
        message: &str,
        user_id: Option<&str>,
    ) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            user_id: user_id.map(str::to_string),
            timestamp: Utc::now(),
            read: false,
        };
        self.notifications.write().await.push(notification.clone());
        notification
    }

    /// All notifications, newest first, with the number still unread.
    pub async fn list(&self) -> (Vec<Notification>, usize) {
        let notifications = self.notifications.read().await;
        let unread = notifications.iter().filter(|n| !n.read).count();

        // reverse first so equal timestamps keep newest-first order
        let mut sorted: Vec<Notification> = notifications.iter().rev().cloned().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        (sorted, unread)
    }

    /// Returns whether a notification with that id existed.
    pub async fn set_read(&self, id: &str, read: bool) -> bool {
        let mut notifications = self.notifications.write().await;
        match notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = read;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_is_newest_first_with_unread_count() {
        let store = NotificationStore::new();
        let first = store
            .push(NotificationKind::Quiz, "Quiz ready", "Day 1 quiz", None)
            .await;
        let second = store
            .push(NotificationKind::Achievement, "Streak", "3 days in a row", Some("user-1"))
            .await;

        let (items, unread) = store.list().await;
        assert_eq!(unread, 2);
        assert_eq!(items[0].id, second.id);
        assert_eq!(items[1].id, first.id);

        assert!(store.set_read(&first.id, true).await);
        let (_, unread) = store.list().await;
        assert_eq!(unread, 1);
    }

    #[tokio::test]
    async fn test_set_read_unknown_id() {
        let store = NotificationStore::new();
        assert!(!store.set_read("missing", true).await);
    }
}
