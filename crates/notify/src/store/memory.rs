//! In-memory [`NotificationStore`] for tests and local experiments.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use hrm_core::roles::Role;
use hrm_core::types::{DbId, Timestamp};
use hrm_db::models::notification::{CreateNotification, Notification};

use super::{NotificationStore, RecipientUser, StoreError};

/// A notification held by [`MemoryStore`], with the metadata the real
/// table would generate.
#[derive(Debug, Clone)]
pub struct StoredNotification {
    pub id: DbId,
    pub created_at: Timestamp,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub row: CreateNotification,
}

impl StoredNotification {
    fn to_row(&self) -> Notification {
        Notification {
            id: self.id,
            user_id: self.row.user_id,
            sender_id: self.row.sender_id,
            title: self.row.title.clone(),
            message: self.row.message.clone(),
            category: self.row.category.clone(),
            priority: self.row.priority.clone(),
            is_read: self.is_read,
            read_at: self.read_at,
            dedup_key: self.row.dedup_key.clone(),
            entity_type: self.row.entity_type.clone(),
            entity_id: self.row.entity_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Default)]
struct Inner {
    next_id: DbId,
    users: BTreeMap<DbId, RecipientUser>,
    notifications: Vec<StoredNotification>,
}

/// Non-durable store keeping users and notifications in a `Mutex`.
///
/// Only active users exist here; deactivation is modeled by not seeding
/// the user at all.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user.
    pub fn add_user(&self, id: DbId, name: &str, role: Role) {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.users.insert(
            id,
            RecipientUser {
                id,
                name: name.to_string(),
                role,
            },
        );
    }

    /// Snapshot of all stored notifications, in insertion order.
    pub fn notifications(&self) -> Vec<StoredNotification> {
        self.inner
            .lock()
            .expect("memory store poisoned")
            .notifications
            .clone()
    }

    /// Shift every stored notification's creation time into the past.
    ///
    /// Lets tests cross the dedup window without sleeping.
    pub fn age_notifications(&self, by: Duration) {
        let by = chrono::Duration::from_std(by).expect("age out of range");
        let mut inner = self.inner.lock().expect("memory store poisoned");
        for stored in &mut inner.notifications {
            stored.created_at = stored.created_at - by;
        }
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn find_user(&self, id: DbId) -> Result<Option<RecipientUser>, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.users.get(&id).cloned())
    }

    async fn users_with_role(&self, role: Role) -> Result<Vec<RecipientUser>, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .users
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    async fn find_recent_duplicate(
        &self,
        dedup_key: &str,
        window: Duration,
    ) -> Result<Option<DbId>, StoreError> {
        let cutoff = Utc::now() - chrono::Duration::from_std(window).expect("window out of range");
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .notifications
            .iter()
            .rev()
            .find(|stored| stored.row.dedup_key == dedup_key && stored.created_at > cutoff)
            .map(|stored| stored.id))
    }

    async fn insert(&self, notification: CreateNotification) -> Result<DbId, StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.next_id += 1;
        let id = inner.next_id;
        inner.notifications.push(StoredNotification {
            id,
            created_at: Utc::now(),
            is_read: false,
            read_at: None,
            row: notification,
        });
        Ok(id)
    }

    async fn list_for_user(
        &self,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        let mut rows: Vec<&StoredNotification> = inner
            .notifications
            .iter()
            .filter(|stored| stored.row.user_id == user_id && (!unread_only || !stored.is_read))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(StoredNotification::to_row)
            .collect())
    }

    async fn mark_read(&self, notification_id: DbId, user_id: DbId) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        for stored in &mut inner.notifications {
            if stored.id == notification_id && stored.row.user_id == user_id && !stored.is_read {
                stored.is_read = true;
                stored.read_at = Some(Utc::now());
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn mark_all_read(&self, user_id: DbId) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        let mut changed = 0;
        for stored in &mut inner.notifications {
            if stored.row.user_id == user_id && !stored.is_read {
                stored.is_read = true;
                stored.read_at = Some(Utc::now());
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn unread_count(&self, user_id: DbId) -> Result<i64, StoreError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .notifications
            .iter()
            .filter(|stored| stored.row.user_id == user_id && !stored.is_read)
            .count() as i64)
    }
}
