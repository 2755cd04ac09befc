//! Persistence seam for the dispatcher.
//!
//! The dispatcher takes a [`NotificationStore`] handle explicitly instead
//! of reaching for an ambient connection, so its logic can be exercised
//! against [`MemoryStore`] without a database.

mod memory;
mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use hrm_core::roles::{Role, UnknownRole};
use hrm_core::types::DbId;
use hrm_db::models::notification::{CreateNotification, Notification};

pub use memory::{MemoryStore, StoredNotification};
pub use postgres::PgStore;

/// A user as seen by the dispatcher: just enough to resolve recipients
/// and apply the escalation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientUser {
    pub id: DbId,
    pub name: String,
    pub role: Role,
}

/// Errors surfaced by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    InvalidRole(#[from] UnknownRole),
}

/// Storage backend the dispatcher reads users from and writes
/// notifications through.
///
/// Also carries the read side of the inbox: listing, unread counts, and
/// the mark-read operations — the only path that ever mutates a stored
/// notification.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Look up an active user by id. Inactive or unknown ids resolve to
    /// `None`.
    async fn find_user(&self, id: DbId) -> Result<Option<RecipientUser>, StoreError>;

    /// All active users carrying the given role tag.
    async fn users_with_role(&self, role: Role) -> Result<Vec<RecipientUser>, StoreError>;

    /// Most recent notification with this fingerprint created within the
    /// window, if any.
    async fn find_recent_duplicate(
        &self,
        dedup_key: &str,
        window: Duration,
    ) -> Result<Option<DbId>, StoreError>;

    /// Insert one notification row, returning its id.
    async fn insert(&self, notification: CreateNotification) -> Result<DbId, StoreError>;

    /// Page through a user's notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, StoreError>;

    /// Flag one notification as read; `false` when it does not exist,
    /// belongs to a different user, or was already read.
    async fn mark_read(&self, notification_id: DbId, user_id: DbId) -> Result<bool, StoreError>;

    /// Flag every unread notification for the user as read, returning how
    /// many changed.
    async fn mark_all_read(&self, user_id: DbId) -> Result<u64, StoreError>;

    /// Number of unread notifications for the user.
    async fn unread_count(&self, user_id: DbId) -> Result<i64, StoreError>;
}
