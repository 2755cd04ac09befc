//! Notification entity model and DTOs.

use hrm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    /// Recipient.
    pub user_id: DbId,
    /// Acting user the notification originates from, when there is one.
    pub sender_id: Option<DbId>,
    pub title: String,
    pub message: String,
    pub category: String,
    pub priority: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    /// Content fingerprint used for time-windowed duplicate suppression.
    pub dedup_key: String,
    /// Optional correlation reference to the subject entity.
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for inserting a notification row.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub sender_id: Option<DbId>,
    pub title: String,
    pub message: String,
    pub category: String,
    pub priority: String,
    pub dedup_key: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
}
