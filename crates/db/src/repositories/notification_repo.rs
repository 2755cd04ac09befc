//! Repository for the `notifications` table.

use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{CreateNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, sender_id, title, message, category, priority, \
                       is_read, read_at, dedup_key, entity_type, entity_id, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification row, returning the generated ID.
    pub async fn create(pool: &PgPool, input: &CreateNotification) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications \
             (user_id, sender_id, title, message, category, priority, dedup_key, entity_type, entity_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(input.sender_id)
        .bind(&input.title)
        .bind(&input.message)
        .bind(&input.category)
        .bind(&input.priority)
        .bind(&input.dedup_key)
        .bind(&input.entity_type)
        .bind(input.entity_id)
        .fetch_one(pool)
        .await
    }

    /// Most recent notification with the given fingerprint created within
    /// the last `window_secs` seconds, if any.
    pub async fn find_recent_duplicate(
        pool: &PgPool,
        dedup_key: &str,
        window_secs: f64,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM notifications \
             WHERE dedup_key = $1 AND created_at > NOW() - make_interval(secs => $2) \
             ORDER BY created_at DESC \
             LIMIT 1",
        )
        .bind(dedup_key)
        .bind(window_secs)
        .fetch_optional(pool)
        .await
    }

    /// Page through a user's notifications, newest first.
    ///
    /// `unread_only` restricts the result to rows not yet marked read.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 {filter} \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Flag one notification as read.
    ///
    /// Returns `false` when the row does not exist, belongs to a different
    /// user, or was already read.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND is_read = false",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flag every unread notification for the user as read, returning how
    /// many rows changed.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Number of unread notifications for the user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
