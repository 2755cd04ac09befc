//! Postgres-backed [`NotificationStore`].

use std::time::Duration;

use async_trait::async_trait;
use hrm_core::roles::Role;
use hrm_core::types::DbId;
use hrm_db::models::notification::{CreateNotification, Notification};
use hrm_db::models::user::User;
use hrm_db::repositories::{NotificationRepo, UserRepo};
use hrm_db::DbPool;

use super::{NotificationStore, RecipientUser, StoreError};

/// Production store delegating to the repository layer.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_recipient(user: User) -> Result<RecipientUser, StoreError> {
    Ok(RecipientUser {
        id: user.id,
        name: user.name,
        role: user.role.parse()?,
    })
}

#[async_trait]
impl NotificationStore for PgStore {
    async fn find_user(&self, id: DbId) -> Result<Option<RecipientUser>, StoreError> {
        match UserRepo::find_by_id(&self.pool, id).await? {
            Some(user) if user.is_active => Ok(Some(to_recipient(user)?)),
            _ => Ok(None),
        }
    }

    async fn users_with_role(&self, role: Role) -> Result<Vec<RecipientUser>, StoreError> {
        UserRepo::list_active_by_role(&self.pool, role)
            .await?
            .into_iter()
            .map(to_recipient)
            .collect()
    }

    async fn find_recent_duplicate(
        &self,
        dedup_key: &str,
        window: Duration,
    ) -> Result<Option<DbId>, StoreError> {
        Ok(NotificationRepo::find_recent_duplicate(&self.pool, dedup_key, window.as_secs_f64())
            .await?)
    }

    async fn insert(&self, notification: CreateNotification) -> Result<DbId, StoreError> {
        Ok(NotificationRepo::create(&self.pool, &notification).await?)
    }

    async fn list_for_user(
        &self,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, StoreError> {
        Ok(NotificationRepo::list_for_user(&self.pool, user_id, unread_only, limit, offset).await?)
    }

    async fn mark_read(&self, notification_id: DbId, user_id: DbId) -> Result<bool, StoreError> {
        Ok(NotificationRepo::mark_read(&self.pool, notification_id, user_id).await?)
    }

    async fn mark_all_read(&self, user_id: DbId) -> Result<u64, StoreError> {
        Ok(NotificationRepo::mark_all_read(&self.pool, user_id).await?)
    }

    async fn unread_count(&self, user_id: DbId) -> Result<i64, StoreError> {
        Ok(NotificationRepo::unread_count(&self.pool, user_id).await?)
    }
}
