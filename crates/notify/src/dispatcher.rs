//! The notification dispatcher.
//!
//! Stateless request/response: resolve the recipient set, suppress a
//! recent identical notification, write one row per recipient. The
//! duplicate check is best-effort; two concurrent identical requests may
//! both pass it and produce two rows (accepted, not guarded by a
//! transaction).

use std::sync::Arc;
use std::time::Duration;

use hrm_core::roles::Role;
use hrm_core::types::DbId;
use hrm_db::models::notification::CreateNotification;

use crate::event::{HrEvent, NotificationContent};
use crate::fingerprint::content_fingerprint;
use crate::recipient::Recipient;
use crate::store::{NotificationStore, StoreError};

/// Window within which an identical notification request is treated as a
/// repeat rather than a new event.
pub const DEFAULT_DEDUP_WINDOW: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Creates notification records from domain events.
pub struct Dispatcher {
    store: Arc<dyn NotificationStore>,
    dedup_window: Duration,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self {
            store,
            dedup_window: DEFAULT_DEDUP_WINDOW,
        }
    }

    /// Override the duplicate-suppression window.
    pub fn with_dedup_window(mut self, window: Duration) -> Self {
        self.dedup_window = window;
        self
    }

    /// Create one notification for `receiver`, suppressing a recent
    /// identical one.
    ///
    /// Returns the id of the written row, the id of the suppressed
    /// duplicate, or `None` when the receiver does not resolve to an
    /// active user. At most one insert per call.
    pub async fn create_direct(
        &self,
        sender: Option<DbId>,
        receiver: DbId,
        content: &NotificationContent,
    ) -> Result<Option<DbId>, NotifyError> {
        let Some(user) = self.store.find_user(receiver).await? else {
            tracing::warn!(receiver, "Recipient is not an active user, skipping notification");
            return Ok(None);
        };

        let dedup_key = content_fingerprint(sender, user.id, content.category, &content.message);
        if let Some(existing) = self
            .store
            .find_recent_duplicate(&dedup_key, self.dedup_window)
            .await?
        {
            tracing::debug!(
                notification_id = existing,
                receiver,
                "Duplicate notification inside dedup window, returning existing id"
            );
            return Ok(Some(existing));
        }

        let id = self
            .store
            .insert(CreateNotification {
                user_id: user.id,
                sender_id: sender,
                title: content.title.clone(),
                message: content.message.clone(),
                category: content.category.to_string(),
                priority: content.priority.as_str().to_string(),
                dedup_key,
                entity_type: content.entity_type.map(str::to_string),
                entity_id: content.entity_id,
            })
            .await?;
        Ok(Some(id))
    }

    /// Invoke [`create_direct`](Self::create_direct) once per recipient,
    /// in order, and collect the resulting ids.
    ///
    /// A failure for one recipient is logged and skipped; it never blocks
    /// the remaining recipients.
    pub async fn fan_out(
        &self,
        sender: Option<DbId>,
        recipients: &[DbId],
        content: &NotificationContent,
    ) -> Result<Vec<DbId>, NotifyError> {
        let mut ids = Vec::with_capacity(recipients.len());
        for &user_id in recipients {
            match self.create_direct(sender, user_id, content).await {
                Ok(Some(id)) => ids.push(id),
                Ok(None) => {}
                Err(error) => {
                    tracing::error!(%error, user_id, "Failed to notify recipient, continuing");
                }
            }
        }
        Ok(ids)
    }

    /// Expand a [`Recipient`] into concrete user ids.
    pub async fn resolve(&self, recipient: &Recipient) -> Result<Vec<DbId>, NotifyError> {
        match recipient {
            Recipient::User(id) => Ok(vec![*id]),
            Recipient::Group(ids) => Ok(ids.clone()),
            Recipient::RoleGroup(role) => {
                let users = self.store.users_with_role(*role).await?;
                Ok(users.into_iter().map(|user| user.id).collect())
            }
        }
    }

    /// Escalation target for a completed task.
    ///
    /// Employees escalate to the recorded assigner (no-op when there is
    /// none); managers and HR escalate to the whole HR group, ignoring
    /// the assigner.
    async fn escalation_target(
        &self,
        assignee: DbId,
        assigned_by: Option<&Recipient>,
    ) -> Result<Option<Recipient>, NotifyError> {
        let Some(assignee) = self.store.find_user(assignee).await? else {
            tracing::warn!(assignee, "Task assignee is not an active user, skipping escalation");
            return Ok(None);
        };
        if assignee.role.escalates_to_hr() {
            return Ok(Some(Recipient::RoleGroup(Role::Hr)));
        }
        Ok(assigned_by.cloned())
    }

    /// Route a domain event: render its content, resolve its recipient
    /// set, and fan out. Returns the ids of all notifications written
    /// (or deduplicated).
    pub async fn dispatch(&self, event: &HrEvent) -> Result<Vec<DbId>, NotifyError> {
        let recipient = match event {
            HrEvent::TaskCompleted {
                assignee,
                assigned_by,
                ..
            } => self.escalation_target(*assignee, assigned_by.as_ref()).await?,
            other => other.routing(),
        };
        let Some(recipient) = recipient else {
            return Ok(Vec::new());
        };

        let content = event.content();
        let recipients = self.resolve(&recipient).await?;
        self.fan_out(event.sender(), &recipients, &content).await
    }
}
