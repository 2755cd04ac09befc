//! HR domain events and their rendered notification content.
//!
//! Every variant renders to one [`NotificationContent`] shared by all
//! recipients of the event; routing is the dispatcher's job.

use chrono::NaiveDate;
use hrm_core::categories::{CATEGORY_CHAT, CATEGORY_DOCUMENT, CATEGORY_TASK, CATEGORY_WFH};
use hrm_core::priority::Priority;
use hrm_core::roles::Role;
use hrm_core::types::DbId;

use crate::recipient::Recipient;

/// Review outcome for an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentVerdict {
    Verified,
    Rejected { remarks: String },
}

/// Final decision on a work-from-home request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WfhDecision {
    Approved,
    Rejected { reason: String },
}

/// A domain event the dispatcher turns into notification records.
#[derive(Debug, Clone)]
pub enum HrEvent {
    /// Direct chat message.
    ChatMessage {
        sender: DbId,
        sender_name: String,
        receiver: DbId,
        preview: String,
    },
    /// Message posted to a chat group; every member except the sender is
    /// notified.
    GroupChatMessage {
        sender: DbId,
        sender_name: String,
        group_id: DbId,
        group_name: String,
        member_ids: Vec<DbId>,
        preview: String,
    },
    /// HR asked an employee to upload a document.
    DocumentAssigned {
        assignee: DbId,
        doc_name: String,
        assigned_by: Option<DbId>,
        assigned_by_name: String,
    },
    /// An employee uploaded a document; its reviewers are notified.
    DocumentUploaded {
        uploaded_by: DbId,
        uploader_name: String,
        doc_name: String,
        reviewer_ids: Vec<DbId>,
    },
    /// A reviewer accepted or rejected an uploaded document.
    DocumentReviewed {
        owner: DbId,
        doc_name: String,
        reviewer: DbId,
        reviewer_name: String,
        verdict: DocumentVerdict,
    },
    /// A task was marked completed. Routed by the escalation rule:
    /// employees notify the recorded assigner, managers notify the HR
    /// group.
    TaskCompleted {
        assignee: DbId,
        assignee_name: String,
        task_id: DbId,
        task_title: String,
        assigned_by: Option<Recipient>,
    },
    /// An employee submitted a WFH request to their manager.
    WfhSubmitted {
        employee: DbId,
        employee_name: String,
        date_from: NaiveDate,
        date_to: NaiveDate,
        manager: DbId,
        wfh_id: DbId,
    },
    /// A manager recommended a WFH request to the HR group.
    WfhRecommended {
        employee_name: String,
        date_from: NaiveDate,
        date_to: NaiveDate,
        recommended_by: String,
        wfh_id: DbId,
    },
    /// HR approved or rejected a WFH request.
    WfhDecided {
        employee: DbId,
        employee_name: String,
        date_from: NaiveDate,
        date_to: NaiveDate,
        decided_by: String,
        decision: WfhDecision,
        wfh_id: DbId,
    },
}

/// Rendered notification fields shared by every recipient of an event.
#[derive(Debug, Clone)]
pub struct NotificationContent {
    pub title: String,
    pub message: String,
    pub category: &'static str,
    pub priority: Priority,
    pub entity_type: Option<&'static str>,
    pub entity_id: Option<DbId>,
}

fn fmt_date(date: &NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

impl HrEvent {
    /// Render title, message, category, priority, and correlation
    /// reference for this event.
    pub fn content(&self) -> NotificationContent {
        match self {
            HrEvent::ChatMessage {
                sender_name,
                preview,
                ..
            } => NotificationContent {
                title: format!("New message from {sender_name}"),
                message: preview.clone(),
                category: CATEGORY_CHAT,
                priority: Priority::Medium,
                entity_type: None,
                entity_id: None,
            },
            HrEvent::GroupChatMessage {
                sender_name,
                group_id,
                group_name,
                preview,
                ..
            } => NotificationContent {
                title: format!("{sender_name} in {group_name}"),
                message: preview.clone(),
                category: CATEGORY_CHAT,
                priority: Priority::Medium,
                entity_type: Some("group"),
                entity_id: Some(*group_id),
            },
            HrEvent::DocumentAssigned {
                doc_name,
                assigned_by_name,
                ..
            } => NotificationContent {
                title: format!("Document required: {doc_name}"),
                message: format!("{assigned_by_name} has requested you to upload '{doc_name}'."),
                category: CATEGORY_DOCUMENT,
                priority: Priority::High,
                entity_type: None,
                entity_id: None,
            },
            HrEvent::DocumentUploaded {
                uploader_name,
                doc_name,
                ..
            } => NotificationContent {
                title: "Document uploaded for review".to_string(),
                message: format!("{uploader_name} uploaded '{doc_name}' for review."),
                category: CATEGORY_DOCUMENT,
                priority: Priority::Medium,
                entity_type: None,
                entity_id: None,
            },
            HrEvent::DocumentReviewed {
                doc_name,
                reviewer_name,
                verdict,
                ..
            } => match verdict {
                DocumentVerdict::Verified => NotificationContent {
                    title: format!("Document verified: {doc_name}"),
                    message: format!("{reviewer_name} verified your document '{doc_name}'."),
                    category: CATEGORY_DOCUMENT,
                    priority: Priority::Medium,
                    entity_type: None,
                    entity_id: None,
                },
                DocumentVerdict::Rejected { remarks } => NotificationContent {
                    title: format!("Document rejected: {doc_name}"),
                    message: format!(
                        "{reviewer_name} rejected your document '{doc_name}': {remarks}"
                    ),
                    category: CATEGORY_DOCUMENT,
                    priority: Priority::High,
                    entity_type: None,
                    entity_id: None,
                },
            },
            HrEvent::TaskCompleted {
                assignee_name,
                task_id,
                task_title,
                ..
            } => NotificationContent {
                title: "Task completed".to_string(),
                message: format!("{assignee_name} has completed the task '{task_title}'."),
                category: CATEGORY_TASK,
                priority: Priority::Medium,
                entity_type: Some("task"),
                entity_id: Some(*task_id),
            },
            HrEvent::WfhSubmitted {
                employee_name,
                date_from,
                date_to,
                wfh_id,
                ..
            } => NotificationContent {
                title: "New WFH request".to_string(),
                message: format!(
                    "{employee_name} requested work from home from {} to {}.",
                    fmt_date(date_from),
                    fmt_date(date_to)
                ),
                category: CATEGORY_WFH,
                priority: Priority::Medium,
                entity_type: Some("wfh_request"),
                entity_id: Some(*wfh_id),
            },
            HrEvent::WfhRecommended {
                employee_name,
                date_from,
                date_to,
                recommended_by,
                wfh_id,
            } => NotificationContent {
                title: "WFH request recommended".to_string(),
                message: format!(
                    "{recommended_by} recommended {employee_name}'s work-from-home request ({} to {}) for approval.",
                    fmt_date(date_from),
                    fmt_date(date_to)
                ),
                category: CATEGORY_WFH,
                priority: Priority::Medium,
                entity_type: Some("wfh_request"),
                entity_id: Some(*wfh_id),
            },
            HrEvent::WfhDecided {
                date_from,
                date_to,
                decided_by,
                decision,
                wfh_id,
                ..
            } => match decision {
                WfhDecision::Approved => NotificationContent {
                    title: "WFH request approved".to_string(),
                    message: format!(
                        "Your work-from-home request from {} to {} was approved by {decided_by}.",
                        fmt_date(date_from),
                        fmt_date(date_to)
                    ),
                    category: CATEGORY_WFH,
                    priority: Priority::Medium,
                    entity_type: Some("wfh_request"),
                    entity_id: Some(*wfh_id),
                },
                WfhDecision::Rejected { reason } => NotificationContent {
                    title: "WFH request rejected".to_string(),
                    message: format!(
                        "Your work-from-home request from {} to {} was rejected by {decided_by}: {reason}",
                        fmt_date(date_from),
                        fmt_date(date_to)
                    ),
                    category: CATEGORY_WFH,
                    priority: Priority::High,
                    entity_type: Some("wfh_request"),
                    entity_id: Some(*wfh_id),
                },
            },
        }
    }

    /// The acting user recorded as the notification sender, if any.
    pub fn sender(&self) -> Option<DbId> {
        match self {
            HrEvent::ChatMessage { sender, .. } | HrEvent::GroupChatMessage { sender, .. } => {
                Some(*sender)
            }
            HrEvent::DocumentAssigned { assigned_by, .. } => *assigned_by,
            HrEvent::DocumentUploaded { uploaded_by, .. } => Some(*uploaded_by),
            HrEvent::DocumentReviewed { reviewer, .. } => Some(*reviewer),
            HrEvent::TaskCompleted { assignee, .. } => Some(*assignee),
            HrEvent::WfhSubmitted { employee, .. } => Some(*employee),
            HrEvent::WfhRecommended { .. } | HrEvent::WfhDecided { .. } => None,
        }
    }

    /// Static routing for events that do not depend on stored state.
    ///
    /// `TaskCompleted` returns `None`: its recipient is decided by the
    /// dispatcher's escalation rule, which needs the assignee's role.
    pub fn routing(&self) -> Option<Recipient> {
        match self {
            HrEvent::ChatMessage { receiver, .. } => Some(Recipient::User(*receiver)),
            HrEvent::GroupChatMessage {
                sender, member_ids, ..
            } => {
                let members = member_ids
                    .iter()
                    .copied()
                    .filter(|member| member != sender)
                    .collect();
                Some(Recipient::Group(members))
            }
            HrEvent::DocumentAssigned { assignee, .. } => Some(Recipient::User(*assignee)),
            HrEvent::DocumentUploaded { reviewer_ids, .. } => {
                Some(Recipient::Group(reviewer_ids.clone()))
            }
            HrEvent::DocumentReviewed { owner, .. } => Some(Recipient::User(*owner)),
            HrEvent::TaskCompleted { .. } => None,
            HrEvent::WfhSubmitted { manager, .. } => Some(Recipient::User(*manager)),
            HrEvent::WfhRecommended { .. } => Some(Recipient::RoleGroup(Role::Hr)),
            HrEvent::WfhDecided { employee, .. } => Some(Recipient::User(*employee)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn chat_message_renders_sender_and_preview() {
        let event = HrEvent::ChatMessage {
            sender: 1,
            sender_name: "Asha".to_string(),
            receiver: 2,
            preview: "Hello!".to_string(),
        };
        let content = event.content();
        assert_eq!(content.title, "New message from Asha");
        assert_eq!(content.message, "Hello!");
        assert_eq!(content.category, "chat");
        assert_eq!(content.priority, Priority::Medium);
    }

    #[test]
    fn group_chat_routing_excludes_sender() {
        let event = HrEvent::GroupChatMessage {
            sender: 2,
            sender_name: "Rohan".to_string(),
            group_id: 7,
            group_name: "Payroll".to_string(),
            member_ids: vec![1, 2, 3],
            preview: "Team meeting at 3pm".to_string(),
        };
        assert_eq!(event.routing(), Some(Recipient::Group(vec![1, 3])));
        assert_eq!(event.content().entity_id, Some(7));
    }

    #[test]
    fn document_assignment_is_high_priority() {
        let event = HrEvent::DocumentAssigned {
            assignee: 1,
            doc_name: "PAN Card".to_string(),
            assigned_by: Some(3),
            assigned_by_name: "HR Admin".to_string(),
        };
        let content = event.content();
        assert_eq!(content.priority, Priority::High);
        assert_eq!(content.category, "document");
        assert!(content.message.contains("PAN Card"));
    }

    #[test]
    fn rejected_review_carries_remarks_at_high_priority() {
        let event = HrEvent::DocumentReviewed {
            owner: 1,
            doc_name: "PAN Card".to_string(),
            reviewer: 3,
            reviewer_name: "HR Admin".to_string(),
            verdict: DocumentVerdict::Rejected {
                remarks: "Image is blurry".to_string(),
            },
        };
        let content = event.content();
        assert_eq!(content.priority, Priority::High);
        assert!(content.message.contains("Image is blurry"));
    }

    #[test]
    fn task_completion_has_no_static_routing() {
        let event = HrEvent::TaskCompleted {
            assignee: 1,
            assignee_name: "Asha".to_string(),
            task_id: 11,
            task_title: "Quarterly report".to_string(),
            assigned_by: Some(Recipient::User(2)),
        };
        assert!(event.routing().is_none());
        let content = event.content();
        assert_eq!(content.category, "task");
        assert_eq!(content.entity_id, Some(11));
    }

    #[test]
    fn wfh_recommendation_targets_hr_group() {
        let event = HrEvent::WfhRecommended {
            employee_name: "Asha".to_string(),
            date_from: date("2025-10-01"),
            date_to: date("2025-10-03"),
            recommended_by: "Rohan".to_string(),
            wfh_id: 21,
        };
        assert_eq!(event.routing(), Some(Recipient::RoleGroup(Role::Hr)));
        assert!(event.content().message.contains("01-10-2025"));
    }

    #[test]
    fn wfh_rejection_message_includes_reason() {
        let event = HrEvent::WfhDecided {
            employee: 1,
            employee_name: "Asha".to_string(),
            date_from: date("2025-10-01"),
            date_to: date("2025-10-03"),
            decided_by: "HR Admin".to_string(),
            decision: WfhDecision::Rejected {
                reason: "Business requirements".to_string(),
            },
            wfh_id: 21,
        };
        let content = event.content();
        assert_eq!(content.priority, Priority::High);
        assert!(content.message.contains("Business requirements"));
        assert_eq!(event.routing(), Some(Recipient::User(1)));
    }
}
