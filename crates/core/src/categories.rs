//! Well-known notification category constants.
//!
//! These must match the values stored in the `notifications.category`
//! column and enforced by its CHECK constraint.

/// Direct or group chat message.
pub const CATEGORY_CHAT: &str = "chat";

/// Document assignment, upload, or review outcome.
pub const CATEGORY_DOCUMENT: &str = "document";

/// Task assignment and completion escalation.
pub const CATEGORY_TASK: &str = "task";

/// Work-from-home request workflow.
pub const CATEGORY_WFH: &str = "wfh";
