//! HR notification dispatch.
//!
//! Building blocks:
//!
//! - [`NotificationStore`] — the injected persistence seam: Postgres in
//!   production ([`PgStore`]), in-memory for tests ([`MemoryStore`]).
//! - [`Dispatcher`] — duplicate-suppressed direct delivery, recipient
//!   fan-out, and hierarchy-routed task-completion escalation.
//! - [`HrEvent`] — the domain event surface (chat, document review,
//!   task completion, WFH approval workflow).
//!
//! Every operation is a stateless request/response call; all state lives
//! in the store.

pub mod dispatcher;
pub mod event;
pub mod fingerprint;
pub mod recipient;
pub mod store;

pub use dispatcher::{Dispatcher, NotifyError, DEFAULT_DEDUP_WINDOW};
pub use event::{DocumentVerdict, HrEvent, NotificationContent, WfhDecision};
pub use recipient::Recipient;
pub use store::{MemoryStore, NotificationStore, PgStore, RecipientUser, StoreError};
