//! Recipient addressing.

use hrm_core::roles::Role;
use hrm_core::types::DbId;

/// Where a notification event should be delivered.
///
/// Role groups address every active user carrying the tag, so callers
/// never have to smuggle a pseudo-identifier (such as a literal "HR")
/// through a user-id field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// A single user.
    User(DbId),
    /// An explicit ordered list of users, e.g. chat group members.
    Group(Vec<DbId>),
    /// Every active user carrying the role tag.
    RoleGroup(Role),
}
