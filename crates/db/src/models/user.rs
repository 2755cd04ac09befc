//! User entity model and DTOs.

use hrm_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    /// Free-text position title as entered in the HR profile.
    pub position: String,
    /// Role tag resolved from `position` at write time
    /// (see `hrm_core::roles::Role::classify_position`).
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
///
/// The role tag is derived from `position` by the repository, never
/// supplied by the caller.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub position: String,
}
