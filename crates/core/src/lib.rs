//! Shared types and constants for the HR notification platform.

pub mod categories;
pub mod hashing;
pub mod priority;
pub mod roles;
pub mod types;
