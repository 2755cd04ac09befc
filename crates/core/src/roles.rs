//! Role tags and position-string classification.
//!
//! The `users.role` column stores one of the constants below. The tag is
//! resolved from the free-text position title once, when the user row is
//! written; dispatch logic only ever consumes the tag.

use serde::{Deserialize, Serialize};

pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_HR: &str = "hr";

/// Coarse organizational role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
    Hr,
}

impl Role {
    /// The tag stored in `users.role`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => ROLE_EMPLOYEE,
            Role::Manager => ROLE_MANAGER,
            Role::Hr => ROLE_HR,
        }
    }

    /// Classify a free-text position title into a role tag.
    ///
    /// Case-insensitive substring match: "HR" wins over "Manager" (an
    /// "HR Manager" sits on the HR side of the escalation chain), and
    /// anything else is a regular employee.
    pub fn classify_position(position: &str) -> Role {
        let position = position.to_lowercase();
        if position.contains("hr") {
            Role::Hr
        } else if position.contains("manager") {
            Role::Manager
        } else {
            Role::Employee
        }
    }

    /// Whether a completed task by this role escalates to the HR group
    /// instead of the recorded assigner.
    pub fn escalates_to_hr(&self) -> bool {
        matches!(self, Role::Manager | Role::Hr)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role tag is not one of the known values.
#[derive(Debug, thiserror::Error)]
#[error("unknown role tag: {0}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_EMPLOYEE => Ok(Role::Employee),
            ROLE_MANAGER => Ok(Role::Manager),
            ROLE_HR => Ok(Role::Hr),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engineer_is_employee() {
        assert_eq!(Role::classify_position("Software Engineer"), Role::Employee);
    }

    #[test]
    fn manager_titles_classify_as_manager() {
        assert_eq!(Role::classify_position("Manager"), Role::Manager);
        assert_eq!(Role::classify_position("Senior Engineering Manager"), Role::Manager);
        assert_eq!(Role::classify_position("manager, payroll"), Role::Manager);
    }

    #[test]
    fn hr_titles_classify_as_hr() {
        assert_eq!(Role::classify_position("HR"), Role::Hr);
        assert_eq!(Role::classify_position("HR Admin"), Role::Hr);
        assert_eq!(Role::classify_position("hr executive"), Role::Hr);
    }

    #[test]
    fn hr_wins_over_manager() {
        assert_eq!(Role::classify_position("HR Manager"), Role::Hr);
    }

    #[test]
    fn empty_position_is_employee() {
        assert_eq!(Role::classify_position(""), Role::Employee);
    }

    #[test]
    fn tag_round_trips() {
        for role in [Role::Employee, Role::Manager, Role::Hr] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn only_manager_and_hr_escalate() {
        assert!(!Role::Employee.escalates_to_hr());
        assert!(Role::Manager.escalates_to_hr());
        assert!(Role::Hr.escalates_to_hr());
    }
}
