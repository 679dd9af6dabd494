//! Viewer roles as asserted by the auth provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Role carried by an authenticated viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    Admin,
    Manager,
    Presenter,
    Mentor,
    Student,
}

impl ViewerRole {
    /// Returns all roles.
    pub fn all() -> &'static [ViewerRole] {
        &[
            ViewerRole::Admin,
            ViewerRole::Manager,
            ViewerRole::Presenter,
            ViewerRole::Mentor,
            ViewerRole::Student,
        ]
    }

    /// Administrative roles see every session's content without enrollment.
    pub fn is_administrative(&self) -> bool {
        matches!(self, ViewerRole::Admin | ViewerRole::Manager)
    }

    /// Staff may read view analytics.
    pub fn is_staff(&self) -> bool {
        !matches!(self, ViewerRole::Student)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerRole::Admin => "admin",
            ViewerRole::Manager => "manager",
            ViewerRole::Presenter => "presenter",
            ViewerRole::Mentor => "mentor",
            ViewerRole::Student => "student",
        }
    }
}

impl fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewerRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(ViewerRole::Admin),
            "manager" => Ok(ViewerRole::Manager),
            "presenter" => Ok(ViewerRole::Presenter),
            "mentor" => Ok(ViewerRole::Mentor),
            "student" => Ok(ViewerRole::Student),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("Admin".parse::<ViewerRole>().unwrap(), ViewerRole::Admin);
        assert_eq!(" student ".parse::<ViewerRole>().unwrap(), ViewerRole::Student);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("superuser".parse::<ViewerRole>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for role in ViewerRole::all() {
            assert_eq!(role.to_string().parse::<ViewerRole>().unwrap(), *role);
        }
    }

    #[test]
    fn only_admin_and_manager_are_administrative() {
        assert!(ViewerRole::Admin.is_administrative());
        assert!(ViewerRole::Manager.is_administrative());
        assert!(!ViewerRole::Presenter.is_administrative());
        assert!(!ViewerRole::Mentor.is_administrative());
        assert!(!ViewerRole::Student.is_administrative());
    }

    #[test]
    fn students_are_not_staff() {
        assert!(!ViewerRole::Student.is_staff());
        assert!(ViewerRole::Mentor.is_staff());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&ViewerRole::Presenter).unwrap();
        assert_eq!(json, "\"presenter\"");
    }
}
