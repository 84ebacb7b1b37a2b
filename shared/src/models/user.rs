//! User roles supplied by the identity provider

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role of the acting user, carried in the identity token. Role management
/// itself is the identity provider's concern; this crate only consumes the
/// flags for gating settings and audit-log access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Superadmin,
    Admin,
    User,
}

impl UserRole {
    pub fn is_superadmin(&self) -> bool {
        matches!(self, UserRole::Superadmin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Superadmin | UserRole::Admin)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPERADMIN" => Ok(UserRole::Superadmin),
            "ADMIN" => Ok(UserRole::Admin),
            "USER" => Ok(UserRole::User),
            other => Err(format!("unknown user role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hierarchy() {
        assert!(UserRole::Superadmin.is_superadmin());
        assert!(UserRole::Superadmin.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Admin.is_superadmin());
        assert!(!UserRole::User.is_admin());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("SUPERADMIN".parse::<UserRole>().unwrap(), UserRole::Superadmin);
        assert!("root".parse::<UserRole>().is_err());
    }
}
