use core::str::FromStr;

use serde::{Deserialize, Serialize};

use sproutstand_core::DomainError;

/// Actor role in the marketplace.
///
/// The set is closed: every user record carries exactly one of these, and the
/// policy layer keys its checks on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    KidSeller,
    ParentGuardian,
    Buyer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::KidSeller => "kid_seller",
            Role::ParentGuardian => "parent_guardian",
            Role::Buyer => "buyer",
            Role::Admin => "admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kid_seller" => Ok(Role::KidSeller),
            "parent_guardian" => Ok(Role::ParentGuardian),
            "buyer" => Ok(Role::Buyer),
            "admin" => Ok(Role::Admin),
            other => Err(DomainError::invalid_input(format!("unknown role: {other}"))),
        }
    }
}
