//! Role → capability mapping.
//!
//! Every access decision in the portal goes through [`CapabilitySet`]. The set
//! is computed once per request from the account's role and superuser flag;
//! handlers only ever ask `contains(capability)`.

use serde::{Serialize, Serializer, ser::SerializeSeq};

use crate::user::Role;

/// A high-level operation family gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Administration: settings, themes, account roles and status.
    Admin,
    /// Financial records.
    Finance,
    /// Member records and groups.
    MembershipManagement,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::Admin,
        Capability::Finance,
        Capability::MembershipManagement,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Admin => 1 << 0,
            Self::Finance => 1 << 1,
            Self::MembershipManagement => 1 << 2,
        }
    }
}

/// Set of capabilities granted to one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const EMPTY: Self = Self(0);

    pub const fn all() -> Self {
        Self(
            Capability::Admin.bit()
                | Capability::Finance.bit()
                | Capability::MembershipManagement.bit(),
        )
    }

    /// Capabilities granted to a role.
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::all(),
            Role::Treasurer => Self(Capability::Finance.bit()),
            Role::Secretary | Role::Leader => Self(Capability::MembershipManagement.bit()),
            Role::Member => Self::EMPTY,
        }
    }

    /// Capabilities of an account. Superusers hold everything regardless of role.
    pub const fn for_account(role: Role, is_superuser: bool) -> Self {
        if is_superuser {
            Self::all()
        } else {
            Self::for_role(role)
        }
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let caps: Vec<Capability> = self.iter().collect();
        let mut seq = serializer.serialize_seq(Some(caps.len()))?;
        for cap in caps {
            seq.serialize_element(&cap)?;
        }
        seq.end()
    }
}
