//! Organization membership roles.
//!
//! Roles arrive from the backend as strings. They are parsed into an
//! enumerated type with an explicit [`OrgRole::Unknown`] variant so that
//! gating logic never does free-form string matching. Ranks form a strict
//! total order: owner(3) > admin(2) > member(1) > unknown(0).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minimum rank allowed to see the member list and create invites.
pub const MANAGE_MEMBERS_RANK: u8 = 2;

/// A user's role within an organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(from = "String", into = "String")]
pub enum OrgRole {
    Owner,
    Admin,
    Member,
    /// Any role string outside the known set. Ranked lowest.
    #[default]
    Unknown,
}

impl OrgRole {
    /// Parse a role string case-insensitively. Unrecognized input maps to
    /// [`OrgRole::Unknown`], never an error.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "owner" => Self::Owner,
            "admin" => Self::Admin,
            "member" => Self::Member,
            _ => Self::Unknown,
        }
    }

    /// Integer rank used for gating comparisons.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Owner => 3,
            Self::Admin => 2,
            Self::Member => 1,
            Self::Unknown => 0,
        }
    }

    /// Whether this role may view members and create invites (rank ≥ admin).
    #[must_use]
    pub const fn can_manage_members(self) -> bool {
        self.rank() >= MANAGE_MEMBERS_RANK
    }

    /// Canonical lowercase form, as sent over the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for OrgRole {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<OrgRole> for String {
    fn from(role: OrgRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for OrgRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialOrd for OrgRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrgRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("owner", OrgRole::Owner, 3)]
    #[case("admin", OrgRole::Admin, 2)]
    #[case("member", OrgRole::Member, 1)]
    #[case("guest", OrgRole::Unknown, 0)]
    #[case("", OrgRole::Unknown, 0)]
    #[case("OWNER", OrgRole::Owner, 3)]
    #[case("  Admin ", OrgRole::Admin, 2)]
    #[case("MeMbEr", OrgRole::Member, 1)]
    fn parse_and_rank(#[case] input: &str, #[case] expected: OrgRole, #[case] rank: u8) {
        let role = OrgRole::parse(input);
        assert_eq!(role, expected);
        assert_eq!(role.rank(), rank);
    }

    #[rstest]
    #[case(OrgRole::Owner, true)]
    #[case(OrgRole::Admin, true)]
    #[case(OrgRole::Member, false)]
    #[case(OrgRole::Unknown, false)]
    fn manage_members_gate(#[case] role: OrgRole, #[case] allowed: bool) {
        assert_eq!(role.can_manage_members(), allowed);
    }

    #[test]
    fn ranks_form_strict_total_order() {
        assert!(OrgRole::Owner > OrgRole::Admin);
        assert!(OrgRole::Admin > OrgRole::Member);
        assert!(OrgRole::Member > OrgRole::Unknown);
    }

    #[test]
    fn serde_roundtrip_through_strings() {
        let json = serde_json::to_string(&OrgRole::Admin).unwrap();
        assert_eq!(json, r#""admin""#);
        let role: OrgRole = serde_json::from_str(r#""Owner""#).unwrap();
        assert_eq!(role, OrgRole::Owner);
        let role: OrgRole = serde_json::from_str(r#""superuser""#).unwrap();
        assert_eq!(role, OrgRole::Unknown);
    }
}
