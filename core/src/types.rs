//! Domain types for the Hatena Blog member API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseRoleError;

/// A member of a blog as returned by the API.
///
/// `role` stays a plain string so that a role the server knows about but this
/// crate does not still decodes. Use [`Role`] to validate input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogMember {
    pub username: String,
    pub role: String,
}

/// Body of `GET members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersResponse {
    pub members: Vec<BlogMember>,
}

/// Permission level of a blog member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Contributor,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Contributor];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Contributor => "contributor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_serializes_to_wire_shape() {
        let member = BlogMember {
            username: "alice".to_string(),
            role: "editor".to_string(),
        };
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json, serde_json::json!({"username": "alice", "role": "editor"}));
    }

    #[test]
    fn members_response_decodes_list() {
        let body = r#"{"members":[{"username":"a","role":"admin"},{"username":"b","role":"contributor"}]}"#;
        let resp: MembersResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.members.len(), 2);
        assert_eq!(resp.members[1].username, "b");
    }

    #[test]
    fn members_response_rejects_missing_field() {
        let result: Result<MembersResponse, _> = serde_json::from_str(r#"{"users":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_role_still_decodes_as_member() {
        let member: BlogMember =
            serde_json::from_str(r#"{"username":"x","role":"owner"}"#).unwrap();
        assert_eq!(member.role, "owner");
    }

    #[test]
    fn role_parses_closed_set() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("editor".parse::<Role>(), Ok(Role::Editor));
        assert_eq!("contributor".parse::<Role>(), Ok(Role::Contributor));
        let err = "Admin".parse::<Role>().unwrap_err();
        assert_eq!(err, ParseRoleError("Admin".to_string()));
        assert!(err.to_string().contains("Admin"));
    }
}
