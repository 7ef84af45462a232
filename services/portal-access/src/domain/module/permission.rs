//! 模块默认权限

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sig_auth_core::Role;
use thiserror::Error;

pub const WILDCARD_TOKEN: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Role set must not be empty")]
pub struct EmptyRoleSet;

/// 模块默认权限
///
/// 序列化形式为 `"*"` 或角色令牌数组。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPermission", into = "RawPermission")]
pub enum Permission {
    /// 匹配任意角色
    Wildcard,
    /// 非空角色集合
    Roles(BTreeSet<Role>),
}

impl Permission {
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Result<Self, EmptyRoleSet> {
        let set: BTreeSet<Role> = roles.into_iter().collect();
        if set.is_empty() {
            return Err(EmptyRoleSet);
        }
        Ok(Permission::Roles(set))
    }

    /// 该权限是否授予给定角色
    pub fn permits(&self, role: Role) -> bool {
        match self {
            Permission::Wildcard => true,
            Permission::Roles(roles) => roles.contains(&role),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Permission::Wildcard)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawPermission {
    Token(String),
    List(Vec<String>),
}

impl TryFrom<RawPermission> for Permission {
    type Error = String;

    fn try_from(raw: RawPermission) -> Result<Self, Self::Error> {
        let tokens = match raw {
            RawPermission::Token(token) if token == WILDCARD_TOKEN => {
                return Ok(Permission::Wildcard);
            }
            RawPermission::Token(token) => {
                return Err(format!("expected \"*\" or a role list, got \"{}\"", token));
            }
            RawPermission::List(tokens) => tokens,
        };

        if tokens.iter().any(|t| t == WILDCARD_TOKEN) {
            return Ok(Permission::Wildcard);
        }

        let roles = tokens
            .iter()
            .map(|t| t.parse::<Role>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|e| e.to_string())?;

        Permission::roles(roles).map_err(|e| e.to_string())
    }
}

impl From<Permission> for RawPermission {
    fn from(permission: Permission) -> Self {
        match permission {
            Permission::Wildcard => RawPermission::Token(WILDCARD_TOKEN.to_string()),
            Permission::Roles(roles) => {
                RawPermission::List(roles.iter().map(|r| r.as_str().to_string()).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_permits_every_role() {
        for role in Role::ALL {
            assert!(Permission::Wildcard.permits(role));
        }
    }

    #[test]
    fn test_role_set_permits_members_only() {
        let perm = Permission::roles([Role::StaffHr, Role::Master]).unwrap();
        assert!(perm.permits(Role::StaffHr));
        assert!(perm.permits(Role::Master));
        assert!(!perm.permits(Role::Citizen));
    }

    #[test]
    fn test_empty_role_set_rejected() {
        assert_eq!(Permission::roles(Vec::new()), Err(EmptyRoleSet));
    }

    #[test]
    fn test_deserialize_forms() {
        let wildcard: Permission = serde_json::from_str("\"*\"").unwrap();
        assert!(wildcard.is_wildcard());

        let legacy_wildcard: Permission = serde_json::from_str("[\"*\"]").unwrap();
        assert!(legacy_wildcard.is_wildcard());

        let roles: Permission = serde_json::from_str("[\"CIDADAO\", \"MASTER\"]").unwrap();
        assert!(roles.permits(Role::Citizen));
        assert!(!roles.permits(Role::StaffTax));
    }

    #[test]
    fn test_deserialize_rejects_bad_input() {
        assert!(serde_json::from_str::<Permission>("[]").is_err());
        assert!(serde_json::from_str::<Permission>("\"MASTER\"").is_err());
        assert!(serde_json::from_str::<Permission>("[\"ROOT\"]").is_err());
    }

    #[test]
    fn test_serialize_canonical_tokens() {
        let perm = Permission::roles([Role::Master, Role::Citizen]).unwrap();
        assert_eq!(
            serde_json::to_string(&perm).unwrap(),
            "[\"MASTER\",\"CITIZEN\"]"
        );
        assert_eq!(serde_json::to_string(&Permission::Wildcard).unwrap(), "\"*\"");
    }
}
