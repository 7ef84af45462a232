//! 身份

use serde::{Deserialize, Serialize};
use sig_common::IdentityId;

use crate::role::Role;

/// 已解析的调用方身份
///
/// 创建后不可变；登出或重新登录时整体替换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    id: IdentityId,
    role: Role,
    display_name: String,
}

impl Identity {
    pub fn new(id: IdentityId, role: Role, display_name: impl Into<String>) -> Self {
        Self {
            id,
            role,
            display_name: display_name.into(),
        }
    }

    /// 使用角色默认显示名创建
    pub fn with_default_name(id: IdentityId, role: Role) -> Self {
        let display_name = role.display_name();
        Self::new(id, role, display_name)
    }

    pub fn id(&self) -> &IdentityId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
