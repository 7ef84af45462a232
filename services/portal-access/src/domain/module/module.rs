//! 模块实体

use serde::{Deserialize, Serialize};

use super::permission::Permission;

/// 功能模块
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// 在注册表生命周期内唯一，注册后不可修改
    pub id: String,
    pub title: String,
    /// 分组名 (可重复)
    pub group: String,
    /// 图标 (不透明字符串)
    pub icon: String,
    pub permissions: Permission,
    /// 导航路由
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl Module {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        group: impl Into<String>,
        icon: impl Into<String>,
        permissions: Permission,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            group: group.into(),
            icon: icon.into(),
            permissions,
            route: None,
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// 应用补丁，只修改补丁中出现的字段
    pub fn apply(&mut self, patch: ModulePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(group) = patch.group {
            self.group = group;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(permissions) = patch.permissions {
            self.permissions = permissions;
        }
        if let Some(route) = patch.route {
            self.route = Some(route);
        }
    }
}

/// 模块部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub permissions: Option<Permission>,
    #[serde(default)]
    pub route: Option<String>,
}

impl ModulePatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn permissions(mut self, permissions: Permission) -> Self {
        self.permissions = Some(permissions);
        self
    }
}
