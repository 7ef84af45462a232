//! 模块可见性评估器
//!
//! 决策逻辑 (逐个模块，按注册表顺序):
//! 1. 匿名访客: 权限为 `*` 或包含 `CITIZEN` 时可见
//! 2. 存在覆盖规则: 仅由覆盖规则决定，不再参考角色默认权限
//! 3. 无覆盖规则: 权限为 `*` 或包含身份角色时可见
//!
//! 过滤只删除、不重排。每次调用都读取最新状态，不做缓存。
//! 一次评估在同时持有注册表与覆盖规则读锁的情况下完成，
//! 加锁顺序为先注册表后覆盖规则。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use sig_auth_core::{Identity, Role};
use sig_common::IdentityId;
use tracing::debug;

use crate::domain::{Module, ModuleListing, ModuleRegistry, OverrideSelector, OverrideStore};
use crate::infrastructure::AccessMetrics;

/// 决策依据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityBasis {
    /// 匿名访客，按 CITIZEN 处理
    Anonymous,
    /// 身份覆盖规则
    Override,
    /// 角色默认权限
    Role,
}

impl std::fmt::Display for VisibilityBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisibilityBasis::Anonymous => write!(f, "ANONYMOUS"),
            VisibilityBasis::Override => write!(f, "OVERRIDE"),
            VisibilityBasis::Role => write!(f, "ROLE"),
        }
    }
}

enum Rule {
    Role(Role),
    Override(OverrideSelector),
}

impl Rule {
    fn admits(&self, module: &Module) -> bool {
        match self {
            Rule::Role(role) => module.permissions.permits(*role),
            Rule::Override(selector) => selector.allows(&module.id),
        }
    }
}

/// 权限评估器
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    registry: Arc<ModuleRegistry>,
    overrides: Arc<OverrideStore>,
}

impl PermissionEvaluator {
    pub fn new(registry: Arc<ModuleRegistry>, overrides: Arc<OverrideStore>) -> Self {
        Self {
            registry,
            overrides,
        }
    }

    /// 可见模块 (保持注册表的分组顺序)
    pub fn visible(&self, identity: Option<&Identity>) -> Vec<Module> {
        self.visible_groups(identity).into_modules()
    }

    /// 可见模块，按组返回
    pub fn visible_groups(&self, identity: Option<&Identity>) -> ModuleListing {
        let start = Instant::now();
        let (basis, listing) = {
            let modules = self.registry.read();
            let overrides = self.overrides.read();
            let (basis, rule) = Self::rule_for(identity, &overrides);
            let listing = ModuleListing::from_ordered(
                modules.iter().filter(|m| rule.admits(m)).cloned(),
            );
            (basis, listing)
        };

        debug!(
            identity_id = %identity.map(|i| i.id().to_string()).unwrap_or_default(),
            basis = %basis,
            visible = listing.len(),
            "Visibility evaluated"
        );
        AccessMetrics::record_evaluation(start, &basis.to_string(), listing.len());

        listing
    }

    /// 单个模块是否可见 (用于直接导航的守卫)
    pub fn can_access(&self, identity: Option<&Identity>, module_id: &str) -> bool {
        let modules = self.registry.read();
        let overrides = self.overrides.read();
        let (_, rule) = Self::rule_for(identity, &overrides);
        modules
            .iter()
            .find(|m| m.id == module_id)
            .is_some_and(|module| rule.admits(module))
    }

    /// 身份对应的决策依据
    pub fn basis(&self, identity: Option<&Identity>) -> VisibilityBasis {
        Self::rule_for(identity, &self.overrides.read()).0
    }

    fn rule_for(
        identity: Option<&Identity>,
        overrides: &HashMap<IdentityId, OverrideSelector>,
    ) -> (VisibilityBasis, Rule) {
        match identity {
            None => (VisibilityBasis::Anonymous, Rule::Role(Role::Citizen)),
            Some(identity) => match overrides.get(identity.id()).cloned() {
                Some(selector) => (VisibilityBasis::Override, Rule::Override(selector)),
                None => (VisibilityBasis::Role, Rule::Role(identity.role())),
            },
        }
    }
}
