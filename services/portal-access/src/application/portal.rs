//! 门户访问控制的进程级装配
//!
//! 各存储显式构造并注入评估器和管理服务，不使用全局状态。

use std::sync::Arc;

use sig_auth_core::{RoleResolver, SuffixRoleResolver};
use sig_config::AppConfig;
use sig_ports::SessionSlot;

use super::admin::AdminService;
use super::document::PortalConfigDocument;
use super::evaluator::PermissionEvaluator;
use super::session::{SessionService, SessionStore};
use crate::domain::{Module, ModuleListing, ModuleRegistry, OverrideStore, PresentationStore};
use crate::error::AccessResult;
use crate::infrastructure::FileSessionSlot;

/// 门户访问控制的进程级入口
///
/// 各存储只在构建时被直接写入；之后的所有修改都必须经过 `admin()` 的角色检查。
pub struct PortalAccess {
    registry: Arc<ModuleRegistry>,
    evaluator: PermissionEvaluator,
    admin: AdminService,
    sessions: SessionService,
}

impl PortalAccess {
    /// 以空注册表构建
    pub fn new(
        resolver: Arc<dyn RoleResolver>,
        slot: Arc<dyn SessionSlot>,
        session_key: impl Into<String>,
    ) -> Self {
        let registry = Arc::new(ModuleRegistry::new());
        let overrides = Arc::new(OverrideStore::new());
        let presentation = Arc::new(PresentationStore::new());

        Self {
            evaluator: PermissionEvaluator::new(registry.clone(), overrides.clone()),
            admin: AdminService::new(registry.clone(), overrides, presentation),
            sessions: SessionService::new(resolver, SessionStore::new(slot, session_key)),
            registry,
        }
    }

    /// 构建并装载启动配置文档 (不经角色检查)
    pub fn with_document(
        resolver: Arc<dyn RoleResolver>,
        slot: Arc<dyn SessionSlot>,
        session_key: impl Into<String>,
        document: &PortalConfigDocument,
    ) -> AccessResult<Self> {
        let portal = Self::new(resolver, slot, session_key);
        portal.admin.apply_document(document)?;
        Ok(portal)
    }

    /// 按配置构建: 末位数字角色解析 + 文件会话槽位
    pub fn from_config(config: &AppConfig, document: &PortalConfigDocument) -> AccessResult<Self> {
        Self::with_document(
            Arc::new(SuffixRoleResolver::new(config.portal.min_credential_digits)),
            Arc::new(FileSessionSlot::new(config.session.path.clone())),
            config.session.key.clone(),
            document,
        )
    }

    /// 当前会话身份可见的模块
    pub fn visible_modules(&self) -> Vec<Module> {
        self.evaluator.visible(self.sessions.current().as_ref())
    }

    /// 当前会话身份可见的模块 (分组)
    pub fn visible_groups(&self) -> ModuleListing {
        self.evaluator.visible_groups(self.sessions.current().as_ref())
    }

    /// 完整模块目录的只读快照
    pub fn catalog(&self) -> ModuleListing {
        self.registry.list()
    }

    pub fn module(&self, id: &str) -> Option<Module> {
        self.registry.get(id)
    }

    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    pub fn admin(&self) -> &AdminService {
        &self.admin
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }
}
