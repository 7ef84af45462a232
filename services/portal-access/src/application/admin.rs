//! 管理端修改接口
//!
//! 所有调用都要求调用方角色为 `MASTER`，否则返回 `UnauthorizedMutation`
//! 且不触碰任何存储。

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::Utc;
use sig_auth_core::{Identity, Role, require_role};
use sig_common::IdentityId;
use tracing::{info, warn};

use super::document::PortalConfigDocument;
use crate::domain::{
    Module, ModulePatch, ModuleRegistry, OverrideSelector, OverrideStore, Permission,
    PresentationSettings, PresentationStore,
};
use crate::error::{AccessError, AccessResult};
use crate::infrastructure::AccessMetrics;

const CUSTOM_MODULE_TITLE: &str = "Novo Módulo";
const CUSTOM_MODULE_GROUP: &str = "Personalizados";
const CUSTOM_MODULE_ICON: &str = "📋";

/// 管理服务
#[derive(Debug, Clone)]
pub struct AdminService {
    registry: Arc<ModuleRegistry>,
    overrides: Arc<OverrideStore>,
    presentation: Arc<PresentationStore>,
}

impl AdminService {
    pub fn new(
        registry: Arc<ModuleRegistry>,
        overrides: Arc<OverrideStore>,
        presentation: Arc<PresentationStore>,
    ) -> Self {
        Self {
            registry,
            overrides,
            presentation,
        }
    }

    /// 注册模块
    pub fn register_module(&self, caller: &Identity, module: Module) -> AccessResult<()> {
        self.guarded(caller, "register_module", || {
            let id = module.id.clone();
            self.registry.register(module)?;
            info!(module_id = %id, "Module registered");
            Ok(())
        })
    }

    /// 以默认属性新增一个自定义模块，ID 为 `custom_<毫秒时间戳>`
    pub fn add_custom_module(&self, caller: &Identity) -> AccessResult<Module> {
        self.guarded(caller, "add_custom_module", || {
            let mut stamp = Utc::now().timestamp_millis();
            loop {
                let module = Module::new(
                    format!("custom_{}", stamp),
                    CUSTOM_MODULE_TITLE,
                    CUSTOM_MODULE_GROUP,
                    CUSTOM_MODULE_ICON,
                    Permission::Roles(BTreeSet::from([Role::Master])),
                );
                match self.registry.register(module.clone()) {
                    Ok(()) => {
                        info!(module_id = %module.id, "Custom module created");
                        return Ok(module);
                    }
                    Err(AccessError::DuplicateModuleId(_)) => stamp += 1,
                    Err(e) => return Err(e),
                }
            }
        })
    }

    /// 部分更新模块
    pub fn update_module(
        &self,
        caller: &Identity,
        id: &str,
        patch: ModulePatch,
    ) -> AccessResult<Module> {
        self.guarded(caller, "update_module", || {
            let module = self.registry.update(id, patch)?;
            info!(module_id = %id, "Module updated");
            Ok(module)
        })
    }

    /// 删除模块 (幂等)
    pub fn remove_module(&self, caller: &Identity, id: &str) -> AccessResult<bool> {
        self.guarded(caller, "remove_module", || {
            let removed = self.registry.remove(id);
            info!(module_id = %id, removed, "Module removal requested");
            Ok(removed)
        })
    }

    /// 设置覆盖规则，身份 ID 按凭证规则归一化
    pub fn set_override(
        &self,
        caller: &Identity,
        identity_id: &str,
        selector: OverrideSelector,
    ) -> AccessResult<IdentityId> {
        self.guarded(caller, "set_override", || {
            let id = IdentityId::normalize(identity_id)?;
            info!(identity_id = %id, selector = %selector, "Override set");
            self.overrides.set(id.clone(), selector);
            Ok(id)
        })
    }

    /// 删除覆盖规则 (幂等)
    pub fn clear_override(&self, caller: &Identity, identity_id: &str) -> AccessResult<bool> {
        self.guarded(caller, "clear_override", || {
            let id = IdentityId::normalize(identity_id)?;
            let cleared = self.overrides.clear(&id);
            info!(identity_id = %id, cleared, "Override cleared");
            Ok(cleared)
        })
    }

    /// 查询覆盖规则
    pub fn get_override(
        &self,
        caller: &Identity,
        identity_id: &str,
    ) -> AccessResult<Option<OverrideSelector>> {
        self.guarded(caller, "get_override", || {
            let id = IdentityId::normalize(identity_id)?;
            Ok(self.overrides.get(&id))
        })
    }

    pub fn set_presentation_css(&self, caller: &Identity, css: String) -> AccessResult<()> {
        self.guarded(caller, "set_presentation_css", || {
            info!(bytes = css.len(), "Presentation CSS replaced");
            self.presentation.set_css(css);
            Ok(())
        })
    }

    pub fn set_presentation_js(&self, caller: &Identity, js: String) -> AccessResult<()> {
        self.guarded(caller, "set_presentation_js", || {
            info!(bytes = js.len(), "Presentation script replaced");
            self.presentation.set_js(js);
            Ok(())
        })
    }

    pub fn presentation(&self, caller: &Identity) -> AccessResult<PresentationSettings> {
        self.guarded(caller, "presentation", || Ok(self.presentation.snapshot()))
    }

    /// 导出当前配置
    pub fn export_document(&self, caller: &Identity) -> AccessResult<PortalConfigDocument> {
        self.guarded(caller, "export_document", || {
            let (modules, overrides) = {
                let modules = self.registry.read();
                let overrides = self.overrides.read();
                let entries: BTreeMap<String, OverrideSelector> = overrides
                    .iter()
                    .map(|(id, selector)| (id.to_string(), selector.clone()))
                    .collect();
                (modules.clone(), entries)
            };
            Ok(PortalConfigDocument::new(
                modules,
                overrides,
                self.presentation.snapshot(),
            ))
        })
    }

    /// 导入配置: 清空后按文档顺序重新注册
    pub fn import_document(
        &self,
        caller: &Identity,
        document: &PortalConfigDocument,
    ) -> AccessResult<()> {
        self.guarded(caller, "import_document", || self.apply_document(document))
    }

    /// 不经角色检查直接写入文档 (仅供进程构建时装载使用)
    ///
    /// 注册表与覆盖规则在同时持有两把写锁时整体替换，
    /// 评估器不会看到新注册表搭配旧覆盖规则的中间状态。
    pub(crate) fn apply_document(&self, document: &PortalConfigDocument) -> AccessResult<()> {
        let validated = document.validate()?;
        let module_count = validated.modules.len();
        let override_count = validated.overrides.len();

        {
            let mut modules = self.registry.write();
            let mut overrides = self.overrides.write();
            *modules = validated.modules;
            *overrides = validated.overrides.into_iter().collect();
        }
        self.presentation.replace(validated.presentation);

        info!(
            version = document.version,
            modules = module_count,
            overrides = override_count,
            "Configuration document applied"
        );
        Ok(())
    }

    fn require_master(caller: &Identity) -> AccessResult<()> {
        require_role!(
            caller,
            Role::Master,
            AccessError::UnauthorizedMutation {
                role: caller.role()
            }
        );
        Ok(())
    }

    fn guarded<T>(
        &self,
        caller: &Identity,
        operation: &'static str,
        f: impl FnOnce() -> AccessResult<T>,
    ) -> AccessResult<T> {
        let result = Self::require_master(caller).and_then(|()| f());
        match &result {
            Ok(_) => AccessMetrics::record_mutation(operation),
            Err(e) => {
                warn!(
                    operation,
                    caller_id = %caller.id(),
                    caller_role = %caller.role(),
                    error = %e,
                    "Admin operation rejected"
                );
                AccessMetrics::record_rejection(operation, e.kind());
            }
        }
        result
    }
}
