//! 模块注册表
//!
//! 所有写操作先校验后修改；失败时注册表保持调用前的状态。

use std::collections::HashSet;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::module::{Module, ModulePatch};
use crate::error::{AccessError, AccessResult};

/// 同组模块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGroup {
    pub name: String,
    pub modules: Vec<Module>,
}

/// 注册表快照
///
/// 组按首次出现顺序排列，组内按注册顺序排列。可以反复迭代。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleListing {
    groups: Vec<ModuleGroup>,
}

impl ModuleListing {
    /// 按注册顺序的模块构建分组
    pub fn from_ordered(modules: impl IntoIterator<Item = Module>) -> Self {
        let mut groups: Vec<ModuleGroup> = Vec::new();
        for module in modules {
            match groups.iter_mut().find(|g| g.name == module.group) {
                Some(group) => group.modules.push(module),
                None => groups.push(ModuleGroup {
                    name: module.group.clone(),
                    modules: vec![module],
                }),
            }
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[ModuleGroup] {
        &self.groups
    }

    /// 依分组顺序遍历所有模块
    pub fn iter(&self) -> impl Iterator<Item = &Module> + '_ {
        self.groups.iter().flat_map(|g| g.modules.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.modules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|m| m.id.as_str()).collect()
    }

    pub fn into_modules(self) -> Vec<Module> {
        self.groups.into_iter().flat_map(|g| g.modules).collect()
    }
}

impl<'a> IntoIterator for &'a ModuleListing {
    type Item = &'a Module;
    type IntoIter = Box<dyn Iterator<Item = &'a Module> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// 模块注册表
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    /// 注册顺序
    modules: RwLock<Vec<Module>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按给定顺序注册一组模块
    pub fn with_modules(modules: impl IntoIterator<Item = Module>) -> AccessResult<Self> {
        let registry = Self::new();
        registry.replace_all(modules.into_iter().collect())?;
        Ok(registry)
    }

    /// 注册模块，追加到当前序列末尾
    pub fn register(&self, module: Module) -> AccessResult<()> {
        let mut modules = self.modules.write();
        if modules.iter().any(|m| m.id == module.id) {
            return Err(AccessError::DuplicateModuleId(module.id));
        }
        modules.push(module);
        Ok(())
    }

    /// 部分更新模块，返回更新后的模块
    pub fn update(&self, id: &str, patch: ModulePatch) -> AccessResult<Module> {
        let mut modules = self.modules.write();
        let module = modules
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AccessError::ModuleNotFound(id.to_string()))?;
        module.apply(patch);
        Ok(module.clone())
    }

    /// 删除模块 (幂等)，返回是否确有删除
    ///
    /// 不会级联到覆盖规则。
    pub fn remove(&self, id: &str) -> bool {
        let mut modules = self.modules.write();
        let before = modules.len();
        modules.retain(|m| m.id != id);
        modules.len() != before
    }

    /// 清空并按给定顺序重新注册
    ///
    /// 任何重复 ID 都会使整个操作失败且不修改注册表。
    pub fn replace_all(&self, modules: Vec<Module>) -> AccessResult<()> {
        let mut seen = HashSet::with_capacity(modules.len());
        if let Some(dup) = modules.iter().find(|m| !seen.insert(m.id.as_str())) {
            return Err(AccessError::DuplicateModuleId(dup.id.clone()));
        }
        *self.modules.write() = modules;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Module> {
        self.modules.read().iter().find(|m| m.id == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.read().iter().any(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }

    /// 分组后的有序快照
    pub fn list(&self) -> ModuleListing {
        ModuleListing::from_ordered(self.modules.read().iter().cloned())
    }

    /// 跨存储读取时使用；加锁顺序固定为先注册表后覆盖规则
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Vec<Module>> {
        self.modules.read()
    }

    /// 调用方负责保证写入的序列无重复 ID
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Vec<Module>> {
        self.modules.write()
    }
}
