//! 覆盖规则存储

use std::collections::HashMap;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use sig_common::IdentityId;

use super::selector::OverrideSelector;

/// 按身份 ID 存储的覆盖规则
///
/// 模块被删除后，引用它的覆盖规则保持原样，只是不再匹配。
#[derive(Debug, Default)]
pub struct OverrideStore {
    entries: RwLock<HashMap<IdentityId, OverrideSelector>>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 无条件替换该身份已有的覆盖规则
    pub fn set(&self, identity_id: IdentityId, selector: OverrideSelector) {
        self.entries.write().insert(identity_id, selector);
    }

    /// `None` 表示没有覆盖，回退到角色默认判断
    pub fn get(&self, identity_id: &IdentityId) -> Option<OverrideSelector> {
        self.entries.read().get(identity_id).cloned()
    }

    /// 删除覆盖规则 (幂等)，返回是否确有删除
    pub fn clear(&self, identity_id: &IdentityId) -> bool {
        self.entries.write().remove(identity_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, HashMap<IdentityId, OverrideSelector>> {
        self.entries.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, HashMap<IdentityId, OverrideSelector>> {
        self.entries.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> IdentityId {
        IdentityId::parse(raw).unwrap()
    }

    #[test]
    fn test_set_replaces_existing() {
        let store = OverrideStore::new();
        store.set(id("123"), OverrideSelector::Wildcard);
        store.set(id("123"), OverrideSelector::modules(["home"]));

        assert_eq!(store.get(&id("123")), Some(OverrideSelector::modules(["home"])));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_absent_override() {
        let store = OverrideStore::new();
        assert_eq!(store.get(&id("999")), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = OverrideStore::new();
        store.set(id("123"), OverrideSelector::none());

        assert!(store.clear(&id("123")));
        assert!(!store.clear(&id("123")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_set_clear_and_read() {
        let store = OverrideStore::new();

        std::thread::scope(|s| {
            let store = &store;
            for t in 0..8 {
                s.spawn(move || {
                    for i in 0..50 {
                        let key = format!("{}{:03}", t + 1, i);
                        store.set(id(&key), OverrideSelector::modules([key.clone()]));
                        store.set(id("7"), OverrideSelector::modules([key]));
                    }
                    store.clear(&id(&format!("{}000", t + 1)));
                });
            }
            for _ in 0..4 {
                s.spawn(move || {
                    for _ in 0..100 {
                        for (key, selector) in store.read().iter() {
                            if key.as_str() != "7" {
                                assert!(selector.allows(key.as_str()), "{} -> {}", key, selector);
                            }
                        }
                    }
                });
            }
        });

        assert_eq!(store.len(), 8 * 49 + 1);
        assert!(store.get(&id("1000")).is_none());
        assert!(store.get(&id("7")).is_some());
    }
}
