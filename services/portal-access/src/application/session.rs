//! 会话持久化与登录/登出流程

use std::sync::Arc;

use parking_lot::RwLock;
use sig_auth_core::{Identity, RoleResolver};
use sig_ports::SessionSlot;
use tracing::{info, warn};

use crate::error::{AccessError, AccessResult};
use crate::infrastructure::AccessMetrics;

/// 默认会话键
pub const DEFAULT_SESSION_KEY: &str = "sig_user";

/// 单槽位会话存储
///
/// 槽位中只保存一个序列化的身份；损坏的记录在读取时被清除，
/// 系统回退到匿名状态而不是报错。
#[derive(Clone)]
pub struct SessionStore {
    slot: Arc<dyn SessionSlot>,
    key: String,
}

impl SessionStore {
    pub fn new(slot: Arc<dyn SessionSlot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn save(&self, identity: &Identity) -> AccessResult<()> {
        let bytes =
            serde_json::to_vec(identity).map_err(|e| AccessError::Storage(e.to_string()))?;
        self.slot.write(&self.key, &bytes)?;
        Ok(())
    }

    /// 读取会话，任何失败都视为匿名
    pub fn load(&self) -> Option<Identity> {
        let bytes = match self.slot.read(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Session slot unreadable, continuing anonymously");
                return None;
            }
        };

        match Self::decode(&bytes) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding corrupt session record");
                AccessMetrics::record_session_healed();
                if let Err(clear_err) = self.slot.remove(&self.key) {
                    warn!(key = %self.key, error = %clear_err, "Failed to clear corrupt session record");
                }
                None
            }
        }
    }

    pub fn clear(&self) -> AccessResult<()> {
        self.slot.remove(&self.key)?;
        Ok(())
    }

    fn decode(bytes: &[u8]) -> AccessResult<Identity> {
        serde_json::from_slice(bytes).map_err(|e| AccessError::MalformedSession(e.to_string()))
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("key", &self.key).finish()
    }
}

/// 登录/登出服务
///
/// 当前身份只会被整体替换，不会被原地修改。
pub struct SessionService {
    resolver: Arc<dyn RoleResolver>,
    store: SessionStore,
    current: RwLock<Option<Identity>>,
}

impl SessionService {
    pub fn new(resolver: Arc<dyn RoleResolver>, store: SessionStore) -> Self {
        Self {
            resolver,
            store,
            current: RwLock::new(None),
        }
    }

    /// 解析凭证、持久化并设为当前身份
    pub fn login(&self, credential: &str) -> AccessResult<Identity> {
        let identity = self.resolver.resolve(credential).inspect_err(|e| {
            warn!(error = %e, "Login rejected");
        })?;
        self.store.save(&identity)?;
        *self.current.write() = Some(identity.clone());

        info!(
            identity_id = %identity.id(),
            role = %identity.role(),
            "Login succeeded"
        );
        Ok(identity)
    }

    /// 登出: 立即回到匿名状态，再清除持久化记录
    pub fn logout(&self) -> AccessResult<()> {
        let previous = self.current.write().take();
        self.store.clear()?;
        if let Some(identity) = previous {
            info!(identity_id = %identity.id(), "Logout");
        }
        Ok(())
    }

    /// 进程启动时恢复会话
    pub fn restore(&self) -> Option<Identity> {
        let identity = self.store.load();
        if let Some(ref restored) = identity {
            info!(identity_id = %restored.id(), role = %restored.role(), "Session restored");
        }
        *self.current.write() = identity.clone();
        identity
    }

    pub fn current(&self) -> Option<Identity> {
        self.current.read().clone()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}
