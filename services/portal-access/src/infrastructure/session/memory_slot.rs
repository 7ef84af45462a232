//! 内存会话槽位 (测试与临时进程使用)

use std::collections::HashMap;

use parking_lot::RwLock;
use sig_errors::AppResult;
use sig_ports::SessionSlot;

#[derive(Debug, Default)]
pub struct InMemorySessionSlot {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemorySessionSlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionSlot for InMemorySessionSlot {
    fn read(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> AppResult<()> {
        self.data.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.data.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_remove() {
        let slot = InMemorySessionSlot::new();
        assert_eq!(slot.read("sig_user").unwrap(), None);

        slot.write("sig_user", b"{}").unwrap();
        assert_eq!(slot.read("sig_user").unwrap(), Some(b"{}".to_vec()));

        slot.remove("sig_user").unwrap();
        slot.remove("sig_user").unwrap();
        assert_eq!(slot.read("sig_user").unwrap(), None);
    }
}
