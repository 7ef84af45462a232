//! 文件会话槽位
//!
//! 每个键对应目录下的一个文件；写入先落临时文件再原子重命名。

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use sig_errors::{AppError, AppResult};
use sig_ports::SessionSlot;
use tracing::debug;

#[derive(Debug)]
pub struct FileSessionSlot {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::validation(format!("Invalid session key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SessionSlot for FileSessionSlot {
    fn read(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        let _guard = self.lock.lock();
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &[u8]) -> AppResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let _guard = self.lock.lock();
        fs::create_dir_all(&self.dir)?;
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "Session slot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        let _guard = self.lock.lock();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
