//! Session slot trait 定义

use sig_errors::AppResult;

/// 持久化键值槽位
///
/// 每个键只保存一份字节内容；跨进程重启保留。
pub trait SessionSlot: Send + Sync {
    /// 读取槽位内容，不存在时返回 `None`
    fn read(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// 整体覆盖槽位内容
    fn write(&self, key: &str, value: &[u8]) -> AppResult<()>;

    /// 删除槽位，不存在时不报错
    fn remove(&self, key: &str) -> AppResult<()>;
}
