//! 会话槽位实现

pub mod file_slot;
pub mod memory_slot;

pub use file_slot::FileSessionSlot;
pub use memory_slot::InMemorySessionSlot;
