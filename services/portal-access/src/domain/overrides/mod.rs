//! 按身份的可见性覆盖

pub mod selector;
pub mod store;

pub use selector::OverrideSelector;
pub use store::OverrideStore;
