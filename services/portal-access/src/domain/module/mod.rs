//! 功能模块目录

#![allow(clippy::module_inception)]

pub mod module;
pub mod permission;
pub mod registry;

pub use module::{Module, ModulePatch};
pub use permission::{EmptyRoleSet, Permission};
pub use registry::{ModuleGroup, ModuleListing, ModuleRegistry};
