//! 领域层

pub mod module;
pub mod overrides;
pub mod presentation;

pub use module::{Module, ModuleGroup, ModuleListing, ModulePatch, ModuleRegistry, Permission};
pub use overrides::{OverrideSelector, OverrideStore};
pub use presentation::{PresentationSettings, PresentationStore};
