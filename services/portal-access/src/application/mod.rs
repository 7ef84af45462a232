//! 应用层

pub mod admin;
pub mod document;
pub mod evaluator;
pub mod portal;
pub mod session;

pub use admin::AdminService;
pub use document::{CURRENT_DOCUMENT_VERSION, PortalConfigDocument};
pub use evaluator::{PermissionEvaluator, VisibilityBasis};
pub use portal::PortalAccess;
pub use session::{SessionService, SessionStore};
