//! Portal Access - 门户模块访问控制
//!
//! 模块化架构：
//! - `domain`: 模块注册表、覆盖规则、外观槽位
//! - `application`: 可见性评估、管理端接口、会话、配置文档
//! - `infrastructure`: 会话槽位实现与指标

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod seed;

pub use application::{
    AdminService, PermissionEvaluator, PortalAccess, PortalConfigDocument, SessionService,
    SessionStore, VisibilityBasis,
};
pub use error::{AccessError, AccessResult};
