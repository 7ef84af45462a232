//! sig-auth-core - 认证核心库
//!
//! 角色、身份以及凭证到身份的解析

pub mod identity;
pub mod resolver;
pub mod role;

pub use identity::Identity;
pub use resolver::{CredentialError, RoleResolver, SuffixRoleResolver, MIN_CREDENTIAL_DIGITS};
pub use role::{Role, UnknownRole};

/// 角色检查宏
///
/// 调用方身份不满足角色要求时以给定错误提前返回
#[macro_export]
macro_rules! require_role {
    ($identity:expr, $role:expr, $err:expr) => {
        if !$identity.has_role($role) {
            return Err($err);
        }
    };
}
