//! 凭证解析
//!
//! `RoleResolver` 是核心与真实凭证校验之间的唯一边界。

use sig_common::IdentityId;
use thiserror::Error;
use tracing::debug;

use crate::identity::Identity;
use crate::role::Role;

/// 该身份方案下归一化凭证的最少位数
pub const MIN_CREDENTIAL_DIGITS: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Invalid credential: expected at least {expected} digits, got {digits}")]
    InvalidCredential { digits: usize, expected: usize },
}

/// 凭证 -> 身份
pub trait RoleResolver: Send + Sync {
    /// 返回恰好一个身份，或 `InvalidCredential`
    fn resolve(&self, raw_credential: &str) -> Result<Identity, CredentialError>;
}

/// 按归一化凭证末位数字推导角色的确定性实现
///
/// `0 -> MASTER, 1 -> STAFF_TAX, 2 -> STAFF_SERVICE, 3 -> STAFF_HR`，其余为 `CITIZEN`
#[derive(Debug, Clone)]
pub struct SuffixRoleResolver {
    min_digits: usize,
}

impl SuffixRoleResolver {
    pub fn new(min_digits: usize) -> Self {
        Self { min_digits }
    }

    fn role_for(last_digit: Option<u8>) -> Role {
        match last_digit {
            Some(0) => Role::Master,
            Some(1) => Role::StaffTax,
            Some(2) => Role::StaffService,
            Some(3) => Role::StaffHr,
            _ => Role::Citizen,
        }
    }
}

impl Default for SuffixRoleResolver {
    fn default() -> Self {
        Self::new(MIN_CREDENTIAL_DIGITS)
    }
}

impl RoleResolver for SuffixRoleResolver {
    fn resolve(&self, raw_credential: &str) -> Result<Identity, CredentialError> {
        let invalid = |digits| CredentialError::InvalidCredential {
            digits,
            expected: self.min_digits,
        };

        let id = IdentityId::normalize(raw_credential).map_err(|_| invalid(0))?;
        if id.len() < self.min_digits {
            return Err(invalid(id.len()));
        }

        let role = Self::role_for(id.last_digit());
        debug!(identity_id = %id, role = %role, "Credential resolved");
        Ok(Identity::with_default_name(id, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_master_credential() {
        let identity = SuffixRoleResolver::default().resolve("000.000.000-00").unwrap();
        assert_eq!(identity.id().as_str(), "00000000000");
        assert_eq!(identity.role(), Role::Master);
        assert_eq!(identity.display_name(), "Administrador");
    }

    #[test]
    fn test_suffix_mapping() {
        let resolver = SuffixRoleResolver::default();
        let cases = [
            ("123.456.789-01", Role::StaffTax),
            ("123.456.789-02", Role::StaffService),
            ("123.456.789-03", Role::StaffHr),
            ("123.456.789-04", Role::Citizen),
            ("123.456.789-09", Role::Citizen),
        ];
        for (credential, expected) in cases {
            assert_eq!(resolver.resolve(credential).unwrap().role(), expected);
        }
    }

    #[test]
    fn test_staff_display_name() {
        let identity = SuffixRoleResolver::default().resolve("12345678902").unwrap();
        assert_eq!(identity.display_name(), "Servidor ATENDIMENTO");
    }

    #[test]
    fn test_too_short() {
        let err = SuffixRoleResolver::default().resolve("123.456").unwrap_err();
        assert_eq!(
            err,
            CredentialError::InvalidCredential {
                digits: 6,
                expected: MIN_CREDENTIAL_DIGITS
            }
        );
    }

    #[test]
    fn test_minimum_length_boundary() {
        let resolver = SuffixRoleResolver::default();

        let err = resolver.resolve("123.456.789-0").unwrap_err();
        assert_eq!(
            err,
            CredentialError::InvalidCredential {
                digits: 10,
                expected: 11
            }
        );

        let identity = resolver.resolve("123.456.789-04").unwrap();
        assert_eq!(identity.id().len(), 11);
        assert_eq!(identity.role(), Role::Citizen);
    }

    #[test]
    fn test_no_digits() {
        assert!(SuffixRoleResolver::default().resolve("abc").is_err());
    }

    #[test]
    fn test_extra_formatting_is_ignored() {
        let identity = SuffixRoleResolver::default().resolve(" 1234567890-3 ").unwrap();
        assert_eq!(identity.id().as_str(), "12345678903");
        assert_eq!(identity.role(), Role::StaffHr);
    }
}
