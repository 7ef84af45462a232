use sig_auth_core::{CredentialError, Role};
use sig_common::IdentityIdError;
use sig_errors::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Invalid credential: {0}")]
    InvalidCredential(#[from] CredentialError),
    #[error("Module already exists: {0}")]
    DuplicateModuleId(String),
    #[error("Module not found: {0}")]
    ModuleNotFound(String),
    #[error("Role {role} may not mutate the portal configuration")]
    UnauthorizedMutation { role: Role },
    #[error("Malformed session record: {0}")]
    MalformedSession(String),
    #[error("Invalid identity id: {0}")]
    InvalidIdentityId(#[from] IdentityIdError),
    #[error("Invalid configuration document: {0}")]
    InvalidDocument(String),
    #[error("Unsupported configuration document version {found} (max {supported})")]
    UnsupportedDocumentVersion { found: u32, supported: u32 },
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AccessError {
    /// 指标标签
    pub fn kind(&self) -> &'static str {
        match self {
            AccessError::InvalidCredential(_) => "invalid_credential",
            AccessError::DuplicateModuleId(_) => "duplicate_module_id",
            AccessError::ModuleNotFound(_) => "module_not_found",
            AccessError::UnauthorizedMutation { .. } => "unauthorized_mutation",
            AccessError::MalformedSession(_) => "malformed_session",
            AccessError::InvalidIdentityId(_) => "invalid_identity_id",
            AccessError::InvalidDocument(_) => "invalid_document",
            AccessError::UnsupportedDocumentVersion { .. } => "unsupported_document_version",
            AccessError::Storage(_) => "storage",
        }
    }
}

impl From<AppError> for AccessError {
    fn from(error: AppError) -> Self {
        AccessError::Storage(error.to_string())
    }
}

impl From<AccessError> for AppError {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::InvalidCredential(e) => AppError::Unauthenticated(e.to_string()),
            AccessError::DuplicateModuleId(_) => AppError::Conflict(error.to_string()),
            AccessError::ModuleNotFound(_) => AppError::NotFound(error.to_string()),
            AccessError::UnauthorizedMutation { .. } => AppError::Forbidden(error.to_string()),
            AccessError::MalformedSession(_) => AppError::Internal(error.to_string()),
            AccessError::InvalidIdentityId(_)
            | AccessError::InvalidDocument(_)
            | AccessError::UnsupportedDocumentVersion { .. } => {
                AppError::Validation(error.to_string())
            }
            AccessError::Storage(msg) => AppError::Storage(msg),
        }
    }
}

pub type AccessResult<T> = Result<T, AccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_error() {
        let err: AppError = AccessError::DuplicateModuleId("iptu".to_string()).into();
        assert_eq!(err.status_code(), 409);

        let err: AppError = AccessError::UnauthorizedMutation { role: Role::StaffHr }.into();
        assert_eq!(err.status_code(), 403);
        assert!(err.to_string().contains("STAFF_HR"));

        let err: AppError = AccessError::ModuleNotFound("rh".to_string()).into();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_credential_error_maps_to_unauthenticated() {
        let err: AccessError = CredentialError::InvalidCredential {
            digits: 3,
            expected: 11,
        }
        .into();
        assert_eq!(err.kind(), "invalid_credential");
        assert_eq!(AppError::from(err).status_code(), 401);
    }
}
