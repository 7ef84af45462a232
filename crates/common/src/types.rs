//! 通用类型定义

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::digits_only;

/// 身份 ID 解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityIdError {
    #[error("Identity id is empty after normalization")]
    Empty,
    #[error("Identity id must contain only digits: {0}")]
    NotNormalized(String),
}

/// 身份 ID
///
/// 凭证去除所有非数字字符后的结果，是覆盖规则与会话持久化的关联键。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{_0}")]
#[serde(try_from = "String", into = "String")]
pub struct IdentityId(String);

impl IdentityId {
    /// 从原始凭证归一化 (去除非数字字符)
    pub fn normalize(raw: &str) -> Result<Self, IdentityIdError> {
        let digits = digits_only(raw);
        if digits.is_empty() {
            return Err(IdentityIdError::Empty);
        }
        Ok(Self(digits))
    }

    /// 解析已归一化的 ID，拒绝任何非数字字符
    pub fn parse(normalized: &str) -> Result<Self, IdentityIdError> {
        if normalized.is_empty() {
            return Err(IdentityIdError::Empty);
        }
        if !normalized.chars().all(|c| c.is_ascii_digit()) {
            return Err(IdentityIdError::NotNormalized(normalized.to_string()));
        }
        Ok(Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 数字位数
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 最后一位数字
    pub fn last_digit(&self) -> Option<u8> {
        self.0.bytes().last().map(|b| b - b'0')
    }
}

impl TryFrom<String> for IdentityId {
    type Error = IdentityIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<IdentityId> for String {
    fn from(id: IdentityId) -> Self {
        id.0
    }
}
