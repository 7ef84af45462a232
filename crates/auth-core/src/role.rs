//! 角色

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role token: {0}")]
pub struct UnknownRole(pub String);

/// 封闭的角色枚举，运行时不可扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Master,
    /// 默认角色，匿名访客在可见性判断时等同于该角色
    #[serde(alias = "CIDADAO")]
    Citizen,
    #[serde(alias = "SERVIDOR_TRIBUTOS")]
    StaffTax,
    #[serde(alias = "SERVIDOR_ATENDIMENTO")]
    StaffService,
    #[serde(alias = "SERVIDOR_RH")]
    StaffHr,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Master,
        Role::Citizen,
        Role::StaffTax,
        Role::StaffService,
        Role::StaffHr,
    ];

    /// 规范令牌
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Master => "MASTER",
            Role::Citizen => "CITIZEN",
            Role::StaffTax => "STAFF_TAX",
            Role::StaffService => "STAFF_SERVICE",
            Role::StaffHr => "STAFF_HR",
        }
    }

    /// 职员类别名 (仅 STAFF_* 角色)，取自门户原有的类别令牌
    pub fn staff_category(&self) -> Option<&'static str> {
        match self {
            Role::StaffTax => Some("TRIBUTOS"),
            Role::StaffService => Some("ATENDIMENTO"),
            Role::StaffHr => Some("RH"),
            Role::Master | Role::Citizen => None,
        }
    }

    /// 角色对应的固定显示名
    pub fn display_name(&self) -> String {
        match self.staff_category() {
            Some(category) => format!("Servidor {}", category),
            None if *self == Role::Master => "Administrador".to_string(),
            None => "Cidadão".to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "MASTER" => Ok(Role::Master),
            "CITIZEN" | "CIDADAO" => Ok(Role::Citizen),
            "STAFF_TAX" | "SERVIDOR_TRIBUTOS" => Ok(Role::StaffTax),
            "STAFF_SERVICE" | "SERVIDOR_ATENDIMENTO" => Ok(Role::StaffService),
            "STAFF_HR" | "SERVIDOR_RH" => Ok(Role::StaffHr),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
