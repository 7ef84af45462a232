//! sig-config - 配置加载库

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// 遥测配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 是否启用 Prometheus 指标
    #[serde(default)]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            metrics_enabled: false,
        }
    }
}

/// 会话持久化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 会话槽位所在目录
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
    /// 固定的会话键
    #[serde(default = "default_session_key")]
    pub key: String,
}

fn default_session_path() -> PathBuf {
    PathBuf::from("data/session")
}

fn default_session_key() -> String {
    "sig_user".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
            key: default_session_key(),
        }
    }
}

/// 门户配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// 启动时导入的配置文档 (JSON)，缺省时使用内置模块目录
    #[serde(default)]
    pub seed_document: Option<PathBuf>,
    /// 凭证归一化后的最少位数
    #[serde(default = "default_min_credential_digits")]
    pub min_credential_digits: usize,
}

fn default_min_credential_digits() -> usize {
    11
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            seed_document: None,
            min_credential_digits: default_min_credential_digits(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub portal: PortalConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "sig-portal".to_string(),
            app_env: "development".to_string(),
            telemetry: TelemetryConfig::default(),
            session: SessionConfig::default(),
            portal: PortalConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 合并顺序: 内置默认值 < `default.toml` < `<APP_ENV>.toml` < `SIG_*` 环境变量
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        Self::figment(config_dir, &env)
            .merge(Env::prefixed("SIG_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// 仅从文件加载 (不读取环境变量)
    pub fn load_files(config_dir: &str, env: &str) -> Result<Self, ConfigError> {
        Self::figment(config_dir, env)
            .extract()
            .map_err(ConfigError::from)
    }

    fn figment(config_dir: &str, env: &str) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

#[cfg(test)]
mod tests;
