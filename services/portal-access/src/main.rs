//! Portal Access - 门户访问控制服务入口

use anyhow::Context;
use portal_access::{PortalAccess, PortalConfigDocument, seed};
use sig_config::AppConfig;
use sig_telemetry::{init_metrics, init_tracing, init_tracing_json};
use tracing::{debug, info};

fn load_document(config: &AppConfig) -> anyhow::Result<PortalConfigDocument> {
    match &config.portal.seed_document {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading seed document {}", path.display()))?;
            Ok(PortalConfigDocument::from_json(&raw)?)
        }
        None => Ok(seed::stock_document()),
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir).context("loading configuration")?;

    if config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }
    let metrics = if config.telemetry.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );

    let portal = PortalAccess::from_config(&config, &load_document(&config)?)?;
    info!(modules = portal.catalog().len(), "Module registry ready");

    let identity = portal.sessions().restore();
    let basis = portal.evaluator().basis(identity.as_ref());
    for group in portal.visible_groups().groups() {
        let titles: Vec<&str> = group.modules.iter().map(|m| m.title.as_str()).collect();
        info!(group = %group.name, basis = %basis, modules = ?titles, "Navigation group");
    }

    if let Some(handle) = metrics {
        debug!(snapshot = %handle.render(), "Metrics");
    }

    Ok(())
}
