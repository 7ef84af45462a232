//! 访问控制指标

use std::time::Instant;

use metrics::{counter, histogram};

/// 访问控制监控工具
pub struct AccessMetrics;

impl AccessMetrics {
    /// 记录一次可见性计算
    pub fn record_evaluation(start: Instant, basis: &str, visible: usize) {
        counter!("portal_visibility_evaluations_total", "basis" => basis.to_string()).increment(1);
        histogram!("portal_visibility_duration_us")
            .record(start.elapsed().as_micros() as f64);
        histogram!("portal_visible_modules", "basis" => basis.to_string()).record(visible as f64);
    }

    /// 记录成功的管理端修改
    pub fn record_mutation(operation: &str) {
        counter!("portal_admin_mutations_total", "operation" => operation.to_string()).increment(1);
    }

    /// 记录被拒绝的管理端调用
    pub fn record_rejection(operation: &str, error: &str) {
        counter!(
            "portal_admin_rejections_total",
            "operation" => operation.to_string(),
            "error" => error.to_string()
        )
        .increment(1);
    }

    /// 记录自愈的损坏会话
    pub fn record_session_healed() {
        counter!("portal_sessions_healed_total").increment(1);
    }
}
