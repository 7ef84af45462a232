//! 基础设施层

pub mod access_metrics;
pub mod session;

pub use access_metrics::AccessMetrics;
pub use session::{FileSessionSlot, InMemorySessionSlot};
