//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 设置了 `RUST_LOG` 时以它为准，否则使用传入的级别。
/// 重复调用是安全的（测试里会多次调用）。
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
