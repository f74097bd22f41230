//! tracing 初始化

use tracing_subscriber::EnvFilter;

/// 安装全局日志订阅者，默认 `info` 级别，可用 `RUST_LOG` 覆盖
///
/// `verbose` 为真时默认级别提升为 `debug`
pub fn init_with_verbose(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
