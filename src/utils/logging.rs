use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::env as env_keys;

/// 日志配置
pub struct LoggingConfig;

impl LoggingConfig {
    /// 初始化日志系统
    ///
    /// 支持通过环境变量配置：
    /// - RUST_LOG: 设置日志级别（error, warn, info, debug, trace）
    /// - FIELDMARK_DEBUG: 启用详细调试输出
    ///
    /// 重复调用时保留第一次安装的订阅者。
    ///
    /// ```no_run
    /// use fieldmark::utils::LoggingConfig;
    ///
    /// LoggingConfig::init();
    /// ```
    pub fn init() {
        let is_debug = Self::is_debug();
        let env_filter = Self::default_filter(is_debug);

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(is_debug)
            .with_file(is_debug)
            .with_line_number(is_debug)
            .with_thread_ids(is_debug);

        let installed = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .is_ok();

        if installed && is_debug {
            tracing::debug!("调试模式已启用");
        }
    }

    /// 初始化日志系统（带自定义过滤器）
    pub fn init_with_filter(filter: &str) {
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::new(filter))
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init();
    }

    /// 检查是否启用调试模式
    pub fn is_debug() -> bool {
        env::var(env_keys::DEBUG).is_ok()
    }

    fn default_filter(is_debug: bool) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if is_debug {
                EnvFilter::new("fieldmark=debug,info")
            } else {
                EnvFilter::new("fieldmark=info,warn")
            }
        })
    }
}
