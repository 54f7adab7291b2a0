/// 工具模块 - 提供通用工具函数
pub mod logging;

pub use logging::LoggingConfig;
