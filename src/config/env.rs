use crate::error::{FieldMarkError, Result};
use std::env;
use std::str::FromStr;

/// 环境变量配置管理
pub struct EnvConfig;

impl EnvConfig {
    /// 获取可选的环境变量，空字符串视为未设置
    pub fn get_env_optional(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.trim().is_empty())
    }

    /// 获取并解析可选的环境变量
    ///
    /// 未设置时返回 `Ok(None)`，无法解析时返回配置错误
    pub fn get_env_parsed<T: FromStr>(key: &str) -> Result<Option<T>> {
        match Self::get_env_optional(key) {
            Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
                FieldMarkError::Config(format!(
                    "environment variable `{}` has an invalid value `{}`",
                    key, raw
                ))
            }),
            None => Ok(None),
        }
    }
}
