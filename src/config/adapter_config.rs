use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::env::EnvConfig;
use crate::constants::{env as env_keys, image as image_consts};
use crate::error::Result;

/// 适配器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// 字段名包含该子串时视为图像字段
    #[serde(default = "default_image_keyword")]
    pub image_keyword: String,
    /// 写入 data URI 的媒体类型
    #[serde(default = "default_image_mime")]
    pub image_mime: String,
    /// URL 图像下载超时（秒），不设置则不超时
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,
}

fn default_image_keyword() -> String {
    image_consts::DEFAULT_IMAGE_KEYWORD.to_string()
}

fn default_image_mime() -> String {
    image_consts::DEFAULT_IMAGE_MIME.to_string()
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            image_keyword: default_image_keyword(),
            image_mime: default_image_mime(),
            fetch_timeout_secs: None,
        }
    }
}

impl AdapterConfig {
    /// 在默认配置上叠加环境变量
    ///
    /// - FIELDMARK_IMAGE_KEYWORD
    /// - FIELDMARK_IMAGE_MIME
    /// - FIELDMARK_FETCH_TIMEOUT_SECS
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(keyword) = EnvConfig::get_env_optional(env_keys::IMAGE_KEYWORD) {
            config.image_keyword = keyword;
        }
        if let Some(mime) = EnvConfig::get_env_optional(env_keys::IMAGE_MIME) {
            config.image_mime = mime;
        }
        if let Some(secs) = EnvConfig::get_env_parsed::<u64>(env_keys::FETCH_TIMEOUT_SECS)? {
            config.fetch_timeout_secs = Some(secs);
        }

        Ok(config)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::default();
        assert_eq!(config.image_keyword, "image");
        assert_eq!(config.image_mime, "image/jpeg");
        assert!(config.fetch_timeout().is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AdapterConfig =
            serde_json::from_str(r#"{"image_mime": "image/png", "fetch_timeout_secs": 5}"#).unwrap();
        assert_eq!(config.image_keyword, "image");
        assert_eq!(config.image_mime, "image/png");
        assert_eq!(config.fetch_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_env_overlay() {
        env::set_var(env_keys::IMAGE_MIME, "image/webp");
        env::set_var(env_keys::FETCH_TIMEOUT_SECS, "12");
        let config = AdapterConfig::from_env().unwrap();
        assert_eq!(config.image_mime, "image/webp");
        assert_eq!(config.fetch_timeout_secs, Some(12));

        env::set_var(env_keys::FETCH_TIMEOUT_SECS, "soon");
        assert!(AdapterConfig::from_env().is_err());

        env::remove_var(env_keys::IMAGE_MIME);
        env::remove_var(env_keys::FETCH_TIMEOUT_SECS);
    }
}
