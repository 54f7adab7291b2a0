pub mod policy;

use std::sync::Arc;

use indexmap::IndexSet;

use crate::codec::FieldCodec;
use crate::config::AdapterConfig;
use crate::error::{FieldMarkError, Result};
use crate::media::{ImageEncoder, ImageError};
use crate::message::ContentPart;
use crate::value::{FieldValue, FieldValues};

pub use policy::{ImageFieldPolicy, NameContainsKeyword};

/// 单条消息内容构建服务
///
/// 输出顺序固定为：所有图像部分（按字段顺序）在前，唯一的文本部分在最后。
pub struct ChatTurnBuilder {
    encoder: ImageEncoder,
    policy: Arc<dyn ImageFieldPolicy>,
    image_mime: String,
}

impl Default for ChatTurnBuilder {
    fn default() -> Self {
        Self::from_config(&AdapterConfig::default())
    }
}

impl ChatTurnBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AdapterConfig) -> Self {
        Self {
            encoder: ImageEncoder::new().with_timeout(config.fetch_timeout()),
            policy: Arc::new(NameContainsKeyword::new(config.image_keyword.clone())),
            image_mime: config.image_mime.clone(),
        }
    }

    /// 替换图像编码器
    pub fn with_encoder(mut self, encoder: ImageEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// 替换图像字段判断策略
    pub fn with_policy<P: ImageFieldPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn is_image_field(&self, name: &str) -> bool {
        self.policy.is_image_field(name)
    }

    /// 按字段顺序构建一条消息的内容
    ///
    /// `values` 必须包含 `field_names` 中的每个字段，否则返回
    /// [`FieldMarkError::MissingField`]。值为空的图像字段被跳过。
    /// 重复的字段名只按首次出现的位置渲染一次。
    pub fn build<S: AsRef<str>>(
        &self,
        field_names: &[S],
        values: &FieldValues,
    ) -> Result<Vec<ContentPart>> {
        let names: IndexSet<&str> = field_names.iter().map(AsRef::as_ref).collect();

        let mut resolved: Vec<(&str, &FieldValue)> = Vec::with_capacity(names.len());
        for name in names {
            match values.get(name) {
                Some(value) => resolved.push((name, value)),
                None => {
                    return Err(FieldMarkError::MissingField {
                        expected: field_names.iter().map(|n| n.as_ref().to_string()).collect(),
                        actual: values.keys().cloned().collect(),
                    })
                }
            }
        }

        let text = FieldCodec::render(
            resolved
                .iter()
                .filter(|(name, _)| !self.is_image_field(name))
                .map(|(name, value)| (*name, value.to_string())),
        );

        let mut parts = Vec::new();
        for (name, value) in resolved.iter().filter(|(name, _)| self.is_image_field(name)) {
            if value.is_empty() {
                tracing::debug!(field = %name, "图像字段为空，跳过");
                continue;
            }

            let encoded = self
                .encoder
                .encode(value)
                .and_then(|b64| {
                    if b64.is_empty() {
                        Err(ImageError::Encode("image source produced no data".to_string()))
                    } else {
                        Ok(b64)
                    }
                })
                .map_err(|source| FieldMarkError::ImageEncode {
                    field: name.to_string(),
                    source,
                })?;

            parts.push(ContentPart::image_url(ImageEncoder::data_uri(
                &self.image_mime,
                &encoded,
            )));
        }

        tracing::debug!(
            fields = field_names.len(),
            images = parts.len(),
            "消息内容构建完成"
        );
        parts.push(ContentPart::text(text));
        Ok(parts)
    }
}
