use crate::constants::image as image_consts;

/// 判断字段是否为图像字段的策略
///
/// 默认实现按字段名判断，可替换为基于类型的判断。
pub trait ImageFieldPolicy: Send + Sync {
    fn is_image_field(&self, name: &str) -> bool;
}

/// 字段名包含关键词即视为图像字段
///
/// 注意：`imageless_count` 这类名字同样会被判定为图像字段。
#[derive(Clone, Debug)]
pub struct NameContainsKeyword {
    keyword: String,
}

impl NameContainsKeyword {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }
}

impl Default for NameContainsKeyword {
    fn default() -> Self {
        Self::new(image_consts::DEFAULT_IMAGE_KEYWORD)
    }
}

impl ImageFieldPolicy for NameContainsKeyword {
    fn is_image_field(&self, name: &str) -> bool {
        name.contains(self.keyword.as_str())
    }
}

impl<F> ImageFieldPolicy for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_image_field(&self, name: &str) -> bool {
        self(name)
    }
}
