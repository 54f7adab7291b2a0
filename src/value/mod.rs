use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{FieldMarkError, Result};

/// 一个回合中字段名到字段值的有序映射（demo 与实时输入共用）
pub type FieldValues = IndexMap<String, FieldValue>;

/// 字段值
///
/// 图像字段的值可以是本地路径、URL 或（启用 `native-image` 时）内存中的图像对象。
#[derive(Clone, Debug)]
pub enum FieldValue {
    Text(String),
    Json(Value),
    #[cfg(feature = "native-image")]
    Image(image::DynamicImage),
}

impl FieldValue {
    /// 是否为“未提供”的值：空文本、null、false、0、空数组、空对象
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Json(value) => match value {
                Value::Null => true,
                Value::Bool(b) => !b,
                Value::Number(n) => n.as_f64() == Some(0.0),
                Value::String(s) => s.is_empty(),
                Value::Array(items) => items.is_empty(),
                Value::Object(map) => map.is_empty(),
            },
            #[cfg(feature = "native-image")]
            FieldValue::Image(_) => false,
        }
    }

    /// 值的类型名，用于错误信息
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "string",
            FieldValue::Json(value) => match value {
                Value::Null => "null",
                Value::Bool(_) => "boolean",
                Value::Number(_) => "number",
                Value::String(_) => "string",
                Value::Array(_) => "array",
                Value::Object(_) => "object",
            },
            #[cfg(feature = "native-image")]
            FieldValue::Image(_) => "image",
        }
    }

    /// 作为字符串引用（路径 / URL 的来源）
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Json(Value::String(s)) => f.write_str(s),
            FieldValue::Json(value) => write!(f, "{value}"),
            #[cfg(feature = "native-image")]
            FieldValue::Image(img) => write!(f, "<image {}x{}>", img.width(), img.height()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Text(s),
            other => FieldValue::Json(other),
        }
    }
}

#[cfg(feature = "native-image")]
impl From<image::DynamicImage> for FieldValue {
    fn from(value: image::DynamicImage) -> Self {
        FieldValue::Image(value)
    }
}

/// 从 JSON 对象构建有序字段值
pub fn values_from_json(value: Value) -> Result<FieldValues> {
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(name, value)| (name, FieldValue::from(value)))
            .collect()),
        other => Err(FieldMarkError::Config(format!(
            "field values must be a JSON object, got {}",
            FieldValue::Json(other).type_name()
        ))),
    }
}

/// 便捷宏：构建 [`FieldValues`]
///
/// ```
/// let demo = fieldmark::field_values! { "question" => "2+2?", "answer" => "4" };
/// assert_eq!(demo.len(), 2);
/// ```
#[macro_export]
macro_rules! field_values {
    ($($name:expr => $value:expr),* $(,)?) => {{
        let mut values = $crate::FieldValues::new();
        $(values.insert($name.to_string(), $crate::FieldValue::from($value));)*
        values
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty() {
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::Json(json!(null)).is_empty());
        assert!(FieldValue::Json(json!(false)).is_empty());
        assert!(FieldValue::Json(json!(0)).is_empty());
        assert!(FieldValue::Json(json!([])).is_empty());
        assert!(!FieldValue::from("photo.png").is_empty());
        assert!(!FieldValue::Json(json!(3)).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::from("plain").to_string(), "plain");
        assert_eq!(FieldValue::Json(json!("quoted")).to_string(), "quoted");
        assert_eq!(FieldValue::Json(json!([1, 2])).to_string(), "[1,2]");
    }

    #[test]
    fn test_values_from_json_keeps_order() {
        let values = values_from_json(json!({"zeta": "z", "alpha": 1})).unwrap();
        let keys: Vec<&str> = values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert!(matches!(values["zeta"], FieldValue::Text(_)));
        assert!(matches!(values["alpha"], FieldValue::Json(_)));
    }

    #[test]
    fn test_values_from_json_rejects_non_object() {
        assert!(values_from_json(json!(["a"])).is_err());
    }
}
