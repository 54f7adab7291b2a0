use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 单个字段的元数据
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// 类型的展示名，仅用于渲染
    #[serde(rename = "type", default = "FieldSpec::default_type_name")]
    pub type_name: String,
    /// 字段描述；等于 `${<字段名>}` 时视为未提供
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: None,
        }
    }

    /// 文本字段
    pub fn text() -> Self {
        Self::new(Self::default_type_name())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// “未提供描述”的占位值
    pub fn placeholder_for(name: &str) -> String {
        format!("${{{}}}", name)
    }

    /// 需要渲染的描述；缺省或等于占位值时返回 `None`
    pub fn description_for(&self, name: &str) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|desc| *desc != Self::placeholder_for(name))
    }

    fn default_type_name() -> String {
        "str".to_string()
    }
}

/// 签名：有序的输入 / 输出字段目录加上任务目标说明
///
/// 在一次 format / parse 调用期间只读。
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub input_fields: IndexMap<String, FieldSpec>,
    #[serde(default)]
    pub output_fields: IndexMap<String, FieldSpec>,
}

impl Signature {
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            ..Self::default()
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.input_fields.insert(name.into(), spec);
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.output_fields.insert(name.into(), spec);
        self
    }

    pub fn input_names(&self) -> Vec<String> {
        self.input_fields.keys().cloned().collect()
    }

    pub fn output_names(&self) -> Vec<String> {
        self.output_fields.keys().cloned().collect()
    }
}
