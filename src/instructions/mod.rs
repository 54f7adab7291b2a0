use indexmap::IndexMap;

use crate::codec::FieldCodec;
use crate::constants::{markers, prompt as prompt_consts};
use crate::signature::{FieldSpec, Signature};

/// 系统提示词构建服务
pub struct InstructionBuilder;

impl InstructionBuilder {
    /// 字段目录：每行 ``n. `name` (type): description``
    ///
    /// 描述缺省或等于 `${name}` 时省略 `: description` 后缀
    pub fn enumerate(fields: &IndexMap<String, FieldSpec>) -> String {
        fields
            .iter()
            .enumerate()
            .map(|(idx, (name, spec))| {
                let mut line = format!("{}. `{}` ({})", idx + 1, name, spec.type_name);
                if let Some(desc) = spec.description_for(name) {
                    line.push_str(": ");
                    line.push_str(desc);
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// 构建完整的系统提示词
    pub fn prepare(signature: &Signature) -> String {
        let placeholders = |fields: &IndexMap<String, FieldSpec>| {
            FieldCodec::render(fields.keys().map(|name| (name, format!("{{{}}}", name))))
        };

        let parts = [
            format!(
                "{}\n{}",
                prompt_consts::INPUT_FIELDS_HEADER,
                Self::enumerate(&signature.input_fields)
            ),
            format!(
                "{}\n{}",
                prompt_consts::OUTPUT_FIELDS_HEADER,
                Self::enumerate(&signature.output_fields)
            ),
            prompt_consts::STRUCTURE_INTRO.to_string(),
            placeholders(&signature.input_fields),
            placeholders(&signature.output_fields),
            FieldCodec::render([(markers::COMPLETED_FIELD, "")]),
            Self::response_rule(signature),
            format!(
                "{}{}",
                prompt_consts::OBJECTIVE_HEADER,
                Self::indent_objective(&signature.instructions)
            ),
        ];

        parts.join("\n\n").trim().to_string()
    }

    fn response_rule(signature: &Signature) -> String {
        let outputs = signature
            .output_fields
            .keys()
            .map(|name| format!("`{}`", name))
            .collect::<Vec<_>>()
            .join(prompt_consts::RESPONSE_RULE_JOINER);

        format!(
            "{}{}{}",
            prompt_consts::RESPONSE_RULE_PREFIX,
            outputs,
            prompt_consts::RESPONSE_RULE_SUFFIX
        )
    }

    /// 每行目标说明另起一行并缩进 8 个空格
    fn indent_objective(objective: &str) -> String {
        objective
            .lines()
            .map(|line| format!("\n{}{}", prompt_consts::OBJECTIVE_INDENT, line))
            .collect()
    }
}
