use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use crate::signature::Signature;
use crate::value::{values_from_json, FieldValues};

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

pub fn load_signature(path: &Path) -> anyhow::Result<Signature> {
    let value = read_json(path)?;
    serde_json::from_value(value)
        .with_context(|| format!("invalid signature in {}", path.display()))
}

pub fn load_values(path: &Path) -> anyhow::Result<FieldValues> {
    let value = read_json(path)?;
    Ok(values_from_json(value)?)
}

/// demo 文件为 JSON 数组，每个元素是一个字段对象
pub fn load_demos(path: &Path) -> anyhow::Result<Vec<FieldValues>> {
    match read_json(path)? {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                values_from_json(item).with_context(|| format!("invalid demo #{}", idx + 1))
            })
            .collect(),
        _ => anyhow::bail!("demos in {} must be a JSON array", path.display()),
    }
}
