use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::markers;
use crate::error::{FieldMarkError, Result};

/// 标记行正则，进程内只编译一次
pub static MARKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(markers::MARKER_REGEX).expect("marker regex is valid"));

/// 字段块编解码
///
/// 字段块格式：每个字段一行标记 `[[[[ #### <name> #### ]]]]`，紧跟字段文本，
/// 字段之间以空行分隔。字段值中的标记行不会被转义。
pub struct FieldCodec;

impl FieldCodec {
    /// 生成单个字段的标记行
    pub fn marker(name: &str) -> String {
        format!("{}{}{}", markers::MARKER_PREFIX, name, markers::MARKER_SUFFIX)
    }

    /// 按迭代顺序把字段渲染为字段块，整体去除首尾空白
    pub fn render<I, K, V>(fields: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        fields
            .into_iter()
            .map(|(name, text)| format!("{}\n{}", Self::marker(name.as_ref()), text.as_ref()))
            .collect::<Vec<_>>()
            .join("\n\n")
            .trim()
            .to_string()
    }

    /// 从补全文本中解析字段块
    ///
    /// - 首个标记之前的内容被丢弃
    /// - 同名标记只保留第一次出现的段落
    /// - 不在 `expected_keys` 中的段落被丢弃
    ///
    /// 解析结果的字段集合必须与 `expected_keys` 完全一致，否则返回
    /// [`FieldMarkError::Parse`]。返回顺序为字段在文本中首次出现的顺序。
    pub fn parse<S: AsRef<str>>(text: &str, expected_keys: &[S]) -> Result<IndexMap<String, String>> {
        let mut sections: Vec<(Option<String>, Vec<&str>)> = vec![(None, Vec::new())];

        for line in split_lines(text) {
            if let Some(caps) = MARKER_PATTERN.captures(line.trim()) {
                sections.push((Some(caps[1].to_string()), Vec::new()));
            } else if let Some((_, buffer)) = sections.last_mut() {
                buffer.push(line);
            }
        }

        let expected: IndexSet<&str> = expected_keys.iter().map(AsRef::as_ref).collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut recovered = Vec::new();
        let mut fields = IndexMap::new();

        for (name, buffer) in sections {
            let Some(name) = name else {
                continue;
            };
            if !seen.insert(name.clone()) {
                tracing::warn!(field = %name, "重复的字段标记，保留首次出现的内容");
                continue;
            }
            recovered.push(name.clone());
            if !expected.contains(name.as_str()) {
                tracing::debug!(field = %name, "丢弃未声明的字段");
                continue;
            }
            fields.insert(name, buffer.join("\n").trim().to_string());
        }

        if fields.len() != expected.len() {
            return Err(FieldMarkError::Parse {
                expected: expected.iter().map(|k| k.to_string()).collect(),
                actual: recovered,
            });
        }

        tracing::debug!(fields = fields.len(), "字段块解析完成");
        Ok(fields)
    }
}

/// 按行切分，行边界与 `\n` / `\r\n` 之外的 Unicode 换行符一致
///
/// `\r\n` 视为一个边界；末尾的换行不会产生额外的空行。
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let is_break = matches!(
            ch,
            '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
        );
        if !is_break {
            continue;
        }

        lines.push(&text[start..idx]);
        let mut end = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next_idx, '\n')) = chars.peek() {
                chars.next();
                end = next_idx + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
