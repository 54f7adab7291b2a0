pub mod marker;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::Result;
use crate::message::Message;
use crate::signature::Signature;
use crate::value::FieldValues;

pub use marker::MarkerChatAdapter;

/// 提示词线格式适配器
///
/// `format` 把签名、示例和实时输入转换为聊天消息；`parse` 把模型补全
/// 还原为输出字段。不同的线格式各自实现该 trait。
pub trait Adapter: Send + Sync {
    fn format(
        &self,
        signature: &Signature,
        demos: &[FieldValues],
        inputs: &FieldValues,
    ) -> Result<Vec<Message>>;

    fn parse(&self, signature: &Signature, completion: &str) -> Result<IndexMap<String, String>>;
}

pub type DynAdapter = Arc<dyn Adapter>;
