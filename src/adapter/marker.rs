use indexmap::IndexMap;
use tracing::instrument;

use super::Adapter;
use crate::codec::FieldCodec;
use crate::config::AdapterConfig;
use crate::constants::markers;
use crate::error::Result;
use crate::instructions::InstructionBuilder;
use crate::message::{ContentPart, Message};
use crate::signature::Signature;
use crate::turn::{ChatTurnBuilder, ImageFieldPolicy};
use crate::value::{FieldValue, FieldValues};

/// 基于标记行的聊天适配器
///
/// 消息顺序：1 条 system，每个 demo 一对 user / assistant，最后 1 条 user，
/// 共 `2 * demos.len() + 2` 条。
#[derive(Default)]
pub struct MarkerChatAdapter {
    turns: ChatTurnBuilder,
}

impl MarkerChatAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &AdapterConfig) -> Self {
        Self {
            turns: ChatTurnBuilder::from_config(config),
        }
    }

    pub fn with_turn_builder(turns: ChatTurnBuilder) -> Self {
        Self { turns }
    }

    /// 替换图像字段判断策略
    pub fn with_image_policy<P: ImageFieldPolicy + 'static>(mut self, policy: P) -> Self {
        self.turns = self.turns.with_policy(policy);
        self
    }

    fn assistant_fields(signature: &Signature) -> Vec<String> {
        let mut names = signature.output_names();
        names.push(markers::COMPLETED_FIELD.to_string());
        names
    }
}

impl Adapter for MarkerChatAdapter {
    #[instrument(skip_all, fields(demos = demos.len()))]
    fn format(
        &self,
        signature: &Signature,
        demos: &[FieldValues],
        inputs: &FieldValues,
    ) -> Result<Vec<Message>> {
        let input_names = signature.input_names();
        let assistant_names = Self::assistant_fields(signature);

        let mut messages = Vec::with_capacity(2 * demos.len() + 2);
        messages.push(Message::system(vec![ContentPart::text(
            InstructionBuilder::prepare(signature),
        )]));

        for demo in demos {
            let mut completed = demo.clone();
            completed.insert(
                markers::COMPLETED_FIELD.to_string(),
                FieldValue::Text(String::new()),
            );

            messages.push(Message::user(self.turns.build(&input_names, demo)?));
            messages.push(Message::assistant(
                self.turns.build(&assistant_names, &completed)?,
            ));
        }

        messages.push(Message::user(self.turns.build(&input_names, inputs)?));

        tracing::debug!(messages = messages.len(), "对话组装完成");
        Ok(messages)
    }

    #[instrument(skip_all, fields(len = completion.len()))]
    fn parse(&self, signature: &Signature, completion: &str) -> Result<IndexMap<String, String>> {
        FieldCodec::parse(completion, &signature.output_names())
    }
}
