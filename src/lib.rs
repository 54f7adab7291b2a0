pub mod adapter;
pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod media;
pub mod message;
pub mod signature;
pub mod turn;
pub mod utils;
pub mod value;

pub use adapter::{Adapter, DynAdapter, MarkerChatAdapter};
pub use codec::{FieldCodec, MARKER_PATTERN};
pub use config::{AdapterConfig, EnvConfig};
pub use error::{FieldMarkError, Result};
pub use instructions::InstructionBuilder;
pub use media::{ImageEncoder, ImageError};
pub use message::{ContentPart, ImageUrl, Message, Role};
pub use signature::{FieldSpec, Signature};
pub use turn::{ChatTurnBuilder, ImageFieldPolicy, NameContainsKeyword};
pub use utils::logging;
pub use value::{values_from_json, FieldValue, FieldValues};
