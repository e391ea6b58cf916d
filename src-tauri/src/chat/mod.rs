//! Multi-model chat: the chat service client and the direct provider fan-out.

pub mod fanout;
pub mod providers;
pub mod service;
pub mod types;

pub use fanout::fan_out;
pub use providers::{HttpModelClient, ModelBackend, ModelClient};
pub use service::{parse_chat_body, ChatServiceClient};
pub use types::*;
