//! # Restyle Assistant
//!
//! Turns free-text requests into instruction sets and instruction sets into
//! page edits.
//!
//! The language-model call itself happens outside this crate:
//! [`Assistant::begin_turn`] returns the messages to send, and
//! [`Assistant::complete_turn`] or [`Assistant::fail_turn`] consume the
//! result.

mod assistant;
mod conversation;
mod prompt;
mod reply;

pub use assistant::{Assistant, Notice, NoticeKind, QuickAction, TurnOutcome, WELCOME_MESSAGE};
pub use conversation::{ChatMessage, Conversation, MessageRole};
pub use prompt::{context_prompt, page_context, system_prompt};
pub use reply::{extract_json_object, interpret_reply, ModelReply};
