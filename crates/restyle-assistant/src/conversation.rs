//! Conversation history sent to the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// A pinned system message followed by the turn history.
///
/// History is append-only for the life of the conversation; only the system
/// message is ever replaced.
#[derive(Debug, Clone)]
pub struct Conversation {
    system: ChatMessage,
    history: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system: ChatMessage::system(system_prompt),
            history: Vec::new(),
        }
    }

    pub fn system(&self) -> &ChatMessage {
        &self.system
    }

    /// Replace the system prompt, e.g. after the page was reloaded.
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system = ChatMessage::system(prompt);
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    /// Messages for one model call: the system prompt and `prompt`.
    ///
    /// Earlier turns are kept for the record but not replayed.
    pub fn request(&self, prompt: &str) -> Vec<ChatMessage> {
        vec![self.system.clone(), ChatMessage::user(prompt)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_is_pinned() {
        let mut conversation = Conversation::new("rules");
        conversation.push(ChatMessage::user("a"));
        conversation.push(ChatMessage::assistant("b"));
        conversation.set_system_prompt("new rules");

        assert_eq!(conversation.system().content, "new rules");
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.history()[0].content, "a");
    }

    #[test]
    fn test_history_is_never_trimmed() {
        let mut conversation = Conversation::new("rules");
        for turn in 0..500 {
            conversation.push(ChatMessage::user(format!("turn {}", turn)));
        }

        assert_eq!(conversation.len(), 500);
        assert_eq!(conversation.history()[0].content, "turn 0");
        assert_eq!(conversation.history()[499].content, "turn 499");
    }

    #[test]
    fn test_request_sends_system_and_prompt() {
        let mut conversation = Conversation::new("rules");
        conversation.push(ChatMessage::user("earlier"));
        let request = conversation.request("now");

        assert_eq!(request.len(), 2);
        assert_eq!(request[0].role, MessageRole::System);
        assert_eq!(request[1].role, MessageRole::User);
        assert_eq!(request[1].content, "now");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
    }
}
