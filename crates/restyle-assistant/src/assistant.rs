//! Chat turns against one render session.

use serde::Serialize;
use tracing::{info, warn};

use restyle_mutation::{apply, canned_instructions, ApplicationReport};
use restyle_protocols::AssistantError;
use restyle_render::RenderSession;

use crate::conversation::{ChatMessage, Conversation, MessageRole};
use crate::prompt::{context_prompt, system_prompt};
use crate::reply::{interpret_reply, ModelReply};

pub const WELCOME_MESSAGE: &str = "Hi! Select an element or describe what you want to change.";

const LOCAL_NO_MATCH: &str =
    "I couldn't match that request to a change. Try one of the example prompts.";

/// Styling hint for a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Plain,
    Success,
    Error,
}

/// One entry in the user-visible transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub role: MessageRole,
    pub content: String,
    pub kind: NoticeKind,
}

impl Notice {
    fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            kind: NoticeKind::Plain,
        }
    }

    fn assistant(content: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            kind,
        }
    }
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Instructions were applied.
    Applied {
        report: ApplicationReport,
        notice: String,
    },
    /// The reply had no instructions and is shown verbatim.
    Text(String),
    /// The model call itself failed.
    Error(String),
}

impl TurnOutcome {
    pub fn notice(&self) -> &str {
        match self {
            TurnOutcome::Applied { notice, .. } => notice,
            TurnOutcome::Text(text) => text,
            TurnOutcome::Error(message) => message,
        }
    }
}

/// Shortcut buttons of the chat panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    SelectElement,
    DarkMode,
    HideNav,
    LargerText,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        QuickAction::SelectElement,
        QuickAction::DarkMode,
        QuickAction::HideNav,
        QuickAction::LargerText,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::SelectElement => "Select element",
            QuickAction::DarkMode => "Dark mode",
            QuickAction::HideNav => "Hide nav",
            QuickAction::LargerText => "Larger text",
        }
    }

    /// Prompt placed in the input box; `None` for selection.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            QuickAction::SelectElement => None,
            QuickAction::DarkMode => Some("Apply dark mode to this page"),
            QuickAction::HideNav => Some("Hide the navigation bar"),
            QuickAction::LargerText => Some("Make all text larger"),
        }
    }
}

/// Conversation plus transcript for one page, with at most one turn in
/// flight.
#[derive(Debug)]
pub struct Assistant {
    conversation: Conversation,
    transcript: Vec<Notice>,
    pending: Option<String>,
}

impl Assistant {
    pub fn new(session: &RenderSession) -> Self {
        Self {
            conversation: Conversation::new(system_prompt(session)),
            transcript: vec![Notice::assistant(WELCOME_MESSAGE, NoticeKind::Plain)],
            pending: None,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn transcript(&self) -> &[Notice] {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Rebuild the system prompt after the session loaded another page.
    pub fn refresh(&mut self, session: &RenderSession) {
        self.conversation.set_system_prompt(system_prompt(session));
    }

    /// Start a turn and return the messages for the model call.
    pub fn begin_turn(
        &mut self,
        prompt: &str,
        session: &RenderSession,
    ) -> Result<Vec<ChatMessage>, AssistantError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }
        if self.pending.is_some() {
            return Err(AssistantError::Busy);
        }

        let contextual = context_prompt(session, prompt);
        self.transcript.push(Notice::user(prompt));
        self.conversation.push(ChatMessage::user(&contextual));
        self.pending = Some(prompt.to_string());
        Ok(self.conversation.request(&contextual))
    }

    /// Finish the pending turn with the model's reply text.
    pub fn complete_turn(
        &mut self,
        reply: &str,
        session: &mut RenderSession,
    ) -> Result<TurnOutcome, AssistantError> {
        self.pending.take().ok_or(AssistantError::NotPending)?;

        let outcome = match interpret_reply(reply) {
            ModelReply::Instructions { set, raw_json } => {
                let report = apply(session, &set);
                self.conversation.push(ChatMessage::assistant(raw_json));
                let notice = format!("✓ {}", report.user_message());
                info!(
                    applied = report.applied(),
                    partial = report.partial(),
                    failed = report.failed(),
                    "Applied model instructions"
                );
                self.transcript
                    .push(Notice::assistant(&notice, NoticeKind::Success));
                TurnOutcome::Applied { report, notice }
            }
            ModelReply::Text(text) => {
                self.transcript
                    .push(Notice::assistant(&text, NoticeKind::Plain));
                TurnOutcome::Text(text)
            }
        };
        Ok(outcome)
    }

    /// Finish the pending turn after the model call failed.
    pub fn fail_turn(&mut self, detail: &str) -> Result<TurnOutcome, AssistantError> {
        self.pending.take().ok_or(AssistantError::NotPending)?;
        warn!(error = detail, "Model call failed");

        let message = format!("Error: {}", detail);
        self.transcript
            .push(Notice::assistant(&message, NoticeKind::Error));
        Ok(TurnOutcome::Error(message))
    }

    /// Finish the pending turn with the local keyword rules instead of a
    /// model.
    pub fn complete_locally(
        &mut self,
        session: &mut RenderSession,
    ) -> Result<TurnOutcome, AssistantError> {
        let prompt = self.pending.take().ok_or(AssistantError::NotPending)?;

        let outcome = match canned_instructions(&prompt, session) {
            Some(set) => {
                let report = apply(session, &set);
                let notice = format!("✓ {}", report.user_message());
                self.transcript
                    .push(Notice::assistant(&notice, NoticeKind::Success));
                TurnOutcome::Applied { report, notice }
            }
            None => {
                self.transcript
                    .push(Notice::assistant(LOCAL_NO_MATCH, NoticeKind::Plain));
                TurnOutcome::Text(LOCAL_NO_MATCH.to_string())
            }
        };
        Ok(outcome)
    }

    /// Run a quick action: enter selection mode or return the prompt to
    /// send.
    pub fn quick_action(
        &mut self,
        action: QuickAction,
        session: &mut RenderSession,
    ) -> Option<&'static str> {
        match action.prompt() {
            Some(prompt) => Some(prompt),
            None => {
                let notice = session.start_selecting();
                self.transcript
                    .push(Notice::assistant(notice, NoticeKind::Plain));
                None
            }
        }
    }

    /// Record a selection notice produced by the session.
    pub fn note_selection(&mut self, notice: &str) {
        self.transcript.push(Notice::assistant(
            format!(
                "✓ {}\n\nNow describe what you want to do with it in natural language!",
                notice
            ),
            NoticeKind::Success,
        ));
    }
}

#[cfg(test)]
#[path = "assistant_tests.rs"]
mod tests;
