//! Chat transcript: the widget state and its transitions

use super::error::AskError;
use super::model::Message;
use contracts::agent::AskResponse;

/// Text of the placeholder shown while a reply is awaited.
pub const TYPING_PLACEHOLDER: &str = "Typing…";

/// Ordered messages of one chat widget plus whether a request is in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatTranscript {
    messages: Vec<Message>,
    sending: bool,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Accept a submission.
    ///
    /// Returns the trimmed question to send, or `None` when the input is
    /// blank or a request is already in flight. On acceptance the user
    /// message and the placeholder are appended and the transcript is
    /// marked as sending.
    pub fn begin(&mut self, raw_input: &str) -> Option<String> {
        let question = raw_input.trim();
        if question.is_empty() {
            return None;
        }
        if self.sending {
            log::warn!("Ignoring submission while a request is pending");
            return None;
        }

        self.messages.push(Message::user(question));
        self.messages.push(Message::placeholder(TYPING_PLACEHOLDER));
        self.sending = true;
        Some(question.to_string())
    }

    /// Settle the pending request with its outcome.
    ///
    /// The placeholder is removed and the reply appended in the same step.
    pub fn resolve(&mut self, outcome: Result<AskResponse, AskError>) {
        let text = match outcome {
            Ok(reply) => reply.reply_text().to_string(),
            Err(err) => {
                log::error!("Chat error: {}", err);
                err.user_message()
            }
        };

        self.messages.retain(|m| !m.pending);
        self.messages.push(Message::bot(text));
        self.sending = false;
    }
}
