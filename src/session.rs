use tracing::info;

use crate::chat::{ChatTurn, CompletionService};
use crate::error::Error;
use crate::matcher::{DEFAULT_FIELDS, FIELD_KEYWORDS};

/// An append-only conversation with the billing assistant. The history is
/// scoped to one interactive session and only ever grows.
pub struct ChatSession<S> {
    service: S,
    instructions: Option<String>,
    history: Vec<ChatTurn>,
}

impl<S: CompletionService> ChatSession<S> {
    pub fn new(service: S, instructions: Option<String>) -> Self {
        Self {
            service,
            instructions,
            history: Vec::new(),
        }
    }

    /// Full transcript in submission order.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Append a user turn, ask the completion service for a reply with the
    /// whole running context, append the reply and return it.
    ///
    /// When the service fails the user turn is kept, so the history then
    /// ends in a user turn with no assistant reply.
    pub async fn submit(&mut self, user_text: &str) -> Result<String, Error> {
        self.history.push(ChatTurn::user(user_text));
        let reply = self
            .service
            .complete(self.instructions.as_deref(), &self.history)
            .await?;
        self.history.push(ChatTurn::assistant(reply.as_str()));
        info!(turns = self.history.len(), "Conversation turn complete");
        Ok(reply)
    }

    pub(crate) fn clear(&mut self) {
        self.history.clear();
    }
}

/// Derive the field request for an extraction run from the chat history:
/// every `FIELD_KEYWORDS` member mentioned in the penultimate turn (the
/// most recent user turn at trigger time), in vocabulary order. With fewer
/// than two turns, or when nothing matches, fall back to `DEFAULT_FIELDS`.
pub fn derive_fields(history: &[ChatTurn]) -> Vec<&'static str> {
    if history.len() >= 2 {
        let request = history[history.len() - 2].content.to_lowercase();
        let fields: Vec<&'static str> = FIELD_KEYWORDS
            .iter()
            .copied()
            .filter(|keyword| request.contains(keyword))
            .collect();
        if !fields.is_empty() {
            return fields;
        }
    }
    DEFAULT_FIELDS.to_vec()
}
