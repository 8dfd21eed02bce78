//! Append-only conversation history.

use crate::llm::{ChatMessage, Role};

/// The ordered message log for one logical exchange.
///
/// Owned by a single loop run; it only ever grows, and nothing already
/// appended is mutated. Callers that want to persist or resume a session
/// take the messages out at the end and seed a new conversation later;
/// there is no shared accumulator to alias between runs.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from previously recorded turns.
    pub fn seeded(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Append an assistant turn exactly as it arrived. A turn that requests
    /// tools must be appended before its results; the wire protocol rejects
    /// results whose requesting message is missing.
    pub fn push_assistant(&mut self, message: ChatMessage) {
        debug_assert_eq!(message.role, Role::Assistant);
        self.messages.push(message);
    }

    /// Append one turn's batch of tool results, already in request order.
    pub fn push_tool_results(&mut self, results: Vec<ChatMessage>) {
        debug_assert!(results.iter().all(|m| m.role == Role::Tool));
        self.messages.extend(results);
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_in_append_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("first");
        conversation.push_user("second");
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.messages()[0].content.as_deref(), Some("first"));
        assert_eq!(conversation.messages()[1].content.as_deref(), Some("second"));
    }

    #[test]
    fn seeding_preserves_prior_turns() {
        let seed = vec![ChatMessage::user("earlier question")];
        let mut conversation = Conversation::seeded(seed);
        conversation.push_user("follow-up");
        assert_eq!(conversation.len(), 2);
        assert_eq!(
            conversation.messages()[0].content.as_deref(),
            Some("earlier question")
        );
    }
}
