//! The chat transcript: an append-only sequence of exchanged messages.
//!
//! A question in flight is represented by a `Pending` placeholder message;
//! resolution and failure both replace that placeholder in place, and only
//! the first completion wins. Cleared when a new document is loaded, never
//! persisted.

use shared_types::AnswerResponse;

pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    /// A user-entered question.
    Text(String),
    /// Placeholder for an answer still in flight.
    Pending,
    /// The service's answer, optional parts included.
    Answer(AnswerResponse),
    /// A visible failure that replaced the placeholder.
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub body: MessageBody,
}

impl ChatMessage {
    pub fn is_pending(&self) -> bool {
        matches!(self.body, MessageBody::Pending)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: MessageId,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn get(&self, id: MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append the user's question.
    pub fn push_user(&mut self, text: &str) -> MessageId {
        self.push(ChatRole::User, MessageBody::Text(text.to_string()))
    }

    /// Append the in-flight placeholder for the answer.
    pub fn begin_pending(&mut self) -> MessageId {
        self.push(ChatRole::Assistant, MessageBody::Pending)
    }

    /// Replace the placeholder with the answer. Returns false when `id` is
    /// unknown or already completed; the first completion stands.
    pub fn resolve(&mut self, id: MessageId, mut answer: AnswerResponse) -> bool {
        answer.confidence = answer.confidence.map(|c| c.clamp(0.0, 1.0));
        self.complete(id, MessageBody::Answer(answer))
    }

    /// Replace the placeholder with a visible error. Same exactly-once rule
    /// as [`Transcript::resolve`].
    pub fn fail(&mut self, id: MessageId, message: String) -> bool {
        self.complete(id, MessageBody::Error(message))
    }

    /// Drop every message (new document loaded).
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn push(&mut self, role: ChatRole, body: MessageBody) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage { id, role, body });
        id
    }

    fn complete(&mut self, id: MessageId, body: MessageBody) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(message) if message.is_pending() => {
                message.body = body;
                true
            }
            _ => false,
        }
    }
}
