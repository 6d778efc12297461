use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::models::chat::ChatMessage;

/// One conversation's append-only message history behind a lock. The
/// orchestrator holds the lock for a whole turn, so concurrent requests
/// against the same session serialize instead of interleaving writes.
pub struct ChatSession {
    id: String,
    messages: Mutex<Vec<ChatMessage>>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().await
    }

    /// A copy of the history, for inspection outside a turn.
    pub async fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.lock().await.clone()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
