//! Append-only conversation history.

use tokio::sync::RwLock;

use super::message::{ConversationMessage, MessageRole};

/// Ordered transcript of a conversation, oldest message first.
pub type ConversationHistory = Vec<ConversationMessage>;

/// Process-lifetime record of a conversation.
///
/// The history only grows: there is no removal, truncation or reordering
/// operation. Filtering is the caller's job.
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Adds a message to the end of the history.
    async fn append(&self, role: MessageRole, content: String);

    /// Adds several messages in order.
    ///
    /// Implementations should make the batch atomic with respect to other
    /// writers so one turn's user/assistant pair is never split.
    async fn append_all(&self, messages: Vec<ConversationMessage>) {
        for message in messages {
            self.append(message.role, message.content).await;
        }
    }

    /// Returns a snapshot of every message in insertion order.
    async fn all_messages(&self) -> ConversationHistory;

    async fn len(&self) -> usize {
        self.all_messages().await.len()
    }

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// [`HistoryStore`] backed by a vector behind a tokio `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    messages: RwLock<ConversationHistory>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, role: MessageRole, content: String) {
        self.messages
            .write()
            .await
            .push(ConversationMessage::new(role, content));
    }

    async fn append_all(&self, messages: Vec<ConversationMessage>) {
        self.messages.write().await.extend(messages);
    }

    async fn all_messages(&self) -> ConversationHistory {
        self.messages.read().await.clone()
    }

    async fn len(&self) -> usize {
        self.messages.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = InMemoryHistoryStore::new();
        assert!(store.is_empty().await);
        assert!(store.all_messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_insertion_order() {
        let store = InMemoryHistoryStore::new();
        let contents = ["first", "second", "third", "fourth"];

        for (i, content) in contents.iter().enumerate() {
            let role = if i % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            store.append(role, content.to_string()).await;
        }

        let messages = store.all_messages().await;
        assert_eq!(messages.len(), contents.len());
        for (message, expected) in messages.iter().zip(contents.iter()) {
            assert_eq!(message.content, *expected);
        }
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_all_messages_is_idempotent() {
        let store = InMemoryHistoryStore::new();
        store.append(MessageRole::User, "I want pasta recipe".into()).await;
        store
            .append(MessageRole::Assistant, "Boil water, add pasta...".into())
            .await;

        let first = store.all_messages().await;
        let second = store.all_messages().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_snapshot_is_not_affected_by_later_appends() {
        let store = InMemoryHistoryStore::new();
        store.append(MessageRole::User, "one".into()).await;

        let snapshot = store.all_messages().await;
        store.append(MessageRole::Assistant, "two".into()).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_append_all_keeps_batch_order() {
        let store = InMemoryHistoryStore::new();
        store.append(MessageRole::User, "earlier".into()).await;
        store
            .append_all(vec![
                ConversationMessage::user("How do I make ramen?"),
                ConversationMessage::assistant("Here's how..."),
            ])
            .await;

        let messages = store.all_messages().await;
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["earlier", "How do I make ramen?", "Here's how..."]);
    }
}
