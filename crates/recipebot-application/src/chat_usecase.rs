//! Chat use case: classifies each query and produces the reply text.

use std::sync::Arc;

use recipebot_core::completion::{CompletionClient, CompletionError};
use recipebot_core::config::RecallOptions;
use recipebot_core::error::Result;
use recipebot_core::session::{ChatSession, ConversationMessage};
use recipebot_interaction::RecipePrompt;

use crate::recall;

/// Routes queries for one [`ChatSession`].
///
/// Recall queries ("previous steps") are answered from the history and never
/// stored. Every other query goes to the completion client; on success the
/// user query and the reply are appended to the history as one pair, on
/// failure nothing is stored and the error is returned as chat text.
pub struct ChatUseCase {
    session: ChatSession,
    client: Arc<dyn CompletionClient>,
    prompt: RecipePrompt,
    recall_options: RecallOptions,
}

impl ChatUseCase {
    pub fn new(session: ChatSession, client: Arc<dyn CompletionClient>) -> Result<Self> {
        Ok(Self {
            session,
            client,
            prompt: RecipePrompt::new()?,
            recall_options: RecallOptions::default(),
        })
    }

    pub fn with_recall_options(mut self, recall_options: RecallOptions) -> Self {
        self.recall_options = recall_options;
        self
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Handles one chat turn and returns the text shown to the user.
    pub async fn handle(&self, query: &str) -> String {
        let normalized = query.to_lowercase();

        if recall::is_recall_query(&normalized) {
            let history = self.session.history().all_messages().await;
            tracing::info!(
                "[ChatUseCase] Recall query on session {} ({} messages)",
                self.session.id(),
                history.len()
            );
            return recall::recall(&history, &normalized, self.recall_options);
        }

        match self.complete_turn(query).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(
                    "[ChatUseCase] Completion failed on session {}: {}",
                    self.session.id(),
                    err
                );
                format!("Error: {err}")
            }
        }
    }

    async fn complete_turn(&self, query: &str) -> std::result::Result<String, CompletionError> {
        let history = self.session.history().all_messages().await;
        let prompt = self.prompt.render(&history, query)?;

        tracing::info!(
            "[ChatUseCase] Forwarding query to {} ({} messages of context)",
            self.client.model(),
            history.len()
        );

        let reply = self.client.complete(&prompt).await?;

        self.session
            .history()
            .append_all(vec![
                ConversationMessage::user(query),
                ConversationMessage::assistant(reply.clone()),
            ])
            .await;

        Ok(reply)
    }
}
