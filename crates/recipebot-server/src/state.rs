use std::sync::Arc;

use minijinja::{Environment, context};
use recipebot_application::ChatUseCase;
use recipebot_core::RecipeBotError;
use recipebot_core::error::Result;

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatUseCase>,
    pub index_html: Arc<str>,
}

impl AppState {
    /// Wraps the chat use case and pre-renders the chat page.
    pub fn new(chat: ChatUseCase) -> Result<Self> {
        let index_html = render_index(chat.model())?;
        Ok(Self {
            chat: Arc::new(chat),
            index_html: index_html.into(),
        })
    }
}

fn render_index(model: &str) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)
        .map_err(|e| RecipeBotError::internal(format!("Invalid index template: {e}")))?;
    env.get_template("index.html")
        .and_then(|template| template.render(context! { model => model }))
        .map_err(|e| RecipeBotError::internal(format!("Failed to render index page: {e}")))
}
