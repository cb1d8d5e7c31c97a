//! External collaborators for RecipeBot: the OpenAI completion client,
//! the recipe prompt template and secret-file loading.

pub mod config;
pub mod openai_api_client;
pub mod prompt;

pub use openai_api_client::OpenAIApiClient;
pub use prompt::RecipePrompt;
