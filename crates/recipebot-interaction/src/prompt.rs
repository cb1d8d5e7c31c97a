//! Fixed recipe-assistant prompt template.

use minijinja::{Environment, context};
use recipebot_core::completion::CompletionError;
use recipebot_core::session::ConversationMessage;

const TEMPLATE_NAME: &str = "recipe_prompt";

const RECIPE_PROMPT_TEMPLATE: &str = r#"You are an intelligent recipe assistant. Respond to user queries as follows:
- Provide detailed, helpful, and user-friendly responses to human food recipe-related questions.
- Include cooking procedures, ingredients, alternatives, cuisine suggestions, and cultural insights when relevant.
- If a user asks about animal food recipes, politely inform them that you only assist with human food recipes.
- If a user asks about their previous steps (e.g., "What are my previous steps?"), summarize only the steps related to the specific recipe or topic the user mentions (e.g., "pasta"), omitting greetings and unrelated messages.
- If a user asks an unrelated question (e.g., weather or sports), politely inform them that you can only assist with recipes.

Conversation so far:
{{ history }}

User input: {{ input }}

Your response:
"#;

/// Renders the recipe prompt from the conversation so far and the new input.
pub struct RecipePrompt {
    env: Environment<'static>,
}

impl RecipePrompt {
    pub fn new() -> Result<Self, CompletionError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, RECIPE_PROMPT_TEMPLATE)
            .map_err(|e| CompletionError::Prompt(e.to_string()))?;
        Ok(Self { env })
    }

    /// Renders the full prompt. `input` is inserted exactly as the user typed it.
    pub fn render(
        &self,
        history: &[ConversationMessage],
        input: &str,
    ) -> Result<String, CompletionError> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| CompletionError::Prompt(e.to_string()))?;

        template
            .render(context! {
                history => format_history(history),
                input => input,
            })
            .map_err(|e| CompletionError::Prompt(e.to_string()))
    }
}

/// Formats messages one per line as `Human: ...` / `AI: ...`.
pub fn format_history(history: &[ConversationMessage]) -> String {
    history
        .iter()
        .map(|message| format!("{}: {}", message.role.prompt_label(), message.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_history_labels_roles() {
        let history = vec![
            ConversationMessage::user("I want pasta recipe"),
            ConversationMessage::assistant("Boil water, add pasta..."),
        ];
        assert_eq!(
            format_history(&history),
            "Human: I want pasta recipe\nAI: Boil water, add pasta..."
        );
    }

    #[test]
    fn test_format_empty_history() {
        assert_eq!(format_history(&[]), "");
    }

    #[test]
    fn test_render_inserts_history_and_raw_input() {
        let prompt = RecipePrompt::new().unwrap();
        let history = vec![ConversationMessage::user("Hello")];

        let rendered = prompt.render(&history, "How do I make RAMEN?").unwrap();

        assert!(rendered.starts_with("You are an intelligent recipe assistant."));
        assert!(rendered.contains("Conversation so far:\nHuman: Hello\n"));
        assert!(rendered.contains("User input: How do I make RAMEN?"));
        assert!(rendered.trim_end().ends_with("Your response:"));
    }

    #[test]
    fn test_render_does_not_escape_markup() {
        let prompt = RecipePrompt::new().unwrap();
        let rendered = prompt.render(&[], "<b>salt & pepper</b>").unwrap();
        assert!(rendered.contains("User input: <b>salt & pepper</b>"));
    }
}
