//! "Previous steps" recall over the conversation history.
//!
//! A query that mentions "previous steps" is answered locally: the first
//! non-stop-word token of the query becomes the keyword, and every stored
//! message containing it is echoed back in order.

use recipebot_core::config::RecallOptions;
use recipebot_core::session::ConversationMessage;

/// Phrase that switches a query into the recall branch.
pub const RECALL_TRIGGER: &str = "previous steps";

/// Tokens skipped when choosing the recall keyword.
pub const STOP_WORDS: [&str; 6] = ["previous", "steps", "the", "about", "is", "what"];

pub const NO_HISTORY_MESSAGE: &str = "There are no previous steps yet.";

/// Returns true if the lowercased query asks for previous steps.
pub fn is_recall_query(normalized_query: &str) -> bool {
    normalized_query.contains(RECALL_TRIGGER)
}

/// Picks the first whitespace-separated token that is not a stop word.
///
/// Returns an empty string when every token is a stop word. Punctuation is
/// kept unless `options.trim_punctuation` is set.
pub fn extract_keyword(normalized_query: &str, options: RecallOptions) -> String {
    normalized_query
        // Unicode White_Space only; \x1c-\x1f information separators stay inside a token
        .split_whitespace()
        .map(|token| {
            if options.trim_punctuation {
                token.trim_matches(|c: char| c.is_ascii_punctuation())
            } else {
                token
            }
        })
        .filter(|token| !token.is_empty())
        .find(|token| !STOP_WORDS.contains(token))
        .unwrap_or_default()
        .to_string()
}

/// Contents of every message (any role) whose lowercased text contains `keyword`.
///
/// An empty keyword matches nothing.
pub fn matching_contents<'a>(history: &'a [ConversationMessage], keyword: &str) -> Vec<&'a str> {
    if keyword.is_empty() {
        return Vec::new();
    }

    history
        .iter()
        .filter(|message| message.content.to_lowercase().contains(keyword))
        .map(|message| message.content.as_str())
        .collect()
}

/// Builds the recall answer for a lowercased query.
pub fn recall(
    history: &[ConversationMessage],
    normalized_query: &str,
    options: RecallOptions,
) -> String {
    if history.is_empty() {
        return NO_HISTORY_MESSAGE.to_string();
    }

    let keyword = extract_keyword(normalized_query, options);
    let steps = matching_contents(history, &keyword);

    if steps.is_empty() {
        return format!("No steps related to '{keyword}' have been discussed so far.");
    }

    format!(
        "Here are your previous steps related to '{keyword}':\n\n{}",
        steps.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pasta_history() -> Vec<ConversationMessage> {
        vec![
            ConversationMessage::user("I want pasta recipe"),
            ConversationMessage::assistant("Boil water, add pasta..."),
        ]
    }

    #[test]
    fn test_is_recall_query() {
        assert!(is_recall_query("what are my previous steps?"));
        assert!(!is_recall_query("what are my previous recipes?"));
        assert!(!is_recall_query("previous  steps"));
    }

    #[test]
    fn test_extract_keyword_skips_stop_words() {
        let options = RecallOptions::default();
        assert_eq!(extract_keyword("previous steps sushi", options), "sushi");
        assert_eq!(extract_keyword("what is the previous steps about pasta", options), "pasta");
        assert_eq!(extract_keyword("what are my previous steps about pasta?", options), "are");
    }

    #[test]
    fn test_extract_keyword_keeps_punctuation_by_default() {
        assert_eq!(
            extract_keyword("previous steps about pasta?", RecallOptions::default()),
            "pasta?"
        );
    }

    #[test]
    fn test_extract_keyword_trims_punctuation_when_enabled() {
        let options = RecallOptions {
            trim_punctuation: true,
        };
        assert_eq!(extract_keyword("previous steps about pasta?", options), "pasta");
        assert_eq!(extract_keyword("previous steps ? ! pasta", options), "pasta");
        assert_eq!(extract_keyword("\"previous steps\"", options), "");
    }

    #[test]
    fn test_extract_keyword_does_not_split_on_information_separators() {
        let options = RecallOptions::default();
        assert_eq!(extract_keyword("previous steps\x1fpasta", options), "steps\x1fpasta");
        assert_eq!(extract_keyword("previous steps\u{3000}pasta", options), "pasta");
    }

    #[test]
    fn test_extract_keyword_all_stop_words() {
        assert_eq!(
            extract_keyword("what is the previous steps", RecallOptions::default()),
            ""
        );
    }

    #[test]
    fn test_recall_on_empty_history() {
        for query in ["what are my previous steps?", "previous steps pasta", "previous steps"] {
            assert_eq!(
                recall(&[], query, RecallOptions::default()),
                "There are no previous steps yet."
            );
        }
    }

    #[test]
    fn test_recall_returns_matches_in_order() {
        let history = pasta_history();
        assert_eq!(
            recall(&history, "previous steps pasta", RecallOptions::default()),
            "Here are your previous steps related to 'pasta':\n\nI want pasta recipe\nBoil water, add pasta..."
        );
    }

    #[test]
    fn test_recall_is_case_insensitive_on_content() {
        let history = vec![
            ConversationMessage::user("Hello there"),
            ConversationMessage::assistant("PASTA Carbonara uses eggs"),
            ConversationMessage::user("And sushi?"),
        ];
        assert_eq!(
            recall(&history, "previous steps pasta", RecallOptions::default()),
            "Here are your previous steps related to 'pasta':\n\nPASTA Carbonara uses eggs"
        );
    }

    #[test]
    fn test_recall_with_trailing_punctuation_misses() {
        let history = pasta_history();
        assert_eq!(
            recall(&history, "previous steps about pasta?", RecallOptions::default()),
            "No steps related to 'pasta?' have been discussed so far."
        );
        assert_eq!(
            recall(
                &history,
                "previous steps about pasta?",
                RecallOptions {
                    trim_punctuation: true
                }
            ),
            "Here are your previous steps related to 'pasta':\n\nI want pasta recipe\nBoil water, add pasta..."
        );
    }

    #[test]
    fn test_recall_no_matches() {
        let history = pasta_history();
        assert_eq!(
            recall(&history, "previous steps sushi", RecallOptions::default()),
            "No steps related to 'sushi' have been discussed so far."
        );
    }

    #[test]
    fn test_recall_without_keyword() {
        let history = pasta_history();
        assert_eq!(
            recall(&history, "what is the previous steps", RecallOptions::default()),
            "No steps related to '' have been discussed so far."
        );
    }

    #[test]
    fn test_matching_contents_is_exact_subset() {
        let history = vec![
            ConversationMessage::user("tomato soup"),
            ConversationMessage::assistant("Chop the Tomato"),
            ConversationMessage::user("bread"),
            ConversationMessage::assistant("tomatoes and bread"),
        ];

        let matched = matching_contents(&history, "tomato");
        let expected: Vec<&str> = history
            .iter()
            .map(|m| m.content.as_str())
            .filter(|c| c.to_lowercase().contains("tomato"))
            .collect();

        assert_eq!(matched, expected);
        assert_eq!(matched, vec!["tomato soup", "Chop the Tomato", "tomatoes and bread"]);
        assert!(matching_contents(&history, "").is_empty());
    }
}
