//! Session domain module.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `ConversationMessage`)
//! - `history`: Append-only history store (`HistoryStore`, `InMemoryHistoryStore`)
//! - `model`: The conversation session handle (`ChatSession`)
//!
//! # Usage
//!
//! ```ignore
//! use recipebot_core::session::{ChatSession, ConversationMessage, MessageRole};
//! ```

mod history;
mod message;
mod model;

// Re-export public API
pub use history::{ConversationHistory, HistoryStore, InMemoryHistoryStore};
pub use message::{ConversationMessage, MessageRole};
pub use model::ChatSession;
