//! Application layer for RecipeBot.
//!
//! This crate routes chat queries either to the "previous steps" recall
//! search over the session history or to the completion client.

pub mod chat_usecase;
pub mod recall;

pub use chat_usecase::ChatUseCase;
