//! External service backends

pub mod chat;

pub use chat::{ChatBackend, GroqChat};
