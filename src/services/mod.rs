//! Service implementations for the Groq API.

mod chat;

pub use chat::ChatService;
