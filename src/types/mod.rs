//! Type definitions.
//!
//! `chat` holds the Groq chat-completion wire types; `summarize` holds the
//! bodies exchanged with callers of the summarize endpoint.

pub mod chat;
pub mod summarize;
