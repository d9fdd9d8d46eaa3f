//! Groq-backed text summarization service.
//!
//! A three-stage pipeline (prompt template → Groq chat completion → text
//! extraction) exposed over HTTP, plus a small client for calling a running
//! server.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use groq_summarizer::{GroqChatModel, GroqClient, ModelConfig, SummarizeChain, SummarizeInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GroqClient::builder()
//!         .api_key("gsk_your_api_key")
//!         .build()?;
//!
//!     let model = GroqChatModel::new(Arc::new(client), ModelConfig::default());
//!     let chain = SummarizeChain::summarize(Arc::new(model));
//!
//!     let summary = chain
//!         .invoke(&SummarizeInput::new("Rust is a systems programming language..."))
//!         .await?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```
//!
//! # Serving
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use groq_summarizer::{server, AppConfig, GroqChatModel, GroqClient, SummarizeChain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let client = groq_summarizer::GroqClientBuilder::from_config(config.groq.clone()).build()?;
//!     let chain = SummarizeChain::summarize(Arc::new(GroqChatModel::new(
//!         Arc::new(client),
//!         config.model.clone(),
//!     )));
//!
//!     let app = server::router(Arc::new(chain), &config.server);
//!     let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod chain;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod remote;
pub mod server;
pub mod services;
pub mod transport;
pub mod types;

pub use chain::{AiMessage, ChatModel, GroqChatModel, PromptTemplate, SummarizeChain};
pub use client::{GroqClient, GroqClientBuilder};
pub use config::{AppConfig, GroqConfig, ModelConfig, ServerConfig};
pub use errors::{SummarizerError, SummarizerResult};
pub use remote::RemoteSummarizer;
pub use types::chat::{ChatRequest, ChatResponse, Message, Role};
pub use types::summarize::{SummarizeInput, SummarizeOutput};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
