// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groq chat-completions provider for the Lidia chatbot gateway.
//!
//! Provides [`GroqClient`], an HTTP client for the OpenAI-compatible
//! chat-completions endpoint, and the prompt assembly that turns stored
//! conversation turns plus the knowledge document into a request body.

pub mod client;
pub mod prompt;
pub mod types;

pub use client::{CompletionError, GroqClient};
