// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lidia WhatsApp chatbot gateway.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Lidia workspace. Storage, completion, and
//! outbound-send backends implement traits defined here.

pub mod error;
pub mod history;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LidiaError;
pub use types::{Document, NormalizedMessage, Speaker, Turn};

pub use traits::{CompletionProvider, HistoryStore, OutboundSender};
