// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits implemented by storage, completion, and outbound backends.
//!
//! Handlers receive these as `Arc<dyn …>` handles at construction time; no
//! component reaches for an ambient global.

pub mod completion;
pub mod outbound;
pub mod storage;

pub use completion::CompletionProvider;
pub use outbound::OutboundSender;
pub use storage::HistoryStore;
