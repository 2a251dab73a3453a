// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp channel concerns for the Lidia chatbot gateway.
//!
//! Converts the provider's heterogeneous webhook payload shapes into the
//! canonical [`NormalizedMessage`] record, validates phone-number
//! identifiers, and provides the outbound send stub.
//!
//! [`NormalizedMessage`]: lidia_core::NormalizedMessage

pub mod normalizer;
pub mod sender;
pub mod validate;

pub use normalizer::extract_webhook_data;
pub use sender::LogSender;
pub use validate::is_valid_numero;
