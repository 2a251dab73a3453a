// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic history cleanup.
//!
//! Pruning is by absolute age: every turn older than the configured
//! threshold is deleted, regardless of whether its number has newer
//! activity. The threshold applies to rows, not to conversations.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use lidia_core::{HistoryStore, LidiaError};
use lidia_storage::format_timestamp;

/// Deletes turns older than `max_age` on every run.
pub struct CleanupRunner {
    store: Arc<dyn HistoryStore>,
    max_age: chrono::Duration,
}

impl CleanupRunner {
    pub fn new(store: Arc<dyn HistoryStore>, max_age_hours: u64) -> Self {
        Self {
            store,
            max_age: chrono::Duration::hours(max_age_hours as i64),
        }
    }

    /// Run one cleanup pass. Returns the number of turns removed.
    pub async fn run_once(&self) -> Result<u64, LidiaError> {
        let cutoff = format_timestamp(Utc::now() - self.max_age);
        let removed = self.store.prune_older_than(&cutoff).await?;
        if removed > 0 {
            info!(removed, cutoff = %cutoff, "history cleanup complete");
        } else {
            debug!(cutoff = %cutoff, "history cleanup found nothing to remove");
        }
        Ok(removed)
    }

    /// Tick on `interval` until `cancel` fires. The first immediate tick is
    /// skipped so startup is not followed by an instant prune.
    pub async fn run(&self, interval: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_once().await {
                        warn!(error = %e, "history cleanup failed (non-fatal)");
                    }
                }
                _ = cancel.cancelled() => {
                    info!("cleanup task shutting down");
                    break;
                }
            }
        }
    }
}
