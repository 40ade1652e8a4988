//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche del batch.
//!
//! ## Componenti principali:
//! - `ProgressManager`: Gestisce la progress bar principale (`indicatif`)
//! - `BatchStats`: Traccia statistiche cumulative del run
//!
//! ## Statistiche tracciate:
//! - **files_processed**: Totale file elaborati (riusciti + falliti)
//! - **files_written**: File scritti nella directory di output (o che lo sarebbero in dry run)
//! - **errors**: File non elaborati per errori di lettura/scrittura
//! - **remotes_resolved** / **remotes_unresolved**: Esito delle risoluzioni DNS
//! - **auth_injected**: File senza `auth-user-pass` a cui è stata aggiunta la direttiva
//! - **redirects_inserted**: File in cui è stato inserito `redirect-gateway`
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:02] [========================================] 12/12 (100%) [OK] Paris.ovpn
//! ```

use crate::rewriter::RewriteReport;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Manages progress reporting for the batch
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager; hidden bars draw nothing (JSON mode)
    pub fn new(total_files: u64, hidden: bool) -> Self {
        if hidden {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(total_files);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Statistics tracker for a normalization run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub files_processed: usize,
    pub files_written: usize,
    pub errors: usize,
    pub remotes_resolved: usize,
    pub remotes_unresolved: usize,
    pub auth_injected: usize,
    pub redirects_inserted: usize,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_processed(&mut self, report: &RewriteReport) {
        self.files_processed += 1;
        self.files_written += 1;
        self.remotes_resolved += report.remotes_resolved;
        self.remotes_unresolved += report.remotes_unresolved;
        if report.auth_injected {
            self.auth_injected += 1;
        }
        if report.redirect_inserted {
            self.redirects_inserted += 1;
        }
    }

    pub fn add_error(&mut self) {
        self.files_processed += 1;
        self.errors += 1;
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Written: {} | Errors: {} | Remotes resolved: {} | Unresolved: {}",
            self.files_processed,
            self.files_written,
            self.errors,
            self.remotes_resolved,
            self.remotes_unresolved,
        )
    }
}
