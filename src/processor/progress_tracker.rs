//! # Progress Tracking Module
//!
//! Tracker thread-safe condiviso dai worker: aggiorna statistiche,
//! progress bar e, in modalità JSON, emette gli eventi per file.

use crate::{
    json_output::JsonMessage,
    processor::task_processor::ProcessedFile,
    progress::{BatchStats, ProgressManager},
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Tracker progress unificato
#[derive(Clone)]
pub struct ProgressTracker {
    pub total_files: usize,
    json_output: bool,
    current_file: Arc<Mutex<usize>>,
    stats: Arc<Mutex<BatchStats>>,
    progress_manager: ProgressManager,
}

impl ProgressTracker {
    /// Crea un nuovo tracker
    pub fn new(total_files: usize, json_output: bool) -> Self {
        Self {
            total_files,
            json_output,
            current_file: Arc::new(Mutex::new(0)),
            stats: Arc::new(Mutex::new(BatchStats::new())),
            progress_manager: ProgressManager::new(total_files as u64, json_output),
        }
    }

    /// Finalizza progress bar
    pub fn finish(&self, summary: &str) {
        self.progress_manager.finish(summary);
    }

    /// Gestisce completamento file con eventi JSON automatici
    pub async fn handle_file_completion(&self, file_path: &Path, result: &anyhow::Result<ProcessedFile>) {
        let current = {
            let mut current = self.current_file.lock().await;
            *current += 1;
            *current
        };

        let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();

        let stats = {
            let mut stats = self.stats.lock().await;
            match result {
                Ok(processed) => stats.add_processed(&processed.report),
                Err(_) => stats.add_error(),
            }
            stats.clone()
        };

        match result {
            Ok(processed) => {
                if processed.written {
                    info!("✅ Processed {} → {}", processed.original_name, processed.new_name);
                } else {
                    info!("🧪 Dry run: {} → {}", processed.original_name, processed.new_name);
                }
                if self.json_output {
                    JsonMessage::file_complete(processed).emit();
                }
                self.progress_manager.update(&format!("[OK] {}", processed.new_name));
            }
            Err(e) => {
                error!("❌ Failed to process {}: {:#}", file_path.display(), e);
                if self.json_output {
                    JsonMessage::file_failed(file_path.to_path_buf(), format!("{:#}", e)).emit();
                }
                self.progress_manager.update(&format!("[ERROR] {}", file_name));
            }
        }

        if self.json_output {
            JsonMessage::progress(current, self.total_files, stats.files_written, stats.errors).emit();
        }
    }

    /// Registra un task terminato in modo anomalo (panic del worker)
    pub async fn handle_task_failure(&self, message: &str) {
        error!("❌ Worker task failed: {}", message);
        self.stats.lock().await.add_error();
        self.progress_manager.update("[ERROR] worker failure");
    }

    /// Ottieni statistiche per report finale
    pub async fn get_stats(&self) -> BatchStats {
        self.stats.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::RewriteReport;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_tracker_counts_outcomes() {
        let tracker = ProgressTracker::new(2, true);
        let ok = Ok(ProcessedFile {
            source: PathBuf::from("/in/Tokyo.ovpn"),
            output: PathBuf::from("/out/Tokyo.ovpn"),
            original_name: "Tokyo.ovpn".to_string(),
            new_name: "Tokyo.ovpn".to_string(),
            written: true,
            report: RewriteReport {
                remotes_unresolved: 1,
                ..Default::default()
            },
        });
        let failed: anyhow::Result<ProcessedFile> = Err(anyhow::anyhow!("disk full"));

        tracker.handle_file_completion(Path::new("/in/Tokyo.ovpn"), &ok).await;
        tracker.handle_file_completion(Path::new("/in/Bad.ovpn"), &failed).await;

        let stats = tracker.get_stats().await;
        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.files_written, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.remotes_unresolved, 1);
    }
}
