//! # Batch Processor Main Orchestrator
//!
//! Orchestratore principale che delega responsabilità ai moduli specializzati.
//!
//! ## Flusso di esecuzione:
//! 1. **Output dir**: Crea la directory di destinazione (e i parent mancanti)
//! 2. **File discovery**: Trova i file `.ovpn` direttamente nella directory sorgente
//! 3. **Collisioni**: Segnala input diversi con lo stesso nome di output
//! 4. **Parallel processing**: Distribuisce i file su un pool di worker limitato da semaforo
//! 5. **Statistics**: Raccoglie risultati e stampa il report finale
//!
//! ## Error handling:
//! - Errori su singoli file non bloccano il batch
//! - Nessuna garanzia transazionale: i file già scritti restano in output

use crate::{
    config::Config,
    file_manager::FileManager,
    json_output::{JsonConfig, JsonMessage},
    processor::{path_resolver::PathResolver, progress_tracker::ProgressTracker, task_processor::TaskProcessor},
    progress::BatchStats,
    resolver::HostResolver,
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Orchestratore principale
pub struct BatchProcessor {
    config: Config,
    resolver: Arc<dyn HostResolver>,
}

impl BatchProcessor {
    /// Crea nuova istanza del processor
    pub fn new(config: Config, resolver: Arc<dyn HostResolver>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, resolver })
    }

    /// Esegue il batch da `source_dir` verso `output_dir`
    pub async fn run(&self, source_dir: &Path, output_dir: &Path) -> Result<BatchStats> {
        let start_time = Instant::now();

        if self.config.dry_run {
            info!("🧪 Dry run mode: No files will be written");
        } else {
            PathResolver::ensure_output_dir(output_dir).await?;
        }

        let files = FileManager::find_config_files(source_dir, &self.config.extension)?;

        self.emit_start_message(source_dir, output_dir, &files);
        self.log_configuration(output_dir, &files);

        if files.is_empty() {
            return Ok(self.handle_empty_directory(start_time));
        }

        PathResolver::report_collisions(&files, output_dir, &self.config.naming_rule());

        let progress_tracker = ProgressTracker::new(files.len(), self.config.json_output);
        let task = TaskProcessor::new(&self.config, self.resolver.clone(), output_dir.to_path_buf());

        self.process_files_concurrently(files, task, progress_tracker.clone()).await?;

        let stats = progress_tracker.get_stats().await;
        progress_tracker.finish(&stats.format_summary());
        self.print_final_stats(&stats, output_dir, start_time.elapsed().as_secs_f64());

        Ok(stats)
    }

    /// Invia messaggio di inizio
    fn emit_start_message(&self, source_dir: &Path, output_dir: &Path, files: &[PathBuf]) {
        if self.config.json_output {
            JsonMessage::start(
                source_dir.to_path_buf(),
                output_dir.to_path_buf(),
                files.len(),
                JsonConfig::from(&self.config),
            )
            .emit();
        } else {
            info!("Starting normalization in: {}", source_dir.display());
        }
    }

    /// Logga configurazione (solo se non JSON mode)
    fn log_configuration(&self, output_dir: &Path, files: &[PathBuf]) {
        if self.config.json_output {
            return;
        }

        info!("📁 Output directory: {}", output_dir.display());
        info!("🔑 Auth directive: auth-user-pass {}", self.config.auth_file_path);
        info!("🌐 Redirect directive: {}", self.config.redirect_directive);
        debug!("Workers: {}", self.config.workers);
        info!("Found {} .{} files to process", files.len(), self.config.extension);
    }

    /// Gestisce directory vuota
    fn handle_empty_directory(&self, start_time: Instant) -> BatchStats {
        let stats = BatchStats::new();
        if self.config.json_output {
            JsonMessage::complete(stats.clone(), start_time.elapsed().as_secs_f64()).emit();
        } else {
            info!("No .{} files found to process", self.config.extension);
        }
        stats
    }

    /// Processa i file con concorrenza limitata dal numero di worker
    async fn process_files_concurrently(
        &self,
        files: Vec<PathBuf>,
        task: TaskProcessor,
        progress_tracker: ProgressTracker,
    ) -> Result<()> {
        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let mut tasks = Vec::with_capacity(files.len());

        for (index, file_path) in files.into_iter().enumerate() {
            let permit = semaphore.clone().acquire_owned().await?;
            let task = task.clone();
            let progress_clone = progress_tracker.clone();
            let json_output = self.config.json_output;

            tasks.push(tokio::spawn(async move {
                let _permit = permit;

                if json_output {
                    JsonMessage::file_start(file_path.clone(), index, progress_clone.total_files).emit();
                }

                let path = file_path.clone();
                let result = match tokio::task::spawn_blocking(move || task.process_single_file(&path)).await {
                    Ok(result) => result,
                    Err(e) => Err(anyhow::anyhow!("Worker panicked: {}", e)),
                };

                progress_clone.handle_file_completion(&file_path, &result).await;
            }));
        }

        for outcome in futures::future::join_all(tasks).await {
            if let Err(e) = outcome {
                progress_tracker.handle_task_failure(&e.to_string()).await;
            }
        }

        Ok(())
    }

    /// Stampa statistiche finali
    fn print_final_stats(&self, stats: &BatchStats, output_dir: &Path, duration: f64) {
        if self.config.json_output {
            JsonMessage::complete(stats.clone(), duration).emit();
            return;
        }

        info!("=== Normalization Complete ===");
        info!("Files processed: {}", stats.files_processed);
        info!("Files written: {}", stats.files_written);
        info!("Errors: {}", stats.errors);
        info!("Remotes resolved: {}", stats.remotes_resolved);
        info!("Remotes left unresolved: {}", stats.remotes_unresolved);
        info!("Auth directives added: {}", stats.auth_injected);
        info!("Redirects inserted: {}", stats.redirects_inserted);
        info!("Duration: {:.2}s", duration);
        info!("🎉 All files processed. Resolved configs saved in: {}", output_dir.display());
    }
}
