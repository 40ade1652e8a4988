//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso programmatico del tool.
//!
//! ## Responsabilità:
//! - Emette messaggi JSON (uno per riga) su stdout per gli eventi del batch
//! - Utilizza le strutture esistenti di `ProcessedFile` e `BatchStats`
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio del batch
//! - `file_start`: Inizio elaborazione di un file
//! - `file_complete`: Fine elaborazione di un file (con eventuale errore)
//! - `progress`: Progresso corrente
//! - `complete`: Fine del batch con statistiche finali
//! - `error`: Errore fatale

use crate::config::Config;
use crate::processor::ProcessedFile;
use crate::progress::BatchStats;
use crate::rewriter::RewriteReport;
use serde::Serialize;
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Inizio del batch
    #[serde(rename = "start")]
    Start {
        input_dir: PathBuf,
        output_dir: PathBuf,
        total_files: usize,
        config: JsonConfig,
    },

    /// Progresso corrente
    #[serde(rename = "progress")]
    Progress {
        current: usize,
        total: usize,
        percentage: f64,
        files_written: usize,
        errors: usize,
    },

    /// Inizio elaborazione di un file specifico
    #[serde(rename = "file_start")]
    FileStart {
        path: PathBuf,
        index: usize,
        total: usize,
    },

    /// Fine elaborazione di un file specifico
    #[serde(rename = "file_complete")]
    FileComplete {
        path: PathBuf,
        output_path: Option<PathBuf>,
        original_name: String,
        new_name: Option<String>,
        written: bool,
        #[serde(flatten)]
        report: RewriteReport,
        error: Option<String>,
    },

    /// Batch completato
    #[serde(rename = "complete")]
    Complete {
        #[serde(flatten)]
        stats: BatchStats,
        duration_seconds: f64,
    },

    /// Errore generale
    #[serde(rename = "error")]
    Error {
        message: String,
        details: Option<String>,
    },
}

/// Configurazione per output JSON
#[derive(Debug, Serialize)]
pub struct JsonConfig {
    pub workers: usize,
    pub dry_run: bool,
    pub auth_file_path: String,
    pub redirect_directive: String,
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    /// Crea un messaggio di inizio
    pub fn start(input_dir: PathBuf, output_dir: PathBuf, total_files: usize, config: JsonConfig) -> Self {
        Self::Start {
            input_dir,
            output_dir,
            total_files,
            config,
        }
    }

    /// Crea un messaggio di progresso
    pub fn progress(current: usize, total: usize, files_written: usize, errors: usize) -> Self {
        let percentage = if total > 0 {
            (current as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Self::Progress {
            current,
            total,
            percentage,
            files_written,
            errors,
        }
    }

    /// Crea un messaggio di inizio file
    pub fn file_start(path: PathBuf, index: usize, total: usize) -> Self {
        Self::FileStart { path, index, total }
    }

    /// Crea un messaggio di completamento file riuscito
    pub fn file_complete(processed: &ProcessedFile) -> Self {
        Self::FileComplete {
            path: processed.source.clone(),
            output_path: Some(processed.output.clone()),
            original_name: processed.original_name.clone(),
            new_name: Some(processed.new_name.clone()),
            written: processed.written,
            report: processed.report.clone(),
            error: None,
        }
    }

    /// Crea un messaggio di completamento file fallito
    pub fn file_failed(path: PathBuf, error: String) -> Self {
        let original_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::FileComplete {
            path,
            output_path: None,
            original_name,
            new_name: None,
            written: false,
            report: RewriteReport::default(),
            error: Some(error),
        }
    }

    /// Crea un messaggio di completamento generale
    pub fn complete(stats: BatchStats, duration_seconds: f64) -> Self {
        Self::Complete {
            stats,
            duration_seconds,
        }
    }

    /// Crea un messaggio di errore
    pub fn error(message: String, details: Option<String>) -> Self {
        Self::Error { message, details }
    }
}

/// Converti Config esistente in JsonConfig
impl From<&Config> for JsonConfig {
    fn from(config: &Config) -> Self {
        Self {
            workers: config.workers,
            dry_run: config.dry_run,
            auth_file_path: config.auth_file_path.clone(),
            redirect_directive: config.redirect_directive.clone(),
        }
    }
}
