//! # OVPN Normalizer Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom
//! - `resolver`: Risoluzione host → IP (trait iniettabile + resolver di sistema)
//! - `rewriter`: Pass `remote` e `auth`/`redirect` sulle righe dei file
//! - `naming`: Normalizzazione dei nomi file di output
//! - `file_manager`: Discovery, lettura e scrittura atomica dei file
//! - `source`: Estrazione zip o uso diretto della cartella sorgente
//! - `processor`: Orchestratore del batch
//! - `progress` / `json_output`: Progress tracking, statistiche ed eventi JSON
//! - `prompt`: Prompt interattivi di fallback
//!
//! ## Utilizzo:
//! ```ignore
//! use ovpn_normalizer::{BatchProcessor, Config, SystemResolver};
//! use std::sync::Arc;
//!
//! let processor = BatchProcessor::new(Config::default(), Arc::new(SystemResolver::new()))?;
//! let stats = processor.run(&source_dir, &output_dir).await?;
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod naming;
pub mod processor;
pub mod progress;
pub mod prompt;
pub mod resolver;
pub mod rewriter;
pub mod source;

pub use config::Config;
pub use error::{NormalizeError, ResolutionError};
pub use json_output::JsonMessage;
pub use naming::NamingRule;
pub use processor::{BatchProcessor, ProcessedFile};
pub use progress::BatchStats;
pub use resolver::{HostResolver, SystemResolver};
pub use rewriter::{ConfigDocument, Directives, RewriteReport};
pub use source::{ProvisionedSource, Source};
