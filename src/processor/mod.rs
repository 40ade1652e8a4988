//! # Processor Module
//!
//! Modulo che separa le responsabilità in sottomoduli:
//! - `batch_processor`: Orchestratore principale del batch
//! - `task_processor`: Worker per singoli file
//! - `progress_tracker`: Gestione progress unificata
//! - `path_resolver`: Logica di calcolo path di output centralizzata

pub mod batch_processor;
pub mod path_resolver;
pub mod progress_tracker;
pub mod task_processor;

pub use batch_processor::BatchProcessor;
pub use path_resolver::PathResolver;
pub use progress_tracker::ProgressTracker;
pub use task_processor::{ProcessedFile, TaskProcessor};
