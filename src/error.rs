//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `NormalizeError` enum per categorizzare gli errori di batch e sorgente
//! - Definisce `ResolutionError` per i fallimenti di risoluzione DNS (sempre recuperabili)
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O su un singolo file (lettura, scrittura, rename)
//! - `SourceNotFound`: Archivio o cartella sorgente inesistente (fatale)
//! - `Archive`: Archivio zip corrotto o non estraibile (fatale)
//! - `InvalidEncoding`: File di configurazione non UTF-8
//! - `InvalidFileName`: Nome file non rappresentabile come stringa
//! - `InvalidChoice`: Risposta non valida al prompt interattivo
//! - `Validation`: Errori di validazione configurazione
//!
//! ## Esempio:
//! ```ignore
//! if !path.exists() {
//!     return Err(NormalizeError::SourceNotFound(path.to_path_buf()));
//! }
//! ```

use std::path::PathBuf;

/// Custom error types for config normalization
#[derive(thiserror::Error, Debug)]
pub enum NormalizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("File is not valid UTF-8 text: {}", .0.display())]
    InvalidEncoding(PathBuf),

    #[error("Invalid file name: {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

/// Host name lookup failure. Callers keep the original `remote` line.
#[derive(thiserror::Error, Debug)]
#[error("Failed to resolve {host}: {source}")]
pub struct ResolutionError {
    pub host: String,
    #[source]
    pub source: std::io::Error,
}

impl ResolutionError {
    pub fn new(host: impl Into<String>, source: std::io::Error) -> Self {
        Self {
            host: host.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_message() {
        let err = ResolutionError::new(
            "vpn.example.com",
            std::io::Error::new(std::io::ErrorKind::NotFound, "unknown host"),
        );
        assert_eq!(err.host, "vpn.example.com");
        assert_eq!(err.to_string(), "Failed to resolve vpn.example.com: unknown host");
    }

    #[test]
    fn test_source_not_found_message() {
        let err = NormalizeError::SourceNotFound(PathBuf::from("/tmp/missing.zip"));
        assert_eq!(err.to_string(), "Source not found: /tmp/missing.zip");
    }
}
