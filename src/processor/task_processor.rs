//! # Task Processor Module
//!
//! Worker per la normalizzazione di singoli file.
//! Separato dall'orchestratore principale per maggiore modularità.
//!
//! Pipeline per file: lettura → pass `remote` → pass `auth`/`redirect` →
//! nome di output → scrittura atomica. Eseguito su thread bloccanti perché
//! la risoluzione DNS di sistema è sincrona.

use crate::{
    config::Config,
    file_manager::FileManager,
    naming::NamingRule,
    processor::path_resolver::PathResolver,
    resolver::HostResolver,
    rewriter::{rewrite_document, Directives, RewriteReport},
};
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Esito dell'elaborazione di un file
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_name: String,
    pub new_name: String,
    /// false in dry run
    pub written: bool,
    pub report: RewriteReport,
}

/// Worker per elaborazione singoli file
#[derive(Clone)]
pub struct TaskProcessor {
    resolver: Arc<dyn HostResolver>,
    directives: Directives,
    naming: NamingRule,
    output_dir: PathBuf,
    dry_run: bool,
}

impl TaskProcessor {
    /// Crea nuovo task processor
    pub fn new(config: &Config, resolver: Arc<dyn HostResolver>, output_dir: PathBuf) -> Self {
        Self {
            resolver,
            directives: config.directives(),
            naming: config.naming_rule(),
            output_dir,
            dry_run: config.dry_run,
        }
    }

    /// Calcola path di output atteso (delegato a PathResolver)
    pub fn get_expected_output_path(&self, input_path: &Path) -> Result<(String, PathBuf)> {
        Ok(PathResolver::get_output_path(input_path, &self.output_dir, &self.naming)?)
    }

    /// Processa un singolo file
    pub fn process_single_file(&self, file_path: &Path) -> Result<ProcessedFile> {
        let original_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let (new_name, output) = self.get_expected_output_path(file_path)?;

        let document = FileManager::read_document(file_path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_path.display(), e))?;
        debug!("Read {} lines from {}", document.lines().len(), file_path.display());

        let (rewritten, report) = rewrite_document(&document, self.resolver.as_ref(), &self.directives);

        if self.dry_run {
            debug!("Dry run: would write {}", output.display());
        } else {
            FileManager::write_atomic(&output, &rewritten.render())
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", output.display(), e))?;
        }

        Ok(ProcessedFile {
            source: file_path.to_path_buf(),
            output,
            original_name,
            new_name,
            written: !self.dry_run,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::stub::StaticResolver;
    use std::fs;
    use tempfile::TempDir;

    fn task(output_dir: &Path, dry_run: bool) -> TaskProcessor {
        let config = Config {
            dry_run,
            ..Default::default()
        };
        let resolver = StaticResolver::new().with("vpn.example.com", "203.0.113.5");
        TaskProcessor::new(&config, Arc::new(resolver), output_dir.to_path_buf())
    }

    #[test]
    fn test_process_single_file() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let input = src.path().join("NCVPN-Paris-UDP.ovpn");
        fs::write(
            &input,
            "client\nremote vpn.example.com 1194\n<ca>\n...cert...\n</ca>\n",
        )
        .unwrap();

        let processed = task(out.path(), false).process_single_file(&input).unwrap();

        assert_eq!(processed.original_name, "NCVPN-Paris-UDP.ovpn");
        assert_eq!(processed.new_name, "Paris.ovpn");
        assert!(processed.written);
        assert_eq!(processed.report.remotes_resolved, 1);
        assert_eq!(
            fs::read_to_string(out.path().join("Paris.ovpn")).unwrap(),
            "auth-user-pass /home/<username>/vpn-auth.txt\n\
             client\n\
             remote 203.0.113.5 1194\n\
             redirect-gateway def1\n\
             <ca>\n\
             ...cert...\n\
             </ca>\n"
        );
        // Source is never modified
        assert!(fs::read_to_string(&input).unwrap().starts_with("client\n"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let input = src.path().join("Tokyo.ovpn");
        fs::write(&input, "client\n").unwrap();

        let processed = task(out.path(), true).process_single_file(&input).unwrap();

        assert!(!processed.written);
        assert!(processed.report.auth_injected);
        assert!(!out.path().join("Tokyo.ovpn").exists());
    }

    #[test]
    fn test_missing_output_dir_fails_without_partial_file() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let input = src.path().join("Tokyo.ovpn");
        fs::write(&input, "client\n").unwrap();
        let missing = out.path().join("not-created");

        let err = task(&missing, false).process_single_file(&input).unwrap_err();

        assert!(err.to_string().contains("Failed to write"));
        assert!(!missing.exists());
    }
}
