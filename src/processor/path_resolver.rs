//! # Path Resolution Module
//!
//! Centralizza la logica di calcolo dei path di output.
//! Il nome di output deriva solo dal nome di input tramite `NamingRule`.

use crate::error::NormalizeError;
use crate::naming::NamingRule;
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Calcola nome e path di output per un file dato
    pub fn get_output_path(
        input_path: &Path,
        output_dir: &Path,
        rule: &NamingRule,
    ) -> Result<(String, PathBuf), NormalizeError> {
        let file_name = input_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| NormalizeError::InvalidFileName(input_path.to_path_buf()))?;

        let new_name = rule.normalize(file_name);
        if new_name.is_empty() {
            return Err(NormalizeError::InvalidFileName(input_path.to_path_buf()));
        }

        let output_path = output_dir.join(&new_name);
        debug!("Resolved output path: {} -> {}", input_path.display(), output_path.display());

        Ok((new_name, output_path))
    }

    /// Segnala input diversi che finirebbero sullo stesso file di output
    pub fn report_collisions(files: &[PathBuf], output_dir: &Path, rule: &NamingRule) -> usize {
        let mut targets: HashMap<PathBuf, Vec<&Path>> = HashMap::new();
        for file in files {
            if let Ok((_, output)) = Self::get_output_path(file, output_dir, rule) {
                targets.entry(output).or_default().push(file);
            }
        }

        let mut collisions = 0;
        for (output, sources) in targets.iter().filter(|(_, sources)| sources.len() > 1) {
            collisions += 1;
            let names: Vec<String> = sources.iter().map(|p| p.display().to_string()).collect();
            warn!(
                "⚠️ {} inputs map to {}, only one will be kept: {}",
                sources.len(),
                output.display(),
                names.join(", ")
            );
        }
        collisions
    }

    /// Crea la directory di output (e i parent mancanti)
    pub async fn ensure_output_dir(path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create output directory {}: {}", path.display(), e))?;
        Ok(())
    }
}
