//! # Source Provisioning Module
//!
//! Ottiene la directory sorgente dei file `.ovpn`:
//! - `Source::Archive`: estrae completamente lo zip in una directory di lavoro
//! - `Source::Folder`: usa la cartella così com'è
//!
//! La directory di estrazione è temporanea (default) oppure configurata;
//! `ProvisionedSource::cleanup()` la rimuove a fine batch. Le cartelle
//! fornite dall'utente non vengono mai cancellate.

use crate::error::NormalizeError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};
use zip::ZipArchive;

/// Where the config files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Archive(PathBuf),
    Folder(PathBuf),
}

impl Source {
    pub fn path(&self) -> &Path {
        match self {
            Source::Archive(path) | Source::Folder(path) => path,
        }
    }

    /// Validate the source and materialize it as a directory
    pub fn provision(&self, extract_dir: Option<&Path>) -> Result<ProvisionedSource, NormalizeError> {
        let path = self.path();
        let present = match self {
            Source::Folder(_) => path.is_dir(),
            Source::Archive(_) => path.is_file(),
        };
        if !present {
            return Err(NormalizeError::SourceNotFound(path.to_path_buf()));
        }

        match self {
            Source::Folder(_) => Ok(ProvisionedSource {
                dir: path.to_path_buf(),
                scratch: Scratch::Borrowed,
            }),
            Source::Archive(_) => {
                let scratch = match extract_dir {
                    Some(dir) => Scratch::Dir {
                        path: dir.to_path_buf(),
                        created: !dir.exists(),
                    },
                    None => Scratch::Temp(
                        tempfile::Builder::new().prefix("extracted_ovpn").tempdir()?,
                    ),
                };
                let dir = scratch.path().map(Path::to_path_buf).unwrap_or_default();
                let provisioned = ProvisionedSource { dir, scratch };

                // On failure the drop of `provisioned` removes partial output
                extract_zip(path, provisioned.dir())?;

                Ok(provisioned)
            }
        }
    }
}

/// Extract every entry of `zip_path` into `extract_dir`
pub fn extract_zip(zip_path: &Path, extract_dir: &Path) -> Result<(), NormalizeError> {
    fs::create_dir_all(extract_dir)?;

    let file = fs::File::open(zip_path)?;
    let mut archive = ZipArchive::new(file)?;
    archive.extract(extract_dir)?;

    info!("📂 Extracted {} entries to {}", archive.len(), extract_dir.display());
    Ok(())
}

#[derive(Debug)]
enum Scratch {
    Borrowed,
    Temp(TempDir),
    Dir { path: PathBuf, created: bool },
}

impl Scratch {
    fn path(&self) -> Option<&Path> {
        match self {
            Scratch::Borrowed => None,
            Scratch::Temp(temp) => Some(temp.path()),
            Scratch::Dir { path, .. } => Some(path),
        }
    }
}

/// A ready source directory plus whatever scratch space backs it
#[derive(Debug)]
pub struct ProvisionedSource {
    dir: PathBuf,
    scratch: Scratch,
}

impl ProvisionedSource {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_extracted(&self) -> bool {
        !matches!(self.scratch, Scratch::Borrowed)
    }

    /// Remove extraction output, if any
    pub fn cleanup(mut self) -> Result<(), NormalizeError> {
        match std::mem::replace(&mut self.scratch, Scratch::Borrowed) {
            Scratch::Borrowed => {}
            Scratch::Temp(temp) => {
                let path = temp.path().to_path_buf();
                temp.close()?;
                info!("🗑️ Deleted temporary folder: {}", path.display());
            }
            Scratch::Dir { path, created: true } => {
                if path.exists() {
                    fs::remove_dir_all(&path)?;
                    info!("🗑️ Deleted temporary folder: {}", path.display());
                }
            }
            Scratch::Dir { path, created: false } => {
                warn!(
                    "Extraction directory existed before this run, leaving it in place: {}",
                    path.display()
                );
            }
        }
        Ok(())
    }
}

/// Early exits skip `cleanup()`; a `TempDir` removes itself, a created extraction dir is removed here
impl Drop for ProvisionedSource {
    fn drop(&mut self) {
        if let Scratch::Dir { path, created: true } = &self.scratch {
            if !path.exists() {
                return;
            }
            match fs::remove_dir_all(path) {
                Ok(()) => info!("🗑️ Deleted temporary folder: {}", path.display()),
                Err(e) => warn!("Failed to delete extraction folder {}: {}", path.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = fs::File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (name, content) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_missing_sources() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = Source::Folder(missing.clone()).provision(None).unwrap_err();
        assert!(matches!(err, NormalizeError::SourceNotFound(p) if p == missing));

        let err = Source::Archive(missing.join("a.zip")).provision(None).unwrap_err();
        assert!(matches!(err, NormalizeError::SourceNotFound(_)));

        // A directory is not an archive
        let err = Source::Archive(dir.path().to_path_buf()).provision(None).unwrap_err();
        assert!(matches!(err, NormalizeError::SourceNotFound(_)));
    }

    #[test]
    fn test_folder_is_used_directly_and_kept() {
        let dir = tempfile::TempDir::new().unwrap();
        let provisioned = Source::Folder(dir.path().to_path_buf()).provision(None).unwrap();

        assert_eq!(provisioned.dir(), dir.path());
        assert!(!provisioned.is_extracted());
        provisioned.cleanup().unwrap();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_archive_extracted_to_temp_and_cleaned() {
        let dir = tempfile::TempDir::new().unwrap();
        let zip_path = dir.path().join("configs.zip");
        write_zip(&zip_path, &[("NCVPN-Paris-UDP.ovpn", "client\n"), ("notes.txt", "x")]);

        let provisioned = Source::Archive(zip_path).provision(None).unwrap();
        let extracted = provisioned.dir().to_path_buf();
        assert!(provisioned.is_extracted());
        assert_eq!(
            fs::read_to_string(extracted.join("NCVPN-Paris-UDP.ovpn")).unwrap(),
            "client\n"
        );

        provisioned.cleanup().unwrap();
        assert!(!extracted.exists());
    }

    #[test]
    fn test_archive_into_configured_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let zip_path = dir.path().join("configs.zip");
        write_zip(&zip_path, &[("Tokyo.ovpn", "client\n")]);
        let extract_dir = dir.path().join("extracted_ovpn");

        let provisioned = Source::Archive(zip_path).provision(Some(&extract_dir)).unwrap();
        assert!(extract_dir.join("Tokyo.ovpn").is_file());

        provisioned.cleanup().unwrap();
        assert!(!extract_dir.exists());
    }

    #[test]
    fn test_created_extract_dir_removed_without_cleanup() {
        let dir = tempfile::TempDir::new().unwrap();
        let zip_path = dir.path().join("configs.zip");
        write_zip(&zip_path, &[("Tokyo.ovpn", "client\n")]);
        let extract_dir = dir.path().join("x");

        let provisioned = Source::Archive(zip_path).provision(Some(&extract_dir)).unwrap();
        assert!(extract_dir.join("Tokyo.ovpn").is_file());

        // Same as an early return before cleanup() runs
        drop(provisioned);
        assert!(!extract_dir.exists());
    }

    #[test]
    fn test_corrupt_archive_leaves_no_created_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let zip_path = dir.path().join("broken.zip");
        fs::write(&zip_path, b"not a zip").unwrap();
        let extract_dir = dir.path().join("x");

        assert!(Source::Archive(zip_path).provision(Some(&extract_dir)).is_err());
        assert!(!extract_dir.exists());
    }

    #[test]
    fn test_source_path() {
        assert_eq!(Source::Folder(PathBuf::from("/srv/ovpn")).path(), Path::new("/srv/ovpn"));
        assert_eq!(Source::Archive(PathBuf::from("a.zip")).path(), Path::new("a.zip"));
    }

    #[test]
    fn test_preexisting_extract_dir_is_kept() {
        let dir = tempfile::TempDir::new().unwrap();
        let zip_path = dir.path().join("configs.zip");
        write_zip(&zip_path, &[("Tokyo.ovpn", "client\n")]);
        let extract_dir = dir.path().join("mine");
        fs::create_dir(&extract_dir).unwrap();

        let provisioned = Source::Archive(zip_path).provision(Some(&extract_dir)).unwrap();
        provisioned.cleanup().unwrap();
        assert!(extract_dir.join("Tokyo.ovpn").is_file());
    }

    #[test]
    fn test_corrupt_archive() {
        let dir = tempfile::TempDir::new().unwrap();
        let zip_path = dir.path().join("broken.zip");
        fs::write(&zip_path, b"not a zip").unwrap();

        let err = Source::Archive(zip_path).provision(None).unwrap_err();
        assert!(matches!(err, NormalizeError::Archive(_)));
    }
}
