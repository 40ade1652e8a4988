//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file di configurazione.
//!
//! ## Responsabilità:
//! - Discovery dei file `.ovpn` direttamente contenuti in una directory (nessuna ricorsione)
//! - Lettura completa di un file come `ConfigDocument`
//! - Scrittura atomica: file temporaneo nella directory di destinazione + rename
//!
//! ## Sicurezza operazioni:
//! - Un file di output è scritto per intero oppure non è scritto affatto
//! - File esistenti con lo stesso nome vengono sovrascritti senza avviso
//!
//! ## Esempio:
//! ```ignore
//! let files = FileManager::find_config_files(&source_dir, "ovpn")?;
//! for file in files {
//!     let document = FileManager::read_document(&file)?;
//! }
//! ```

use crate::error::NormalizeError;
use crate::rewriter::ConfigDocument;
use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Find all config files directly inside a directory
    ///
    /// Entries that cannot be inspected (dangling symlinks, permission errors)
    /// are kept when their name matches, so the batch reports them as failures.
    pub fn find_config_files(source_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(source_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    match e.path() {
                        Some(path) if e.depth() > 0 && Self::is_config_file(path, extension) => {
                            warn!("⚠️ Cannot inspect {}: {}", path.display(), e);
                            files.push(path.to_path_buf());
                        }
                        Some(path) if e.depth() > 0 => {
                            warn!("⚠️ Skipping unreadable entry {}: {}", path.display(), e);
                        }
                        _ => {
                            return Err(anyhow::anyhow!(
                                "Failed to read source directory {}: {}",
                                source_dir.display(),
                                e
                            ))
                        }
                    }
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_file() && Self::is_config_file(path, extension) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Check if the file name ends with `.<extension>`
    pub fn is_config_file(path: &Path, extension: &str) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| {
                name.strip_suffix(extension)
                    .map_or(false, |stem| stem.ends_with('.'))
            })
    }

    /// Read a whole config file
    pub fn read_document(path: &Path) -> Result<ConfigDocument, NormalizeError> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|_| NormalizeError::InvalidEncoding(path.to_path_buf()))?;
        Ok(ConfigDocument::parse(&text))
    }

    /// Write `content` to `destination` through a temporary file in the same directory
    pub fn write_atomic(destination: &Path, content: &str) -> Result<(), NormalizeError> {
        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(destination).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_config_file() {
        assert!(FileManager::is_config_file(Path::new("/a/Paris.ovpn"), "ovpn"));
        assert!(FileManager::is_config_file(Path::new(".ovpn"), "ovpn"));
        assert!(!FileManager::is_config_file(Path::new("/a/Paris.ovpn.bak"), "ovpn"));
        assert!(!FileManager::is_config_file(Path::new("/a/Parisovpn"), "ovpn"));
        assert!(!FileManager::is_config_file(Path::new("/a/Paris.OVPN"), "ovpn"));
    }

    #[test]
    fn test_find_config_files_top_level_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.ovpn"), "client\n").unwrap();
        fs::write(dir.path().join("a.ovpn"), "client\n").unwrap();
        fs::write(dir.path().join("readme.txt"), "hi\n").unwrap();
        fs::create_dir(dir.path().join("nested.ovpn")).unwrap();
        fs::write(dir.path().join("nested.ovpn").join("c.ovpn"), "client\n").unwrap();

        let files = FileManager::find_config_files(dir.path(), "ovpn").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.ovpn", "b.ovpn"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_kept_for_reporting() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Good.ovpn"), "client\n").unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("missing-target"),
            dir.path().join("NCVPN-Rome-UDP.ovpn"),
        )
        .unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing-too"), dir.path().join("notes.txt")).unwrap();

        let files = FileManager::find_config_files(dir.path(), "ovpn").unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("Good.ovpn"), dir.path().join("NCVPN-Rome-UDP.ovpn")]
        );
        assert!(FileManager::read_document(&files[1]).is_err());
    }

    #[test]
    fn test_missing_source_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(FileManager::find_config_files(&dir.path().join("absent"), "ovpn").is_err());
    }

    #[test]
    fn test_read_document_rejects_binary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.ovpn");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = FileManager::read_document(&path).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidEncoding(_)));
    }

    #[test]
    fn test_write_atomic_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Paris.ovpn");
        fs::write(&path, "old\n").unwrap();

        FileManager::write_atomic(&path, "new\r\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\r\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
