//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con i valori canonici iniettati nei file
//! - Fornisce validazione dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default identici al comportamento storico del tool
//!
//! ## Parametri di configurazione:
//! - `auth_file_path`: Path del file credenziali per `auth-user-pass`
//! - `redirect_directive`: Direttiva inserita prima del blocco certificato (default: "redirect-gateway def1")
//! - `certificate_tag`: Tag di apertura del blocco certificato (default: "<ca>")
//! - `vendor_prefix` / `vendor_suffixes`: Affissi rimossi dai nomi file
//! - `extension`: Estensione dei file di configurazione (default: "ovpn")
//! - `workers`: Numero di worker paralleli (default: 4)
//! - `dry_run`: Nessuna scrittura su disco (default: false)
//! - `json_output`: Eventi JSON su stdout (default: false)
//! - `extract_dir`: Directory di estrazione archivi (default: None = directory temporanea)
//!
//! ## Esempio:
//! ```ignore
//! let config = Config {
//!     auth_file_path: "/etc/openvpn/auth.txt".to_string(),
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use crate::error::NormalizeError;
use crate::naming::NamingRule;
use crate::rewriter::Directives;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTH_FILE: &str = "/home/<username>/vpn-auth.txt";
pub const DEFAULT_REDIRECT_DIRECTIVE: &str = "redirect-gateway def1";
pub const DEFAULT_CERTIFICATE_TAG: &str = "<ca>";
pub const DEFAULT_VENDOR_PREFIX: &str = "NCVPN-";
pub const DEFAULT_VENDOR_SUFFIXES: [&str; 2] = ["-UDP", "-TCP"];
pub const DEFAULT_EXTENSION: &str = "ovpn";

/// Configuration for config normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential file written into every `auth-user-pass` directive
    pub auth_file_path: String,
    /// Directive inserted before the certificate block
    pub redirect_directive: String,
    /// Opening tag of the embedded certificate block
    pub certificate_tag: String,
    /// Prefix stripped from the start of output file names
    pub vendor_prefix: String,
    /// Substrings removed anywhere in output file names
    pub vendor_suffixes: Vec<String>,
    /// Extension (without dot) of the files to process
    pub extension: String,
    /// Number of parallel workers
    pub workers: usize,
    /// Dry run - don't write output files
    pub dry_run: bool,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
    /// Where archives are extracted (None = fresh temporary directory)
    pub extract_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_file_path: DEFAULT_AUTH_FILE.to_string(),
            redirect_directive: DEFAULT_REDIRECT_DIRECTIVE.to_string(),
            certificate_tag: DEFAULT_CERTIFICATE_TAG.to_string(),
            vendor_prefix: DEFAULT_VENDOR_PREFIX.to_string(),
            vendor_suffixes: DEFAULT_VENDOR_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            extension: DEFAULT_EXTENSION.to_string(),
            workers: 4,
            dry_run: false,
            json_output: false,
            extract_dir: None,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), NormalizeError> {
        if self.workers == 0 {
            return Err(NormalizeError::Validation("Number of workers must be greater than 0".to_string()));
        }

        if self.auth_file_path.trim().is_empty() {
            return Err(NormalizeError::Validation("Auth file path must not be empty".to_string()));
        }

        if self.redirect_directive.trim().is_empty() {
            return Err(NormalizeError::Validation("Redirect directive must not be empty".to_string()));
        }

        if self.certificate_tag.trim().is_empty() {
            return Err(NormalizeError::Validation("Certificate tag must not be empty".to_string()));
        }

        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(NormalizeError::Validation(format!(
                "Extension must be non-empty and given without a leading dot: {:?}",
                self.extension
            )));
        }

        if self.vendor_suffixes.iter().any(|s| s.is_empty()) {
            return Err(NormalizeError::Validation("Vendor suffixes must not be empty strings".to_string()));
        }

        Ok(())
    }

    /// Default location of the configuration file (`~/.ovpn-normalizer/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".ovpn-normalizer").join("config.json"))
    }

    /// Load configuration from file
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Canonical directive lines injected by the auth/redirect pass
    pub fn directives(&self) -> Directives {
        Directives {
            auth_line: format!("auth-user-pass {}", self.auth_file_path),
            redirect_line: self.redirect_directive.clone(),
            certificate_tag: self.certificate_tag.clone(),
        }
    }

    /// Output file naming rule
    pub fn naming_rule(&self) -> NamingRule {
        NamingRule {
            prefix: self.vendor_prefix.clone(),
            suffixes: self.vendor_suffixes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.workers = 0;
        assert!(config.validate().is_err());

        config.workers = 4;
        config.extension = ".ovpn".to_string();
        assert!(config.validate().is_err());

        config.extension = "ovpn".to_string();
        config.vendor_suffixes.push(String::new());
        assert!(config.validate().is_err());

        let err = Config {
            auth_file_path: "  ".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, NormalizeError::Validation(ref msg) if msg.contains("Auth file path")));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.auth_file_path, "/home/<username>/vpn-auth.txt");
        assert_eq!(config.redirect_directive, "redirect-gateway def1");
        assert_eq!(config.certificate_tag, "<ca>");
        assert_eq!(config.vendor_prefix, "NCVPN-");
        assert_eq!(config.vendor_suffixes, vec!["-UDP", "-TCP"]);
        assert_eq!(config.extension, "ovpn");
        assert_eq!(config.workers, 4);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_directives_from_config() {
        let config = Config {
            auth_file_path: "/etc/openvpn/creds".to_string(),
            ..Default::default()
        };
        let directives = config.directives();
        assert_eq!(directives.auth_line, "auth-user-pass /etc/openvpn/creds");
        assert_eq!(directives.redirect_line, "redirect-gateway def1");
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let original_config = Config {
            auth_file_path: "/root/auth.txt".to_string(),
            workers: 1,
            dry_run: true,
            ..Default::default()
        };

        original_config.save_to_file(&config_path).await.unwrap();
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert_eq!(loaded_config.auth_file_path, "/root/auth.txt");
        assert_eq!(loaded_config.workers, 1);
        assert!(loaded_config.dry_run);
        assert_eq!(loaded_config.vendor_prefix, "NCVPN-");
    }

    #[tokio::test]
    async fn test_missing_config_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_file(&temp_dir.path().join("absent.json")).await.unwrap();
        assert_eq!(config.workers, 4);
    }

    #[tokio::test]
    async fn test_partial_config_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        tokio::fs::write(&config_path, r#"{"workers": 2}"#).await.unwrap();

        let config = Config::from_file(&config_path).await.unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.redirect_directive, "redirect-gateway def1");
    }
}
