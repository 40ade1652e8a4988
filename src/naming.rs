//! # Filename Normalization Module
//!
//! Deriva il nome del file di output dal nome di input, indipendentemente dal contenuto.
//!
//! ## Regola:
//! 1. Rimuove il prefisso vendor (`NCVPN-`) solo se all'inizio del nome
//! 2. Rimuove ogni occorrenza dei suffissi vendor (`-UDP`, `-TCP`), ovunque nel nome
//!
//! ## Esempio:
//! ```rust
//! use ovpn_normalizer::NamingRule;
//!
//! let rule = NamingRule::default();
//! assert_eq!(rule.normalize("NCVPN-Paris-UDP.ovpn"), "Paris.ovpn");
//! ```

use crate::config::{DEFAULT_VENDOR_PREFIX, DEFAULT_VENDOR_SUFFIXES};

/// Vendor affixes stripped from output file names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRule {
    pub prefix: String,
    pub suffixes: Vec<String>,
}

impl Default for NamingRule {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_VENDOR_PREFIX.to_string(),
            suffixes: DEFAULT_VENDOR_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl NamingRule {
    /// Strip the anchored prefix, then every occurrence of each suffix in order
    pub fn normalize(&self, file_name: &str) -> String {
        let name = if self.prefix.is_empty() {
            file_name
        } else {
            file_name.strip_prefix(self.prefix.as_str()).unwrap_or(file_name)
        };

        self.suffixes
            .iter()
            .filter(|suffix| !suffix.is_empty())
            .fold(name.to_string(), |acc, suffix| acc.replace(suffix.as_str(), ""))
    }
}
