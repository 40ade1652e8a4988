//! # Directive Rewriter Module
//!
//! Trasformazioni riga per riga del contenuto di un file `.ovpn`.
//! Entrambi i pass sono funzioni pure (nessun I/O su file):
//! - `remote`: sostituisce l'host delle direttive `remote <host> <port>` con l'IP risolto
//! - `auth`: normalizza `auth-user-pass` e inserisce `redirect-gateway` prima del blocco `<ca>`
//!
//! L'ordine è fisso: prima `remote`, poi `auth`.

pub mod auth;
pub mod remote;

pub use auth::{normalize_auth_and_redirect, AuthPass};
pub use remote::{rewrite_remotes, RemotePass};

use crate::resolver::HostResolver;
use serde::Serialize;

/// Canonical lines the auth/redirect pass writes, without line terminators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directives {
    pub auth_line: String,
    pub redirect_line: String,
    pub certificate_tag: String,
}

impl Default for Directives {
    fn default() -> Self {
        crate::config::Config::default().directives()
    }
}

/// Ordered lines of one config file, each keeping its original terminator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    lines: Vec<String>,
}

impl ConfigDocument {
    /// Split text into lines, terminators included
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Concatenate lines back into file content, byte for byte
    pub fn render(&self) -> String {
        self.lines.concat()
    }
}

/// Summary of what the two passes changed in one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    pub remotes_resolved: usize,
    pub remotes_unresolved: usize,
    pub auth_injected: bool,
    pub auth_rewritten: usize,
    pub redirect_inserted: bool,
}

/// Apply the remote pass then the auth/redirect pass
pub fn rewrite_document(
    document: &ConfigDocument,
    resolver: &dyn HostResolver,
    directives: &Directives,
) -> (ConfigDocument, RewriteReport) {
    let remote = rewrite_remotes(document.lines(), resolver);
    let auth = normalize_auth_and_redirect(&remote.lines, directives);

    let report = RewriteReport {
        remotes_resolved: remote.resolved,
        remotes_unresolved: remote.unresolved,
        auth_injected: auth.auth_injected,
        auth_rewritten: auth.auth_rewritten,
        redirect_inserted: auth.redirect_inserted,
    };

    (ConfigDocument::from_lines(auth.lines), report)
}

/// Split a line into its content and its terminator (`"\r\n"`, `"\n"` or `""`)
pub(crate) fn split_terminator(line: &str) -> (&str, &'static str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Terminator used for injected lines: the first one found in the document, `\n` otherwise
pub(crate) fn line_ending(lines: &[String]) -> &'static str {
    lines
        .iter()
        .map(|line| split_terminator(line).1)
        .find(|eol| !eol.is_empty())
        .unwrap_or("\n")
}
