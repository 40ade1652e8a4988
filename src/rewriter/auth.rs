//! # Auth/Redirect Pass
//!
//! Scansione singola in avanti:
//! - ogni riga `auth-user-pass ...` diventa la riga canonica (argomento originale scartato)
//! - `redirect-gateway` viene inserito una sola volta, subito prima del primo tag `<ca>`
//! - se nessuna riga `auth-user-pass` esisteva, quella canonica va in cima al file
//!
//! Il pass non fallisce mai. Senza tag `<ca>` nessun redirect viene aggiunto.

use super::{line_ending, split_terminator, Directives};

const AUTH_KEYWORD: &str = "auth-user-pass";

/// Lines after the auth/redirect pass plus what was changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthPass {
    pub lines: Vec<String>,
    pub auth_injected: bool,
    pub auth_rewritten: usize,
    pub redirect_inserted: bool,
}

pub fn normalize_auth_and_redirect(lines: &[String], directives: &Directives) -> AuthPass {
    let eol = line_ending(lines);
    let had_auth = lines.iter().any(|line| is_auth_line(line));
    let redirect = directives.redirect_line.trim();

    let mut pass = AuthPass {
        lines: Vec::with_capacity(lines.len() + 2),
        ..Default::default()
    };
    let mut redirect_handled = false;

    for line in lines {
        let trimmed = line.trim();

        if !redirect_handled && trimmed == directives.certificate_tag.trim() {
            // A redirect already right before the tag counts as inserted
            let present = pass
                .lines
                .last()
                .map_or(false, |prev| prev.trim() == redirect);
            if !present {
                pass.lines.push(format!("{}{}", directives.redirect_line, eol));
                pass.redirect_inserted = true;
            }
            redirect_handled = true;
            pass.lines.push(line.clone());
        } else if trimmed.starts_with(AUTH_KEYWORD) {
            let (_, line_eol) = split_terminator(line);
            pass.lines.push(format!("{}{}", directives.auth_line, line_eol));
            pass.auth_rewritten += 1;
        } else {
            pass.lines.push(line.clone());
        }
    }

    if !had_auth {
        pass.lines.insert(0, format!("{}{}", directives.auth_line, eol));
        pass.auth_injected = true;
    }

    pass
}

fn is_auth_line(line: &str) -> bool {
    line.trim().starts_with(AUTH_KEYWORD)
}
