//! # Remote Pass
//!
//! Sostituisce l'host delle righe `remote <host> <port>` con l'indirizzo risolto.
//! Solo la forma esatta a due argomenti viene riscritta; varianti con opzioni
//! extra o senza porta passano invariate. Il numero di righe non cambia mai.

use super::split_terminator;
use crate::resolver::{resolve_logged, HostResolver};

const REMOTE_PREFIX: &str = "remote ";

/// Lines after the remote pass plus lookup counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemotePass {
    pub lines: Vec<String>,
    pub resolved: usize,
    pub unresolved: usize,
}

/// Rewrite every well-formed `remote` line, resolving each host independently
pub fn rewrite_remotes(lines: &[String], resolver: &dyn HostResolver) -> RemotePass {
    let mut pass = RemotePass {
        lines: Vec::with_capacity(lines.len()),
        ..Default::default()
    };

    for line in lines {
        let Some((host, port)) = remote_target(line) else {
            pass.lines.push(line.clone());
            continue;
        };

        match resolve_logged(resolver, host) {
            Ok(addr) => {
                let (_, eol) = split_terminator(line);
                pass.lines.push(format!("remote {} {}{}", addr, port, eol));
                pass.resolved += 1;
            }
            Err(_) => {
                pass.lines.push(line.clone());
                pass.unresolved += 1;
            }
        }
    }

    pass
}

/// `(host, port)` of a `remote <host> <port>` line, `None` for anything else
fn remote_target(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if !trimmed.starts_with(REMOTE_PREFIX) {
        return None;
    }

    let mut tokens = trimmed.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(_), Some(host), Some(port), None) => Some((host, port)),
        _ => None,
    }
}
