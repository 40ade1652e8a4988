//! # Host Resolver Module
//!
//! Risoluzione dei nomi host delle direttive `remote` in indirizzi IP numerici.
//!
//! ## Responsabilità:
//! - Definisce il trait `HostResolver`, iniettabile per test deterministici
//! - `SystemResolver`: usa il resolver di sistema (getaddrinfo) tramite `dns-lookup`
//! - `resolve_logged()`: singola chiamata al resolver con logging osservazionale
//!
//! ## Politica:
//! - Una sola chiamata per host, nessun retry, nessun timeout proprio
//! - Preferisce il primo indirizzo IPv4, altrimenti il primo IPv6
//! - Un fallimento non è mai fatale: il chiamante mantiene la riga originale

use crate::error::ResolutionError;
use std::io;
use std::net::IpAddr;
use tracing::{info, warn};

/// Maps a host name to a single numeric address
pub trait HostResolver: Send + Sync {
    fn resolve(&self, host: &str) -> Result<IpAddr, ResolutionError>;
}

/// Resolver backed by the platform's name resolution (`getaddrinfo`)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }

    /// Picks the address `gethostbyname` would have returned when there is one
    fn pick_address(addrs: &[IpAddr]) -> Option<IpAddr> {
        addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
    }
}

impl HostResolver for SystemResolver {
    fn resolve(&self, host: &str) -> Result<IpAddr, ResolutionError> {
        let addrs = dns_lookup::lookup_host(host).map_err(|e| ResolutionError::new(host, e))?;

        Self::pick_address(&addrs).ok_or_else(|| {
            ResolutionError::new(
                host,
                io::Error::new(io::ErrorKind::NotFound, "no addresses returned"),
            )
        })
    }
}

/// Resolves `host` once, logging the outcome
pub fn resolve_logged(resolver: &dyn HostResolver, host: &str) -> Result<IpAddr, ResolutionError> {
    match resolver.resolve(host) {
        Ok(addr) => {
            info!("[+] {} resolved to {}", host, addr);
            Ok(addr)
        }
        Err(e) => {
            warn!("[!] {}", e);
            Err(e)
        }
    }
}
