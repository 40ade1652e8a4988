//! # OVPN Normalizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Fallback ai prompt interattivi se sorgente/output mancano
//! - Creazione della configurazione e avvio del batch
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose, `RUST_LOG` ha priorità)
//! 3. Carica la configurazione da file e applica gli override CLI
//! 4. Chiede sorgente e output mancanti, poi prepara la sorgente (estrazione zip o cartella)
//! 5. Esegue il `BatchProcessor` e pulisce la directory di estrazione
//!
//! ## Esempio di utilizzo:
//! ```bash
//! ovpn-normalizer --zip ~/Downloads/configs.zip --output ./patched --auth-file /etc/openvpn/auth.txt
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ovpn_normalizer::{prompt, BatchProcessor, Config, JsonMessage, Source, SystemResolver};

#[derive(Parser)]
#[command(name = "ovpn-normalizer")]
#[command(about = "Resolve remotes, pin auth-user-pass and redirect-gateway in OpenVPN client configs")]
struct Args {
    /// Zip archive containing .ovpn files
    #[arg(long, conflicts_with = "folder")]
    zip: Option<PathBuf>,

    /// Folder containing .ovpn files
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Output directory for patched configs
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Credential file written into auth-user-pass
    #[arg(long)]
    auth_file: Option<String>,

    /// Number of parallel workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Where archives are extracted (default: a temporary directory)
    #[arg(long)]
    extract_dir: Option<PathBuf>,

    /// Configuration file (default: ~/.ovpn-normalizer/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the effective configuration to the configuration file
    #[arg(long)]
    save_config: bool,

    /// Dry run - don't write output files
    #[arg(long)]
    dry_run: bool,

    /// Output progress and status as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let json_output = args.json;
    if let Err(e) = run(args).await {
        if json_output {
            JsonMessage::error(e.to_string(), Some(format!("{:#}", e))).emit();
        }
        error!("❌ {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config_path = args.config.clone().or_else(Config::default_path);
    let mut config = match config_path {
        Some(ref path) => Config::from_file(path).await?,
        None => Config::default(),
    };

    // CLI overrides
    if let Some(auth_file) = args.auth_file {
        config.auth_file_path = auth_file;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if args.extract_dir.is_some() {
        config.extract_dir = args.extract_dir;
    }
    config.dry_run |= args.dry_run;
    config.json_output |= args.json;
    config.validate()?;

    if args.save_config {
        match config_path {
            Some(ref path) => {
                config.save_to_file(path).await?;
                info!("💾 Saved configuration to {}", path.display());
            }
            None => return Err(anyhow::anyhow!("Could not determine a configuration file path")),
        }
    }

    let source = match (args.zip, args.folder) {
        (Some(zip), _) => Source::Archive(zip),
        (None, Some(folder)) => Source::Folder(folder),
        (None, None) => prompt::choose_source()?,
    };

    let output_dir = match args.output {
        Some(output) => output,
        None => prompt::ask_output_dir()?,
    };

    // Extraction output is removed on drop if anything below fails early
    let provisioned = source.provision(config.extract_dir.as_deref())?;

    let processor = BatchProcessor::new(config, Arc::new(SystemResolver::new()))?;
    let outcome = processor.run(provisioned.dir(), &output_dir).await;

    provisioned.cleanup()?;

    let stats = outcome?;
    if stats.errors > 0 {
        return Err(anyhow::anyhow!("{} file(s) could not be processed", stats.errors));
    }

    Ok(())
}
