use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use docserve_core::config::{DEFAULT_DATAFILE, DEFAULT_HOST, DEFAULT_PORT};
use docserve_core::persist::{dump, load};
use docserve_core::{Config, IndexBuilder};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "docserve")]
#[command(about = "Offline documentation provider for TXT and XML documentation files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the documentation server at the given host and port
    Serve {
        /// Host to bind
        #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
        host: String,
        /// Port to bind
        #[arg(short = 'P', long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Registry data file used to initialize the server
        #[arg(short = 'd', long, default_value = DEFAULT_DATAFILE)]
        datafile: PathBuf,
    },
    /// Index all documentation files of a directory into the registry
    Index {
        /// Directory containing documentation files
        directory: PathBuf,
        /// Registry data file to update
        #[arg(short = 'd', long, default_value = DEFAULT_DATAFILE)]
        datafile: PathBuf,
        /// Number of parser threads (defaults to the number of CPUs)
        #[arg(short = 'w', long)]
        workers: Option<usize>,
    },
    /// Print document count and size of a registry data file
    Info {
        datafile: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::default();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    match cli.command {
        Commands::Serve { host, port, datafile } => {
            config.host = host;
            config.port = port;
            config.datafile = datafile;
            serve(config)
        }
        Commands::Index { directory, datafile, workers } => {
            config.datafile = datafile;
            if let Some(w) = workers {
                config = config.with_workers(w);
            }
            index(&config, directory)
        }
        Commands::Info { datafile } => info(datafile),
    }
}

fn serve(config: Config) -> Result<()> {
    let registry = load(&config.datafile)
        .with_context(|| format!("loading registry {}", config.datafile.display()))?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(docserve_server::serve(registry, &config))
}

fn index(config: &Config, directory: PathBuf) -> Result<()> {
    let mut registry = load(&config.datafile)
        .with_context(|| format!("loading registry {}", config.datafile.display()))?;
    let builder = IndexBuilder::new(config);
    tracing::debug!(workers = builder.workers(), directory = %directory.display(), "indexing");
    let report = builder
        .add_documents_from_directory(&mut registry, &directory)
        .with_context(|| format!("indexing {}", directory.display()))?;
    dump(&registry, &config.datafile)
        .with_context(|| format!("saving registry {}", config.datafile.display()))?;
    tracing::info!(
        directory = %directory.display(),
        reindexed = report.reindexed,
        docs = registry.len(),
        "index complete"
    );
    Ok(())
}

fn info(datafile: PathBuf) -> Result<()> {
    ensure!(datafile.exists(), "Registry data file does not exist.");
    let registry = load(&datafile)?;
    let size = fs::metadata(&datafile)?.len();

    println!("----- REGISTRY INFO: \"{}\" -----", datafile.display());
    println!("docs count: {}", registry.len());
    println!("registry file size: {:.3}KB", size as f64 / 1024.0);
    Ok(())
}
