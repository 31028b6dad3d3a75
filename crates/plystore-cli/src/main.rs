// crates/plystore-cli/src/main.rs

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plystore_cli::config::{StoreConfig, DEFAULT_ROOT};
use plystore_cli::gateway::Gateway;
use plystore_cli::logging;
use plystore_cli::store::DirBackend;
use plystore_core::DEFAULT_MAX_CHUNK_SIZE;

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "plystore")]
#[command(about = "Store and retrieve PLY documents as chunked element payloads", long_about = None)]
pub struct Cli {
    /// Store directory
    #[arg(long, global = true, env = "PLYSTORE_ROOT", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Maximum bytes per stored chunk
    #[arg(long, global = true, env = "PLYSTORE_MAX_CHUNK", default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
    pub max_chunk_size: usize,

    /// zstd level for record bodies (0 = store uncompressed)
    #[arg(long, global = true, default_value_t = 0)]
    pub zstd_level: i32,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a .ply file and report its elements without storing it
    Parse(cmd::parse::ParseArgs),

    /// Parse and store a .ply file under a unique name
    Put(cmd::put::PutArgs),

    /// Reconstruct a stored document
    Get(cmd::get::GetArgs),

    /// List stored document names
    List,

    /// List element type names across stored documents
    Types,

    /// Show record details (elements, chunk layout, document id)
    Inspect(cmd::inspect::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = StoreConfig {
        root: cli.root,
        max_chunk_size: cli.max_chunk_size,
        zstd_level: cli.zstd_level,
    };
    cfg.validate()?;

    match cli.cmd {
        Commands::Parse(args) => cmd::parse::run(args, cfg.max_chunk_size),
        Commands::Put(args) => cmd::put::run(args, &open_gateway(&cfg)?),
        Commands::Get(args) => cmd::get::run(args, &open_gateway(&cfg)?),
        Commands::List => cmd::list::run_names(&open_gateway(&cfg)?),
        Commands::Types => cmd::list::run_types(&open_gateway(&cfg)?),
        Commands::Inspect(args) => cmd::inspect::run(args, &open_gateway(&cfg)?),
    }
}

fn open_gateway(cfg: &StoreConfig) -> anyhow::Result<Gateway<DirBackend>> {
    let backend = DirBackend::open(&cfg.root, cfg.zstd_level)?;
    Ok(Gateway::new(backend, cfg.max_chunk_size))
}
