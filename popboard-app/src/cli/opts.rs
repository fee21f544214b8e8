use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, ValueEnum)]
pub enum StoreKind {
    Json,
    Memory,
}

#[derive(Debug, Parser, Clone)]
#[command(name = "popboard", version, about = "Popup banner store: HTTP API and CLI")]
pub struct Cli {
    /// Storage backend
    #[arg(long, value_enum, env = "POPBOARD_STORE", default_value_t = StoreKind::Json)]
    pub store: StoreKind,

    /// Directory holding popups.json
    #[arg(long, env = "POPBOARD_DATA_DIR", default_value = popboard_json::paths::DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Timestamped copies to keep under <data-dir>/backups (0 disables)
    #[arg(long, env = "POPBOARD_MAX_BACKUPS", default_value_t = 0)]
    pub max_backups: usize,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP API and static file server
    Serve(ServeCmd),
    /// Print every popup
    List,
    /// Print popups visible today, newest first
    Active,
    /// Create or update a popup
    Save(SaveCmd),
    /// Delete popups by id
    Rm { id: i64 },
}

#[derive(Debug, Args, Clone)]
pub struct ServeCmd {
    /// Bind address (host:port)
    #[arg(long, env = "POPBOARD_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: String,
    /// Directory served for every non-API path
    #[arg(long, env = "POPBOARD_STATIC_DIR", default_value = ".")]
    pub static_dir: PathBuf,
}

#[derive(Debug, Args, Clone)]
#[group(required = true, multiple = false)]
pub struct SaveCmd {
    /// Popup as inline JSON
    #[arg(long)]
    pub json: Option<String>,
    /// Read the popup JSON from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}
