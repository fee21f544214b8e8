use crate::api::server as api_server;
use crate::cli::opts::*;

use anyhow::{Context, Result};
use chrono::Utc;
use popboard_core::{MemoryRepo, Popup, PopupRepository};
use popboard_json::{paths, BackupPolicy, JsonStore};
use std::sync::Arc;

pub async fn run_cli(args: Cli) -> Result<()> {
    let repo = open_repo(&args).await?;
    match args.cmd {
        Command::Serve(cmd) => {
            let addr: std::net::SocketAddr = cmd
                .addr
                .parse()
                .with_context(|| format!("invalid bind address: {}", cmd.addr))?;
            api_server::run(repo, addr, cmd.static_dir).await
        }
        Command::List => print_json(&repo.list().await?),
        Command::Active => print_json(&repo.list_active(Utc::now().date_naive()).await?),
        Command::Save(cmd) => save_cmd(repo, cmd).await,
        Command::Rm { id } => {
            let removed = repo.delete(Some(id)).await?;
            println!("removed {removed}");
            Ok(())
        }
    }
}

pub async fn open_repo(args: &Cli) -> Result<Arc<dyn PopupRepository>> {
    match args.store {
        StoreKind::Json => {
            let backups = (args.max_backups > 0).then(|| BackupPolicy {
                dir: paths::backups_dir(&args.data_dir),
                keep: args.max_backups,
            });
            let path = paths::store_file(&args.data_dir);
            let s = JsonStore::open_with(path.clone(), backups)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            tracing::debug!(path = %path.display(), "json store open");
            Ok(Arc::new(s))
        }
        StoreKind::Memory => Ok(Arc::new(MemoryRepo::new())),
    }
}

async fn save_cmd(repo: Arc<dyn PopupRepository>, cmd: SaveCmd) -> Result<()> {
    let raw = match (cmd.json, cmd.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => anyhow::bail!("pass --json or --file"),
    };
    let popup: Popup = serde_json::from_str(&raw).context("popup is not a JSON object")?;
    let saved = repo.save(popup).await?;
    print_json(&saved)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
