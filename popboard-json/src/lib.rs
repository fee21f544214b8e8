use async_trait::async_trait;
use parking_lot::Mutex;
use popboard_core::{remove, upsert, CoreError, IdGenerator, Popup, PopupId, PopupRepository};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::task;

pub mod paths;

/// Where to drop a copy of the store after each write, and how many to keep.
#[derive(Clone, Debug)]
pub struct BackupPolicy {
    pub dir: PathBuf,
    pub keep: usize,
}

struct Inner {
    path: PathBuf,
    backups: Option<BackupPolicy>,
    write_lock: Mutex<()>,
    ids: IdGenerator,
}

/// Popups persisted as one JSON array on disk.
///
/// Nothing is cached: every call reads the file, and every mutation rewrites
/// it whole. Mutations from this process are serialised; other processes
/// writing the same file are not coordinated with.
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<Inner>,
}

impl JsonStore {
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, CoreError> {
        Self::open_with(paths::store_file(data_dir.as_ref()), None).await
    }

    pub async fn open_with(path: PathBuf, backups: Option<BackupPolicy>) -> Result<Self, CoreError> {
        ensure_parent_dirs(&path)?;
        let backups = backups.map(|b| BackupPolicy {
            keep: b.keep.max(1),
            ..b
        });
        if let Some(b) = &backups {
            ensure_dir(&b.dir)?;
        }
        let p = path.clone();
        task::spawn_blocking(move || init_if_missing(&p))
            .await
            .map_err(|e| CoreError::Storage(format!("worker: {e}")))??;
        Ok(Self {
            inner: Arc::new(Inner {
                path,
                backups,
                write_lock: Mutex::new(()),
                ids: IdGenerator::new(),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Read, let `f` change the records, write back. One at a time.
    async fn mutate<T, F>(&self, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Vec<Popup>, &IdGenerator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        task::spawn_blocking(move || {
            let _guard = inner.write_lock.lock();
            let mut popups = read_popups(&inner.path)?;
            let out = f(&mut popups, &inner.ids);
            let json = serde_json::to_vec_pretty(&popups)
                .map_err(|e| CoreError::Corrupt(format!("serialize: {e}")))?;
            write_atomic(&inner.path, &json)
                .map_err(|e| CoreError::Storage(format!("write {}: {e}", inner.path.display())))?;
            if let Some(policy) = &inner.backups {
                if let Err(e) = write_backup(policy, &json) {
                    tracing::warn!(dir = %policy.dir.display(), error = %e, "backup failed");
                }
            }
            Ok::<T, CoreError>(out)
        })
        .await
        .map_err(|e| CoreError::Storage(format!("worker: {e}")))?
    }
}

fn ensure_parent_dirs(path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(path)
        .map_err(|e| CoreError::Storage(format!("create {}: {e}", path.display())))
}

fn init_if_missing(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        return Ok(());
    }
    tracing::info!(path = %path.display(), "initialising empty popup store");
    write_atomic(path, b"[]")
        .map_err(|e| CoreError::Storage(format!("init {}: {e}", path.display())))
}

fn read_popups(path: &Path) -> Result<Vec<Popup>, CoreError> {
    let buf = fs::read_to_string(path)
        .map_err(|e| CoreError::Storage(format!("read {}: {e}", path.display())))?;
    serde_json::from_str(&buf).map_err(|e| CoreError::Corrupt(format!("{}: {e}", path.display())))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn write_backup(policy: &BackupPolicy, bytes: &[u8]) -> Result<(), std::io::Error> {
    fs::create_dir_all(&policy.dir)?;
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S-%3f");
    let backup_path = policy.dir.join(format!("popups-{ts}.json"));
    write_atomic(&backup_path, bytes)?;
    rotate_backups(&policy.dir, policy.keep)
}

fn rotate_backups(dir: &Path, keep: usize) -> Result<(), std::io::Error> {
    // names embed the timestamp, so name order is age order
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    entries.sort();
    if entries.len() > keep {
        for p in &entries[0..entries.len() - keep] {
            let _ = fs::remove_file(p);
        }
    }
    Ok(())
}

#[async_trait]
impl PopupRepository for JsonStore {
    async fn list(&self) -> Result<Vec<Popup>, CoreError> {
        let path = self.inner.path.clone();
        task::spawn_blocking(move || read_popups(&path))
            .await
            .map_err(|e| CoreError::Storage(format!("worker: {e}")))?
    }

    async fn save(&self, popup: Popup) -> Result<Popup, CoreError> {
        let saved = self.mutate(move |v, ids| upsert(v, popup, ids)).await?;
        tracing::debug!(id = ?saved.id, "popup saved");
        Ok(saved)
    }

    async fn delete(&self, id: Option<PopupId>) -> Result<usize, CoreError> {
        let removed = self.mutate(move |v, _| remove(v, id)).await?;
        tracing::debug!(id = ?id, removed, "popup delete");
        Ok(removed)
    }
}
