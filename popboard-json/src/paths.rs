use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const STORE_FILE_NAME: &str = "popups.json";
pub const BACKUPS_DIR_NAME: &str = "backups";

pub fn store_file(data_dir: &Path) -> PathBuf {
    data_dir.join(STORE_FILE_NAME)
}

pub fn backups_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(BACKUPS_DIR_NAME)
}
