use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".money_core";
const HOME_ENV: &str = "MONEY_CORE_HOME";
const LEDGER_FILE: &str = "transactions.json";
const SETTINGS_FILE: &str = "settings.json";

/// Returns the application-specific data directory, defaulting to `~/.money_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path of the transaction document inside `root`.
pub fn ledger_file_in(root: &Path) -> PathBuf {
    root.join(LEDGER_FILE)
}

pub fn settings_file_in(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}
