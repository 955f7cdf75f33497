use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    config::Settings,
    core::utils::{app_data_dir, ensure_dir, ledger_file_in, settings_file_in},
    ledger::Transaction,
};

use super::{
    decode_ledger, decode_settings, encode_ledger, encode_settings, PersistenceGateway, Result,
};

const TMP_SUFFIX: &str = "tmp";

/// Filesystem store keeping each document as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    ledger_file: PathBuf,
    settings_file: PathBuf,
}

impl JsonStorage {
    /// Opens (and creates if needed) a store rooted at `root`, or at the
    /// application data directory when `None`.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self {
            ledger_file: ledger_file_in(&root),
            settings_file: settings_file_in(&root),
            root,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_file
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_file
    }
}

impl PersistenceGateway for JsonStorage {
    fn load_ledger(&self) -> Result<Vec<Transaction>> {
        match read_document(&self.ledger_file)? {
            Some(data) => decode_ledger(&data),
            None => Ok(Vec::new()),
        }
    }

    fn save_ledger(&self, transactions: &[Transaction]) -> Result<()> {
        let json = encode_ledger(transactions)?;
        replace_file(&self.ledger_file, &json)?;
        tracing::debug!(
            path = %self.ledger_file.display(),
            count = transactions.len(),
            "ledger saved"
        );
        Ok(())
    }

    fn load_settings(&self) -> Result<Settings> {
        match read_document(&self.settings_file)? {
            Some(data) => decode_settings(&data),
            None => Ok(Settings::default()),
        }
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        let json = encode_settings(settings)?;
        replace_file(&self.settings_file, &json)?;
        tracing::debug!(path = %self.settings_file.display(), "settings saved");
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(data))
}

/// Writes to a sibling temp file first so a failed write never truncates `path`.
fn replace_file(path: &Path, data: &str) -> Result<()> {
    let tmp = tmp_path(path);
    write_atomic(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        currency::Currency,
        ledger::{Ledger, TransactionKind},
    };
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn missing_documents_load_as_defaults() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load_ledger().expect("load ledger").is_empty());
        assert_eq!(storage.load_settings().expect("load settings"), Settings::default());
    }

    #[test]
    fn documents_live_under_the_base_dir() {
        let (storage, guard) = storage_with_temp_dir();
        assert_eq!(storage.base_dir(), guard.path());
        assert!(storage.ledger_path().starts_with(storage.base_dir()));
        assert!(storage.settings_path().starts_with(storage.base_dir()));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut ledger = Ledger::new();
        ledger.add("Salary", 1200.0, TransactionKind::Income).unwrap();
        ledger.add("Rent", 700.0, TransactionKind::Expense).unwrap();
        storage.save_ledger(ledger.transactions()).expect("save ledger");

        let loaded = storage.load_ledger().expect("load ledger");
        assert_eq!(loaded, ledger.transactions());
        assert!(!tmp_path(storage.ledger_path()).exists());
    }

    #[test]
    fn settings_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let settings = Settings {
            currency: Currency::Jpy,
            display_name: "Kai".into(),
            ..Settings::default()
        };
        storage.save_settings(&settings).expect("save settings");
        assert_eq!(storage.load_settings().expect("load settings"), settings);
    }
}
