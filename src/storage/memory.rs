use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use crate::{config::Settings, errors::LedgerError, ledger::Transaction};

use super::{
    decode_ledger, decode_settings, encode_ledger, encode_settings, PersistenceGateway, Result,
};

pub const LEDGER_KEY: &str = "transactions";
pub const SETTINGS_KEY: &str = "settings";

/// In-process key-value store holding each document as JSON text.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw document stored under `key`, if any.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    /// Stores `value` under `key` verbatim, bypassing encoding.
    pub fn set_raw(&self, key: &str, value: impl Into<String>) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.into());
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| LedgerError::Persistence("memory store lock poisoned".into()))
    }
}

impl PersistenceGateway for MemoryStorage {
    fn load_ledger(&self) -> Result<Vec<Transaction>> {
        match self.get_raw(LEDGER_KEY)? {
            Some(data) => decode_ledger(&data),
            None => Ok(Vec::new()),
        }
    }

    fn save_ledger(&self, transactions: &[Transaction]) -> Result<()> {
        let json = encode_ledger(transactions)?;
        self.set_raw(LEDGER_KEY, json)
    }

    fn load_settings(&self) -> Result<Settings> {
        match self.get_raw(SETTINGS_KEY)? {
            Some(data) => decode_settings(&data),
            None => Ok(Settings::default()),
        }
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        let json = encode_settings(settings)?;
        self.set_raw(SETTINGS_KEY, json)
    }
}
