use chrono::{DateTime, TimeZone, Utc};

use crate::{
    config::{Settings, Theme},
    core::services::summary_service::{
        ActivityPoint, IncomeExpenseChart, ReportStatistics, SummaryService, Totals,
        RECENT_ACTIVITY_LEN,
    },
    currency::Currency,
    errors::LedgerError,
    ledger::{HydrateReport, Ledger, Transaction, TransactionFilter, TransactionKind},
    storage::PersistenceGateway,
};

/// Result of a state change that was applied in memory.
///
/// `save_error` is set when the follow-up write failed; the change still
/// stands for the rest of the session but is not durable.
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub save_error: Option<LedgerError>,
}

impl<T> Committed<T> {
    pub fn is_durable(&self) -> bool {
        self.save_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Live application state: the ledger, the settings, and the store behind them.
pub struct Session {
    ledger: Ledger,
    settings: Settings,
    storage: Box<dyn PersistenceGateway>,
    last_save_error: Option<String>,
}

impl Session {
    /// Hydrates state from `storage`. Load failures fall back to an empty
    /// ledger and default settings.
    pub fn open(storage: Box<dyn PersistenceGateway>) -> Self {
        let records = storage.load_ledger().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load ledger, starting empty");
            Vec::new()
        });
        let settings = storage.load_settings().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load settings, using defaults");
            Settings::default()
        });
        let (ledger, report) = Ledger::from_records(records);
        let HydrateReport { loaded, duplicates } = &report;
        tracing::info!(
            transactions = loaded,
            duplicates = duplicates.len(),
            currency = %settings.currency,
            "session opened"
        );
        Self {
            ledger,
            settings,
            storage,
            last_save_error: None,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &dyn PersistenceGateway {
        self.storage.as_ref()
    }

    /// Message of the most recent failed save, cleared by the next successful one.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        kind: TransactionKind,
    ) -> Result<Committed<Transaction>, LedgerError> {
        self.add_at(description, amount, kind, Utc::now())
    }

    pub fn add_at(
        &mut self,
        description: &str,
        amount: f64,
        kind: TransactionKind,
        now: DateTime<Utc>,
    ) -> Result<Committed<Transaction>, LedgerError> {
        let transaction = self.ledger.add_at(description, amount, kind, now)?;
        tracing::info!(id = transaction.id(), kind = %kind, "transaction added");
        Ok(self.commit_ledger(transaction))
    }

    pub fn remove(&mut self, id: u64) -> Result<Committed<Transaction>, LedgerError> {
        let transaction = self.ledger.remove(id)?;
        tracing::info!(id, "transaction removed");
        Ok(self.commit_ledger(transaction))
    }

    /// Brings back the last removed transaction as the newest entry.
    pub fn restore(&mut self) -> Result<Committed<Transaction>, LedgerError> {
        let transaction = self.ledger.restore()?;
        tracing::info!(id = transaction.id(), "transaction restored");
        Ok(self.commit_ledger(transaction))
    }

    pub fn can_undo(&self) -> bool {
        self.ledger.can_restore()
    }

    pub fn pending_undo(&self) -> Option<&Transaction> {
        self.ledger.undo_buffer().peek()
    }

    pub fn set_currency(&mut self, currency: Currency) -> Committed<()> {
        self.settings.currency = currency;
        self.commit_settings()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Committed<()> {
        self.settings.theme = theme;
        self.commit_settings()
    }

    pub fn set_display_name(&mut self, name: &str) -> Committed<()> {
        self.settings.display_name = name.trim().to_string();
        self.commit_settings()
    }

    pub fn set_avatar(&mut self, avatar: Option<String>) -> Committed<()> {
        self.settings.avatar = avatar.filter(|value| !value.trim().is_empty());
        self.commit_settings()
    }

    /// Writes both documents, e.g. to retry after a failed save.
    pub fn flush(&mut self) -> Result<(), LedgerError> {
        let result = self
            .storage
            .save_ledger(self.ledger.transactions())
            .and_then(|_| self.storage.save_settings(&self.settings));
        self.record_save(result)
    }

    pub fn view(&self, filter: TransactionFilter) -> Vec<Transaction> {
        self.ledger.view(filter)
    }

    pub fn totals(&self) -> Totals {
        SummaryService::totals(self.transactions())
    }

    pub fn report<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ReportStatistics {
        SummaryService::report(self.transactions(), now)
    }

    pub fn income_expense_chart(&self) -> IncomeExpenseChart {
        SummaryService::income_expense_chart(self.transactions())
    }

    pub fn recent_activity(&self) -> Vec<ActivityPoint> {
        SummaryService::recent_activity(self.transactions(), RECENT_ACTIVITY_LEN)
    }

    /// Formats `amount` in the configured display currency.
    pub fn format_amount(&self, amount: f64) -> String {
        self.settings.currency.format(amount)
    }

    fn commit_ledger<T>(&mut self, value: T) -> Committed<T> {
        let result = self.storage.save_ledger(self.ledger.transactions());
        Committed {
            value,
            save_error: self.record_save(result).err(),
        }
    }

    fn commit_settings(&mut self) -> Committed<()> {
        let result = self.storage.save_settings(&self.settings);
        Committed {
            value: (),
            save_error: self.record_save(result).err(),
        }
    }

    fn record_save(&mut self, result: Result<(), LedgerError>) -> Result<(), LedgerError> {
        match result {
            Ok(()) => {
                self.last_save_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "save failed, changes are kept in memory only");
                self.last_save_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
