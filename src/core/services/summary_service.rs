//! Derived figures for the dashboard, reports, and charts.
//!
//! Every function is a pure computation over a snapshot of transactions in
//! ledger order (newest first). Nothing here mutates or retains the input.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::ledger::{Transaction, TransactionKind};
use crate::utils::dates::same_month;

/// Number of entries shown in the recent-activity chart.
pub const RECENT_ACTIVITY_LEN: usize = 5;

/// Coarse sign of the overall balance.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

impl Trend {
    pub fn from_balance(balance: f64) -> Self {
        if balance > 0.0 {
            Trend::Positive
        } else if balance < 0.0 {
            Trend::Negative
        } else {
            Trend::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Positive => "Positive",
            Trend::Negative => "Negative",
            Trend::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ReportStatistics {
    pub transaction_count: usize,
    pub average_income: f64,
    pub average_expense: f64,
    pub highest: f64,
    pub month_net: f64,
    pub trend: Trend,
}

/// Income-versus-expense bar pair. Heights are percentages of the larger
/// total, with a floor of 1 so an empty ledger draws two flat bars.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct IncomeExpenseChart {
    pub income: f64,
    pub expense: f64,
    pub income_height: f64,
    pub expense_height: f64,
}

/// One bar of the recent-activity chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityPoint {
    pub id: u64,
    pub label: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub magnitude: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn total_by_type(transactions: &[Transaction], kind: TransactionKind) -> f64 {
        transactions
            .iter()
            .filter(|txn| txn.kind() == kind)
            .map(Transaction::amount)
            .sum()
    }

    pub fn count_by_type(transactions: &[Transaction], kind: TransactionKind) -> usize {
        transactions.iter().filter(|txn| txn.kind() == kind).count()
    }

    pub fn balance(transactions: &[Transaction]) -> f64 {
        Self::total_by_type(transactions, TransactionKind::Income)
            - Self::total_by_type(transactions, TransactionKind::Expense)
    }

    /// Mean amount of `kind`, or 0 when there are none.
    pub fn average(transactions: &[Transaction], kind: TransactionKind) -> f64 {
        match Self::count_by_type(transactions, kind) {
            0 => 0.0,
            count => Self::total_by_type(transactions, kind) / count as f64,
        }
    }

    /// Largest single amount of either kind, or 0 for an empty ledger.
    pub fn highest(transactions: &[Transaction]) -> f64 {
        transactions
            .iter()
            .map(Transaction::amount)
            .fold(None, |max: Option<f64>, amount| {
                Some(max.map_or(amount, |current| current.max(amount)))
            })
            .unwrap_or(0.0)
    }

    /// Net of the transactions recorded in the calendar month of `now`.
    pub fn current_period_net<Tz: TimeZone>(transactions: &[Transaction], now: &DateTime<Tz>) -> f64 {
        transactions
            .iter()
            .filter(|txn| same_month(&txn.timestamp(), now))
            .map(Transaction::signed_amount)
            .sum()
    }

    pub fn trend(transactions: &[Transaction]) -> Trend {
        Trend::from_balance(Self::balance(transactions))
    }

    /// First `n` entries in ledger order. Relies on the ledger being newest
    /// first and does not sort.
    pub fn recent_series(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
        transactions.iter().take(n).cloned().collect()
    }

    /// Each amount as a percentage (0..=100) of the series maximum.
    pub fn normalized_magnitudes(series: &[Transaction]) -> Vec<f64> {
        let max = series
            .iter()
            .map(Transaction::amount)
            .fold(0.0_f64, f64::max);
        series
            .iter()
            .map(|txn| {
                if max > 0.0 {
                    (txn.amount() / max * 100.0).clamp(0.0, 100.0)
                } else {
                    0.0
                }
            })
            .collect()
    }

    pub fn totals(transactions: &[Transaction]) -> Totals {
        let income = Self::total_by_type(transactions, TransactionKind::Income);
        let expense = Self::total_by_type(transactions, TransactionKind::Expense);
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }

    pub fn report<Tz: TimeZone>(transactions: &[Transaction], now: &DateTime<Tz>) -> ReportStatistics {
        ReportStatistics {
            transaction_count: transactions.len(),
            average_income: Self::average(transactions, TransactionKind::Income),
            average_expense: Self::average(transactions, TransactionKind::Expense),
            highest: Self::highest(transactions),
            month_net: Self::current_period_net(transactions, now),
            trend: Self::trend(transactions),
        }
    }

    pub fn income_expense_chart(transactions: &[Transaction]) -> IncomeExpenseChart {
        let Totals {
            income, expense, ..
        } = Self::totals(transactions);
        let scale = income.max(expense).max(1.0);
        IncomeExpenseChart {
            income,
            expense,
            income_height: income / scale * 100.0,
            expense_height: expense / scale * 100.0,
        }
    }

    /// Labelled recent-activity series for the `n` newest transactions.
    pub fn recent_activity(transactions: &[Transaction], n: usize) -> Vec<ActivityPoint> {
        let series = Self::recent_series(transactions, n);
        let magnitudes = Self::normalized_magnitudes(&series);
        series
            .into_iter()
            .zip(magnitudes)
            .map(|(txn, magnitude)| ActivityPoint {
                id: txn.id(),
                label: txn.description().to_string(),
                kind: txn.kind(),
                amount: txn.amount(),
                magnitude,
            })
            .collect()
    }
}
