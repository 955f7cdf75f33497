mod common;

use std::collections::HashSet;

use chrono::Duration;
use common::utc;
use money_core::{
    core::services::{SummaryService, Trend},
    errors::LedgerError,
    ledger::{Ledger, Transaction, TransactionFilter, TransactionKind},
};

fn mixed_ledger() -> Ledger {
    let start = utc(2024, 2, 1, 9);
    let mut ledger = Ledger::new();
    let entries = [
        ("Salary", 2500.0, TransactionKind::Income),
        ("Rent", 950.0, TransactionKind::Expense),
        ("Groceries", 82.4, TransactionKind::Expense),
        ("Freelance", 400.0, TransactionKind::Income),
        ("Cinema", 18.0, TransactionKind::Expense),
    ];
    for (offset, (description, amount, kind)) in entries.into_iter().enumerate() {
        ledger
            .add_at(description, amount, kind, start + Duration::hours(offset as i64))
            .unwrap();
    }
    ledger
}

fn sorted_by_id(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut out = transactions.to_vec();
    out.sort_by_key(Transaction::id);
    out
}

#[test]
fn every_add_grows_by_one_with_a_fresh_id_in_front() {
    let mut ledger = Ledger::new();
    let same_instant = utc(2024, 2, 1, 9);
    let mut seen = HashSet::new();
    for idx in 0..50 {
        let before = ledger.len();
        let txn = ledger
            .add_at("Snack", 1.0 + idx as f64, TransactionKind::Expense, same_instant)
            .unwrap();
        assert_eq!(ledger.len(), before + 1);
        assert_eq!(ledger.transactions()[0].id(), txn.id());
        assert!(seen.insert(txn.id()), "id {} was issued twice", txn.id());
    }
}

#[test]
fn balance_is_income_minus_expense_in_every_state() {
    let mut ledger = Ledger::new();
    assert_eq!(SummaryService::balance(ledger.transactions()), 0.0);

    let check = |ledger: &Ledger| {
        let txns = ledger.transactions();
        let expected = SummaryService::total_by_type(txns, TransactionKind::Income)
            - SummaryService::total_by_type(txns, TransactionKind::Expense);
        assert_eq!(SummaryService::balance(txns), expected);
    };

    let salary = ledger
        .add_at("Salary", 1000.0, TransactionKind::Income, utc(2024, 1, 1, 8))
        .unwrap();
    check(&ledger);
    ledger
        .add_at("Rent", 300.0, TransactionKind::Expense, utc(2024, 1, 2, 8))
        .unwrap();
    check(&ledger);
    ledger.remove(salary.id()).unwrap();
    check(&ledger);
    ledger.restore().unwrap();
    check(&ledger);
}

#[test]
fn remove_then_restore_preserves_content() {
    let mut ledger = mixed_ledger();
    let before = sorted_by_id(ledger.transactions());
    let target = ledger.transactions()[3].clone();

    let removed = ledger.remove(target.id()).unwrap();
    assert_eq!(removed, target);
    assert!(!ledger.contains(target.id()));

    let restored = ledger.restore().unwrap();
    assert_eq!(restored, target);
    assert_eq!(ledger.transactions()[0], target);
    assert_eq!(sorted_by_id(ledger.transactions()), before);
}

#[test]
fn averages_never_divide_by_zero() {
    let mut ledger = Ledger::new();
    ledger
        .add_at("Bus", 2.5, TransactionKind::Expense, utc(2024, 1, 1, 8))
        .unwrap();
    assert_eq!(SummaryService::average(ledger.transactions(), TransactionKind::Income), 0.0);
    assert_eq!(SummaryService::average(ledger.transactions(), TransactionKind::Expense), 2.5);
}

#[test]
fn normalized_magnitudes_peak_at_one_hundred() {
    let ledger = mixed_ledger();
    let series = SummaryService::recent_series(ledger.transactions(), 5);
    let magnitudes = SummaryService::normalized_magnitudes(&series);
    assert_eq!(magnitudes.len(), series.len());
    assert!(magnitudes.iter().any(|m| (*m - 100.0).abs() < f64::EPSILON));
    assert!(magnitudes.iter().all(|m| (0.0..=100.0).contains(m)));
}

#[test]
fn filtering_all_is_idempotent() {
    let ledger = mixed_ledger();
    let first = ledger.view(TransactionFilter::All);
    let second = ledger.view(TransactionFilter::All);
    assert_eq!(first, second);
    assert_eq!(first, ledger.transactions());
}

#[test]
fn coffee_on_empty_ledger_goes_negative() {
    let mut ledger = Ledger::new();
    ledger.add("Coffee", 4.50, TransactionKind::Expense).unwrap();
    let txns = ledger.transactions();
    assert_eq!(SummaryService::balance(txns), -4.50);
    assert_eq!(SummaryService::total_by_type(txns, TransactionKind::Expense), 4.50);
    assert_eq!(SummaryService::trend(txns), Trend::Negative);
}

#[test]
fn income_and_expense_give_positive_trend() {
    let mut ledger = Ledger::new();
    ledger.add("Salary", 1000.0, TransactionKind::Income).unwrap();
    ledger.add("Rent", 300.0, TransactionKind::Expense).unwrap();
    let txns = ledger.transactions();
    assert_eq!(SummaryService::balance(txns), 700.0);
    assert_eq!(SummaryService::trend(txns), Trend::Positive);
    assert_eq!(SummaryService::highest(txns), 1000.0);
}

#[test]
fn zero_amount_is_rejected() {
    let mut ledger = mixed_ledger();
    let size = ledger.len();
    let err = ledger
        .add("Nothing", 0.0, TransactionKind::Income)
        .expect_err("zero is not a valid amount");
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(ledger.len(), size);
}

#[test]
fn unknown_id_leaves_ledger_and_undo_untouched() {
    let mut ledger = mixed_ledger();
    let parked = ledger.transactions()[2].id();
    ledger.remove(parked).unwrap();
    let snapshot = ledger.transactions().to_vec();

    let err = ledger.remove(1).expect_err("id 1 was never issued");
    assert!(matches!(err, LedgerError::NotFound(1)));
    assert_eq!(ledger.transactions(), snapshot.as_slice());
    assert_eq!(ledger.undo_buffer().peek().map(Transaction::id), Some(parked));
}

#[test]
fn undo_only_remembers_the_last_deletion() {
    let mut ledger = mixed_ledger();
    let a = ledger.transactions()[0].clone();
    let b = ledger.transactions()[1].clone();
    ledger.remove(a.id()).unwrap();
    ledger.remove(b.id()).unwrap();

    let restored = ledger.restore().unwrap();
    assert_eq!(restored, b);
    assert!(ledger.contains(b.id()));
    assert!(!ledger.contains(a.id()));
    assert!(matches!(ledger.restore(), Err(LedgerError::EmptyUndo)));
}
