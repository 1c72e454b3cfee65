use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::America::Toronto;
use std::path::PathBuf;
use tally_core::{Account, ExpenseCategory, filter_current_month};
use tally_finance::{Breakdown, KeywordTable, import_into, parse_transactions_csv};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("transactions.csv")
}

fn feb(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, day, 12, 0, 0).unwrap()
}

fn imported(tz: &chrono_tz::Tz) -> Account {
    let mut account = Account::new("Imported");
    import_into(&mut account, fixture_path(), tz).unwrap();
    account
}

#[test]
fn test_fixture_parses_good_rows_only() {
    let txns = parse_transactions_csv(fixture_path(), &Utc).unwrap();
    assert_eq!(txns.len(), 14);
    assert!(txns.iter().all(|t| t.name() != "Broken row" && t.name() != "Bad amount"));
}

#[test]
fn test_balance_is_sum_after_import() {
    let account = imported(&Toronto);
    let sum: f64 = account.transactions().iter().map(|t| t.amount()).sum();
    assert_eq!(account.balance(), sum);
}

/// Late-January rows are days away from "now" but in another calendar month.
#[test]
fn test_previous_month_rows_excluded_early_in_month() {
    let account = imported(&Toronto);
    let current = filter_current_month(account.transactions(), &feb(2), &Toronto);
    assert_eq!(current.len(), 12);
    assert!(current.iter().all(|t| !t.name().contains("Restaurant")));
    assert!(current.iter().all(|t| !t.name().contains("E-Transfer")));
}

#[test]
fn test_february_breakdown() {
    let account = imported(&Toronto);
    let b = Breakdown::for_account(&account, &KeywordTable::default(), &feb(25), &Toronto);

    let expected = [
        (ExpenseCategory::Entertainment, -20.0),
        (ExpenseCategory::Food, -43.75),
        (ExpenseCategory::Health, -18.25),
        (ExpenseCategory::Housing, -1400.0),
        (ExpenseCategory::Income, 2500.0),
        (ExpenseCategory::Other, -10.0),
        (ExpenseCategory::Shopping, -64.99),
        (ExpenseCategory::Transfers, -300.0),
        (ExpenseCategory::Utilities, -100.0),
    ];
    let bars = b.bars();
    assert_eq!(bars.len(), expected.len());
    for (row, (category, amount)) in bars.iter().zip(expected) {
        assert_eq!(row.category, category);
        assert!((row.amount - amount).abs() < 1e-9, "{category}: {}", row.amount);
    }

    let slices = b.pie_slices();
    assert_eq!(slices.len(), expected.len());
    assert_eq!(slices.last().unwrap().end_angle, 360.0);
    let housing = slices
        .iter()
        .find(|s| s.category == ExpenseCategory::Housing)
        .unwrap();
    assert!((housing.percentage - 100.0 * 1400.0 / b.total_magnitude()).abs() < 1e-9);
}

#[test]
fn test_custom_table_changes_classification() {
    let account = imported(&Toronto);
    let mut table = KeywordTable::default();
    table.extend(ExpenseCategory::Savings, ["tfsa"]).unwrap();

    // transfers is checked after savings, so the TFSA row moves
    let b = Breakdown::for_account(&account, &table, &feb(25), &Toronto);
    assert_eq!(b.get(ExpenseCategory::Savings), Some(-300.0));
    assert_eq!(b.get(ExpenseCategory::Transfers), None);
}

#[test]
fn test_next_month_is_empty() {
    let account = imported(&Toronto);
    let march = Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();
    let b = Breakdown::for_account(&account, &KeywordTable::default(), &march, &Toronto);
    assert!(b.is_empty());
    assert!(b.pie_slices().is_empty());
}
