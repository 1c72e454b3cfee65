//! Demo accounts the app starts with.

use chrono::{DateTime, Utc};
use tally_core::{Account, Transaction};

pub const CHEQUING: &str = "Chequing Account";
pub const CREDIT_CARD: &str = "Credit Card";

/// The two starting accounts, every transaction dated `now`.
pub fn demo_accounts(now: DateTime<Utc>) -> Vec<Account> {
    vec![
        Account::with_transactions(
            CHEQUING,
            vec![
                Transaction::new(now, 500.0, "CIBC Pay"),
                Transaction::new(now, -50.0, "Groceries"),
                Transaction::new(now, -100.0, "Electricity Bill"),
            ],
        ),
        Account::with_transactions(
            CREDIT_CARD,
            vec![
                Transaction::new(now, 20.0, "Cinema"),
                Transaction::new(now, 30.0, "Fuel"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Breakdown, KeywordTable};
    use tally_core::ExpenseCategory;

    #[test]
    fn test_demo_balances() {
        let accounts = demo_accounts(Utc::now());
        assert_eq!(accounts[0].name(), CHEQUING);
        assert_eq!(accounts[0].balance(), 350.0);
        assert_eq!(accounts[1].name(), CREDIT_CARD);
        assert_eq!(accounts[1].balance(), 50.0);
    }

    #[test]
    fn test_demo_chequing_breakdown() {
        let now = Utc::now();
        let accounts = demo_accounts(now);
        let b = Breakdown::for_account(&accounts[0], &KeywordTable::default(), &now, &Utc);
        assert_eq!(b.get(ExpenseCategory::Income), Some(500.0));
        assert_eq!(b.get(ExpenseCategory::Food), Some(-50.0));
        assert_eq!(b.get(ExpenseCategory::Utilities), Some(-100.0));
        assert_eq!(b.get(ExpenseCategory::Other), None);
    }
}
