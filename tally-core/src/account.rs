//! Accounts: a named, append-only sequence of transactions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::TallyResult;
use crate::transaction::{Transaction, parse_amount};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Account {
    name: String,
    /// Insertion order, not necessarily date order
    transactions: Vec<Transaction>,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transactions: Vec::new(),
        }
    }

    /// Build an account from already-constructed transactions (seed/import).
    pub fn with_transactions(name: impl Into<String>, transactions: Vec<Transaction>) -> Self {
        Self {
            name: name.into(),
            transactions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Sum of all transaction amounts. Recomputed on every call.
    pub fn balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::amount).sum()
    }

    pub fn push(&mut self, txn: Transaction) {
        self.transactions.push(txn);
    }

    /// Add a transaction from user input.
    ///
    /// The amount text must parse as a finite number; otherwise the account
    /// is left untouched and `TallyError::InvalidAmount` is returned.
    pub fn add_transaction(
        &mut self,
        name: impl Into<String>,
        amount_text: &str,
        date: DateTime<Utc>,
    ) -> TallyResult<&Transaction> {
        let amount = parse_amount(amount_text)?;
        let txn = Transaction::new(date, amount, name);
        tracing::info!(
            account = %self.name,
            id = %txn.id(),
            amount,
            "added transaction"
        );
        self.transactions.push(txn);
        Ok(&self.transactions[self.transactions.len() - 1])
    }
}

/// Find an account by name, ignoring ASCII case.
pub fn find_account<'a>(accounts: &'a [Account], name: &str) -> Option<&'a Account> {
    accounts.iter().find(|a| a.name.eq_ignore_ascii_case(name))
}

pub fn find_account_mut<'a>(accounts: &'a mut [Account], name: &str) -> Option<&'a mut Account> {
    accounts.iter_mut().find(|a| a.name.eq_ignore_ascii_case(name))
}
