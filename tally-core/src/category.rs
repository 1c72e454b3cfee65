//! Expense categories and the classification pairing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TallyError;
use crate::transaction::Transaction;

/// The closed set of expense buckets.
///
/// Variants are declared in canonical-name order so the derived `Ord`
/// matches sorting by `as_str()`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Entertainment,
    Food,
    Health,
    Housing,
    Income,
    Investments,
    Other,
    Savings,
    Shopping,
    Transfers,
    Utilities,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 11] = [
        ExpenseCategory::Entertainment,
        ExpenseCategory::Food,
        ExpenseCategory::Health,
        ExpenseCategory::Housing,
        ExpenseCategory::Income,
        ExpenseCategory::Investments,
        ExpenseCategory::Other,
        ExpenseCategory::Savings,
        ExpenseCategory::Shopping,
        ExpenseCategory::Transfers,
        ExpenseCategory::Utilities,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Food => "food",
            ExpenseCategory::Health => "health",
            ExpenseCategory::Housing => "housing",
            ExpenseCategory::Income => "income",
            ExpenseCategory::Investments => "investments",
            ExpenseCategory::Other => "other",
            ExpenseCategory::Savings => "savings",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Transfers => "transfers",
            ExpenseCategory::Utilities => "utilities",
        }
    }

    /// Capitalized label for chart axes and list rows
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Health => "Health",
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Income => "Income",
            ExpenseCategory::Investments => "Investments",
            ExpenseCategory::Other => "Other",
            ExpenseCategory::Savings => "Savings",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Transfers => "Transfers",
            ExpenseCategory::Utilities => "Utilities",
        }
    }

    /// True for the catch-all bucket that no keyword rule may target.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ExpenseCategory::Other)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| TallyError::Config(format!("unknown category: {s}")))
    }
}

/// A transaction paired with the category it was assigned.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ExpenseClassification<'a> {
    pub transaction: &'a Transaction,
    pub category: ExpenseCategory,
}

impl<'a> ExpenseClassification<'a> {
    pub fn new(transaction: &'a Transaction, category: ExpenseCategory) -> Self {
        Self {
            transaction,
            category,
        }
    }

    pub fn amount(&self) -> f64 {
        self.transaction.amount()
    }
}
