//! Transaction records: a single dated, signed money movement with a label.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{TallyError, TallyResult};

/// An immutable transaction. Fields are only readable after construction.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Transaction {
    id: Uuid,
    date: DateTime<Utc>,
    /// Positive = inflow, negative = outflow
    amount: f64,
    name: String,
}

impl Transaction {
    /// Create a transaction with a freshly generated identifier.
    pub fn new(date: DateTime<Utc>, amount: f64, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            name: name.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }
}

/// Parse user-entered amount text into a finite number.
///
/// Surrounding whitespace is ignored. `inf`, `NaN` and anything else that is
/// not a finite decimal is rejected.
pub fn parse_amount(text: &str) -> TallyResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(TallyError::InvalidAmount(text.to_string())),
    }
}

/// Format an amount the way account and chart rows show it, e.g. `$-50.00`.
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}
