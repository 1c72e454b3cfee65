//! Deterministic keyword rules mapping transaction names to expense categories.
//!
//! The table is an ordered list of `(category, keywords)` rules. A name is
//! lowercased and the first rule with a keyword contained anywhere in it wins;
//! nothing matched means `Other`. Overlapping keywords are resolved purely by
//! rule order, so order is part of the data.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tally_core::{ExpenseCategory, ExpenseClassification, TallyError, TallyResult, Transaction};

/// One row of the keyword table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordRule {
    pub category: ExpenseCategory,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new<I, S>(category: ExpenseCategory, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    fn matches(&self, normalized_name: &str) -> bool {
        self.keywords.iter().any(|k| normalized_name.contains(k.as_str()))
    }
}

/// Default rules, checked top to bottom.
///
/// "bonds" is listed under both investments and savings, and "deposit"
/// (transfers) is a prefix of "deposits" (savings); the earlier rule wins.
const DEFAULT_RULES: &[(ExpenseCategory, &[&str])] = &[
    (
        ExpenseCategory::Food,
        &[
            "grocery", "restaurant", "food", "snack", "meal", "café", "takeout", "groceries",
            "kibo", "boba", "the alley", "mcdonald's",
        ],
    ),
    (
        ExpenseCategory::Entertainment,
        &["movie", "concert", "theater", "sports", "amusement", "cinema"],
    ),
    (
        ExpenseCategory::Health,
        &["doctor", "pharmacy", "health", "medicine", "hospital", "clinic"],
    ),
    (ExpenseCategory::Housing, &["rent", "mortgage"]),
    (
        ExpenseCategory::Income,
        &["salary", "income", "wages", "bonus", "pay", "net pay"],
    ),
    (
        ExpenseCategory::Investments,
        &["stocks", "investment", "bonds", "mutual funds"],
    ),
    (
        ExpenseCategory::Savings,
        &["savings", "deposits", "interest", "bonds", "mutual"],
    ),
    (
        ExpenseCategory::Shopping,
        &["shopping", "retail", "online", "marketplace"],
    ),
    (
        ExpenseCategory::Transfers,
        &["transfer", "send", "deposit", "withdrawal", "e-transfer"],
    ),
    (ExpenseCategory::Utilities, &["electricity", "water", "bill"]),
];

static DEFAULT_TABLE: LazyLock<KeywordTable> = LazyLock::new(KeywordTable::default);

/// Ordered, validated keyword table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KeywordRule>", into = "Vec<KeywordRule>")]
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
}

impl KeywordTable {
    /// Build a table, lowercasing keywords.
    ///
    /// Rejects rules targeting `Other`, empty keywords, and a category
    /// appearing in more than one rule.
    pub fn new(rules: Vec<KeywordRule>) -> TallyResult<Self> {
        let mut table = Self { rules: Vec::with_capacity(rules.len()) };
        for rule in rules {
            if table.position(rule.category).is_some() {
                return Err(TallyError::Config(format!(
                    "category '{}' has more than one rule",
                    rule.category
                )));
            }
            let keywords = normalize_keywords(rule.category, rule.keywords)?;
            table.rules.push(KeywordRule {
                category: rule.category,
                keywords,
            });
        }
        Ok(table)
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Append keywords to a category's rule, or add a new rule at the end
    /// of the table when the category has none yet.
    pub fn extend<I, S>(&mut self, category: ExpenseCategory, keywords: I) -> TallyResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords =
            normalize_keywords(category, keywords.into_iter().map(Into::into).collect())?;

        match self.position(category) {
            Some(i) => {
                let rule = &mut self.rules[i];
                for k in keywords {
                    if !rule.keywords.contains(&k) {
                        rule.keywords.push(k);
                    }
                }
            }
            None => self.rules.push(KeywordRule { category, keywords }),
        }
        Ok(())
    }

    /// Classify a raw name.
    pub fn classify_name(&self, name: &str) -> ExpenseCategory {
        let normalized = name.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.matches(&normalized))
            .map(|r| r.category)
            .unwrap_or(ExpenseCategory::Other)
    }

    pub fn classify(&self, txn: &Transaction) -> ExpenseCategory {
        self.classify_name(txn.name())
    }

    /// Pair each transaction with its category, keeping input order.
    pub fn classify_all<'a, I>(&self, txns: I) -> Vec<ExpenseClassification<'a>>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let out: Vec<_> = txns
            .into_iter()
            .map(|t| ExpenseClassification::new(t, self.classify(t)))
            .collect();
        tracing::debug!(count = out.len(), rules = self.rules.len(), "classified transactions");
        out
    }

    fn position(&self, category: ExpenseCategory) -> Option<usize> {
        self.rules.iter().position(|r| r.category == category)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(category, keywords)| KeywordRule::new(*category, keywords.iter().copied()))
                .collect(),
        }
    }
}

impl TryFrom<Vec<KeywordRule>> for KeywordTable {
    type Error = TallyError;

    fn try_from(rules: Vec<KeywordRule>) -> Result<Self, Self::Error> {
        Self::new(rules)
    }
}

impl From<KeywordTable> for Vec<KeywordRule> {
    fn from(table: KeywordTable) -> Self {
        table.rules
    }
}

fn normalize_keywords(category: ExpenseCategory, keywords: Vec<String>) -> TallyResult<Vec<String>> {
    if category.is_fallback() {
        return Err(TallyError::Config(
            "'other' is the fallback and cannot have keywords".to_string(),
        ));
    }
    keywords
        .into_iter()
        .map(|k| {
            let k = k.trim().to_lowercase();
            if k.is_empty() {
                Err(TallyError::Config(format!(
                    "empty keyword in '{category}' rule"
                )))
            } else {
                Ok(k)
            }
        })
        .collect()
}

/// Classify with the built-in table.
pub fn classify(txn: &Transaction) -> ExpenseCategory {
    DEFAULT_TABLE.classify(txn)
}
