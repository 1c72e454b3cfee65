//! Aggregator: groups classified transactions by category and derives the
//! bar/list rows and pie slices used by the expense chart.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tally_core::{Account, ExpenseCategory, ExpenseClassification, filter_current_month};

use crate::keyword_rules::KeywordTable;

const FULL_CIRCLE: f64 = 360.0;

/// Net amount for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: f64,
}

/// One pie wedge, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PieSlice {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub percentage: f64,
}

impl PieSlice {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Everything the chart view needs, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub bars: Vec<CategoryTotal>,
    pub slices: Vec<PieSlice>,
    pub total_magnitude: f64,
}

/// Per-category totals for one set of classifications.
///
/// Categories whose amounts net to exactly zero are dropped. Iteration is in
/// canonical category-name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Breakdown {
    totals: BTreeMap<ExpenseCategory, f64>,
}

impl Breakdown {
    /// Group and sum.
    ///
    /// Each category is summed with `net_sum`, so the result depends only on
    /// the multiset of inputs, not their order.
    pub fn from_classifications(classifications: &[ExpenseClassification<'_>]) -> Self {
        let mut grouped: BTreeMap<ExpenseCategory, Vec<f64>> = BTreeMap::new();
        for c in classifications {
            grouped.entry(c.category).or_default().push(c.amount());
        }

        let totals: BTreeMap<ExpenseCategory, f64> = grouped
            .into_iter()
            .map(|(category, amounts)| (category, net_sum(amounts)))
            .filter(|(_, total)| *total != 0.0)
            .collect();

        tracing::debug!(
            inputs = classifications.len(),
            categories = totals.len(),
            "aggregated classifications"
        );
        Self { totals }
    }

    /// Month-filter, classify and aggregate one account.
    pub fn for_account<Z: TimeZone>(
        account: &Account,
        table: &KeywordTable,
        now: &DateTime<Utc>,
        tz: &Z,
    ) -> Self {
        let current = filter_current_month(account.transactions(), now, tz);
        let classifications = table.classify_all(current);
        Self::from_classifications(&classifications)
    }

    pub fn totals(&self) -> &BTreeMap<ExpenseCategory, f64> {
        &self.totals
    }

    pub fn get(&self, category: ExpenseCategory) -> Option<f64> {
        self.totals.get(&category).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Rows for the bar chart and list, sorted by category name.
    pub fn bars(&self) -> Vec<CategoryTotal> {
        self.totals
            .iter()
            .map(|(&category, &amount)| CategoryTotal { category, amount })
            .collect()
    }

    /// Sum of absolute category totals.
    pub fn total_magnitude(&self) -> f64 {
        self.totals.values().map(|v| v.abs()).sum()
    }

    /// Contiguous pie slices starting at 0°, in category-name order.
    ///
    /// Returns nothing when the total magnitude is zero, or when it
    /// overflows `f64` and no finite share can be computed.
    pub fn pie_slices(&self) -> Vec<PieSlice> {
        let total = self.total_magnitude();
        if total == 0.0 {
            return Vec::new();
        }
        if !total.is_finite() {
            tracing::warn!(total, "category magnitudes overflow, no pie slices");
            return Vec::new();
        }

        let last = self.totals.len() - 1;
        let mut start = 0.0;
        self.totals
            .iter()
            .enumerate()
            .map(|(i, (&category, &amount))| {
                let share = amount.abs() / total;
                // pin the final edge so the wedges close the circle
                let end = if i == last {
                    FULL_CIRCLE
                } else {
                    start + FULL_CIRCLE * share
                };
                let slice = PieSlice {
                    category,
                    amount,
                    start_angle: start,
                    end_angle: end,
                    percentage: 100.0 * share,
                };
                start = end;
                slice
            })
            .collect()
    }

    pub fn chart(&self) -> Chart {
        Chart {
            bars: self.bars(),
            slices: self.pie_slices(),
            total_magnitude: self.total_magnitude(),
        }
    }
}

/// Order-independent sum of one category's amounts.
///
/// Positives are taken largest first and negatives most-negative first,
/// always adding the sign that pulls the running total back toward zero, so
/// the intermediate total never exceeds the largest input in magnitude.
/// A Neumaier compensation term recovers the low bits lost on the way.
fn net_sum(amounts: Vec<f64>) -> f64 {
    let (mut pos, mut neg): (Vec<f64>, Vec<f64>) =
        amounts.into_iter().filter(|a| *a != 0.0).partition(|a| *a > 0.0);
    pos.sort_by(|a, b| b.total_cmp(a));
    neg.sort_by(f64::total_cmp);

    let (mut pos, mut neg) = (pos.into_iter().peekable(), neg.into_iter().peekable());
    let mut sum = 0.0_f64;
    let mut comp = 0.0_f64;
    loop {
        let next = match (pos.peek(), neg.peek()) {
            (Some(_), Some(_)) if sum >= 0.0 => neg.next(),
            (Some(_), _) => pos.next(),
            (None, Some(_)) => neg.next(),
            (None, None) => break,
        };
        let Some(x) = next else { break };

        let t = sum + x;
        if !t.is_finite() {
            // true net is out of range
            return t;
        }
        if sum.abs() >= x.abs() {
            comp += (sum - t) + x;
        } else {
            comp += (x - t) + sum;
        }
        sum = t;
    }
    sum + comp
}
