//! tally-finance: keyword classifier, category aggregation, CSV import and demo data

pub mod aggregator;
pub mod csv_import;
pub mod keyword_rules;
pub mod seed;

pub use aggregator::{Breakdown, CategoryTotal, Chart, PieSlice};
pub use csv_import::{import_into, parse_transactions_csv, parse_transactions_reader};
pub use keyword_rules::{KeywordRule, KeywordTable, classify};
pub use seed::demo_accounts;
