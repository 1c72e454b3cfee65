//! tally-core: data model, month filter and error types for Tally

pub mod account;
pub mod category;
pub mod error;
pub mod time;
pub mod transaction;

pub use account::{Account, find_account, find_account_mut};
pub use category::{ExpenseCategory, ExpenseClassification};
pub use error::{TallyError, TallyResult};
pub use time::{filter_current_month, in_current_month, local_date_to_utc, parse_date, parse_timezone};
pub use transaction::{Transaction, format_amount, parse_amount};
