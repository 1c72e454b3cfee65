//! Import transactions from a simple CSV export.
//!
//! Expected layout, header required:
//! date,name,amount
//! 2026-02-03,Groceries,-50.00
//!
//! `date` is either `YYYY-MM-DD` (local midnight) or RFC 3339.

use chrono::TimeZone;
use std::io::Read;
use std::path::Path;
use tally_core::{Account, TallyError, TallyResult, Transaction, parse_amount, parse_date};

/// Parse a CSV file into new transactions. Rows that fail to parse are
/// skipped with a warning.
pub fn parse_transactions_csv<Z: TimeZone>(path: impl AsRef<Path>, tz: &Z) -> TallyResult<Vec<Transaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| TallyError::Import(format!("opening {}: {e}", path.display())))?;
    parse_transactions_reader(file, tz)
}

pub fn parse_transactions_reader<R: Read, Z: TimeZone>(reader: R, tz: &Z) -> TallyResult<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| TallyError::Import(format!("missing '{name}' column")))
    };
    let date_col = column("date")?;
    let name_col = column("name")?;
    let amount_col = column("amount")?;

    let mut txns = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // header is line 1
        let line = i + 2;

        let date_str = record.get(date_col).unwrap_or("");
        if date_str.is_empty() {
            continue;
        }

        let date = match parse_date(date_str, tz) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping row with bad date");
                continue;
            }
        };

        let amount = match parse_amount(record.get(amount_col).unwrap_or("")) {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping row with bad amount");
                continue;
            }
        };

        txns.push(Transaction::new(date, amount, record.get(name_col).unwrap_or("")));
    }

    tracing::info!(count = txns.len(), "imported transactions");
    Ok(txns)
}

/// Append every transaction from a CSV file to `account`, returning how many
/// were added. On error nothing is appended.
pub fn import_into<Z: TimeZone>(account: &mut Account, path: impl AsRef<Path>, tz: &Z) -> TallyResult<usize> {
    let txns = parse_transactions_csv(path, tz)?;
    let count = txns.len();
    for t in txns {
        account.push(t);
    }
    Ok(count)
}
