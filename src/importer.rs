use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LoadError;
use crate::models::{Transaction, UNCATEGORIZED};

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

static CURRENCY_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)rs\.|inr|[$₹€£,\s]").expect("static pattern"));

fn parse_number(s: &str) -> f64 {
    s.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Parse a currency-formatted cell. Currency symbols, thousands separators
/// and whitespace are ignored; `(12.00)` is negative. Anything else that is
/// not a number (stray text included) is 0.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned = CURRENCY_NOISE.replace_all(raw, "");
    match cleaned.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => -parse_number(inner),
        None => parse_number(&cleaned),
    }
}

/// Like [`parse_amount`], but an empty cell means "no value".
fn parse_optional_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| parse_amount(raw))
}

pub fn parse_date(raw: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), format).ok()
}

/// Split a signed amount into (debit, credit) using the indicator column
/// when it is recognisable, otherwise the sign.
fn split_signed(amount: f64, indicator: &str) -> (f64, f64) {
    match indicator.trim().to_uppercase().as_str() {
        "DR" | "D" | "DEBIT" | "DR." => (amount.abs(), 0.0),
        "CR" | "C" | "CREDIT" | "CR." => (0.0, amount.abs()),
        _ if amount < 0.0 => (amount.abs(), 0.0),
        _ => (0.0, amount),
    }
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

const DATE_COLUMNS: &[&str] = &["txn date", "date", "transaction date", "value date"];
const DESCRIPTION_COLUMNS: &[&str] = &["description", "details", "narration", "particulars"];
const DEBIT_COLUMNS: &[&str] = &["debit", "withdrawal", "withdrawals"];
const CREDIT_COLUMNS: &[&str] = &["credit", "deposit", "deposits"];
const AMOUNT_COLUMNS: &[&str] = &["amount", "transaction amount"];
const INDICATOR_COLUMNS: &[&str] = &["dr/cr", "cr/dr", "type", "debit/credit"];
const BALANCE_COLUMNS: &[&str] = &["balance", "running balance", "running bal."];
const CATEGORY_COLUMNS: &[&str] = &["category"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatementLayout {
    /// Separate non-negative debit and credit columns.
    DebitCredit { debit: usize, credit: usize },
    /// One signed amount, optionally with a DR/CR indicator column.
    SignedAmount {
        amount: usize,
        indicator: Option<usize>,
    },
}

#[derive(Debug)]
struct Columns {
    date: usize,
    description: usize,
    layout: StatementLayout,
    balance: Option<usize>,
    category: Option<usize>,
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        let date = find_column(headers, DATE_COLUMNS);
        let description = find_column(headers, DESCRIPTION_COLUMNS);
        let debit = find_column(headers, DEBIT_COLUMNS);
        let credit = find_column(headers, CREDIT_COLUMNS);
        let amount = find_column(headers, AMOUNT_COLUMNS);

        let mut missing = Vec::new();
        if date.is_none() {
            missing.push("Txn Date".to_string());
        }
        if description.is_none() {
            missing.push("Description".to_string());
        }
        let layout = match (debit, credit, amount) {
            (Some(debit), Some(credit), _) => Some(StatementLayout::DebitCredit { debit, credit }),
            (None, None, Some(amount)) => Some(StatementLayout::SignedAmount {
                amount,
                indicator: find_column(headers, INDICATOR_COLUMNS),
            }),
            (Some(_), None, _) => {
                missing.push("Credit".to_string());
                None
            }
            (None, Some(_), _) => {
                missing.push("Debit".to_string());
                None
            }
            (None, None, None) => {
                missing.push("Debit/Credit or Amount".to_string());
                None
            }
        };

        match (date, description, layout) {
            (Some(date), Some(description), Some(layout)) if missing.is_empty() => Ok(Self {
                date,
                description,
                layout,
                balance: find_column(headers, BALANCE_COLUMNS),
                category: find_column(headers, CATEGORY_COLUMNS),
            }),
            _ => Err(LoadError::MissingColumns(missing)),
        }
    }

    fn to_transaction(&self, record: &StringRecord, date_format: &str) -> Transaction {
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let raw_date = cell(self.date);
        let date = parse_date(raw_date, date_format);
        if date.is_none() && !raw_date.trim().is_empty() {
            log::warn!("unparseable date '{}' (expected {date_format})", raw_date.trim());
        }

        let (debit, credit) = match self.layout {
            StatementLayout::DebitCredit { debit, credit } => {
                (parse_amount(cell(debit)).abs(), parse_amount(cell(credit)).abs())
            }
            StatementLayout::SignedAmount { amount, indicator } => {
                split_signed(parse_amount(cell(amount)), indicator.map(cell).unwrap_or(""))
            }
        };

        let category = self
            .category
            .map(|idx| cell(idx).trim())
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);

        let mut txn = Transaction::new(date, cell(self.description).trim(), debit, credit);
        txn.balance = self.balance.and_then(|idx| parse_optional_amount(cell(idx)));
        txn.category = category.to_string();
        txn
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse a statement into a normalized table. Header names are trimmed and
/// matched case-insensitively. Either the whole table loads or an error is
/// returned.
pub fn load_transactions<R: Read>(
    reader: R,
    date_format: &str,
) -> Result<Vec<Transaction>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader);
    }
    let columns = Columns::resolve(&headers)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows.push(columns.to_transaction(&record, date_format));
    }

    log::info!("loaded {} transactions ({:?})", rows.len(), columns.layout);
    Ok(rows)
}

pub fn load_file(path: &Path, date_format: &str) -> Result<Vec<Transaction>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_transactions(std::io::BufReader::new(file), date_format)
}
