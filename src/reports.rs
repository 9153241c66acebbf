use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::models::{Side, Transaction};

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

pub struct Totals {
    pub expenses: f64,
    pub income: f64,
    pub net: f64,
    pub rows: usize,
    pub uncategorized: usize,
}

pub fn totals(table: &[Transaction]) -> Totals {
    let expenses: f64 = table.iter().map(|t| t.debit).sum();
    let income: f64 = table.iter().map(|t| t.credit).sum();
    Totals {
        expenses,
        income,
        net: income - expenses,
        rows: table.len(),
        uncategorized: table.iter().filter(|t| t.is_uncategorized()).count(),
    }
}

// ---------------------------------------------------------------------------
// Category breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
    pub count: usize,
    pub pct: f64,
}

/// Sum one side per category, largest first. Rows with nothing on that side
/// are left out.
pub fn category_breakdown(table: &[Transaction], side: Side) -> Vec<CategoryTotal> {
    let mut grouped: HashMap<&str, (f64, usize)> = HashMap::new();
    for txn in table {
        let amount = side.amount(txn);
        if amount == 0.0 {
            continue;
        }
        let entry = grouped.entry(txn.category.as_str()).or_default();
        entry.0 += amount;
        entry.1 += 1;
    }

    let sum: f64 = grouped.values().map(|(t, _)| t).sum();
    let mut items: Vec<CategoryTotal> = grouped
        .into_iter()
        .map(|(name, (total, count))| CategoryTotal {
            name: name.to_string(),
            total,
            count,
            pct: if sum != 0.0 { total / sum * 100.0 } else { 0.0 },
        })
        .collect();
    items.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    items
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Period {
    Day,
    Month,
}

impl Period {
    fn bucket(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Month => date.with_day(1).unwrap_or(date),
        }
    }

    fn label(&self, start: NaiveDate) -> String {
        match self {
            Self::Day => start.format("%d %b %Y").to_string(),
            Self::Month => start.format("%b %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotal {
    pub label: String,
    pub total: f64,
}

pub struct Timeline {
    pub points: Vec<PeriodTotal>,
    /// Rows with an amount on this side but no parseable date.
    pub undated: usize,
}

pub fn timeline(table: &[Transaction], side: Side, period: Period) -> Timeline {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut undated = 0usize;
    for txn in table {
        let amount = side.amount(txn);
        if amount == 0.0 {
            continue;
        }
        match txn.date {
            Some(date) => *buckets.entry(period.bucket(date)).or_default() += amount,
            None => undated += 1,
        }
    }

    let points = buckets
        .into_iter()
        .map(|(start, total)| PeriodTotal {
            label: period.label(start),
            total,
        })
        .collect();
    Timeline { points, undated }
}
