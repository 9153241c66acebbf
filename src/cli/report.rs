use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::cli::{open_session, transactions_table};
use crate::error::Result;
use crate::fmt::{bar, money};
use crate::models::{Side, Transaction};
use crate::reports::{self, Period};

const BAR_WIDTH: usize = 30;

fn breakdown_table(items: &[reports::CategoryTotal], side: Side, unit: &str) -> Table {
    let max = items.first().map(|i| i.total).unwrap_or(0.0);
    let mut table = Table::new();
    table.set_header(vec!["Category", side.label(), "%", "Count", ""]);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.name),
            Cell::new(money(item.total, unit)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", item.pct)).set_alignment(CellAlignment::Right),
            Cell::new(item.count),
            Cell::new(bar(item.total, max, BAR_WIDTH)),
        ]);
    }
    table
}

pub fn expenses(file: &Path, categories: Option<PathBuf>) -> Result<()> {
    let mut session = open_session(categories)?;
    let unit = session.settings.currency.clone();
    let rows = session.upload(file)?;

    let totals = reports::totals(rows);
    println!(
        "{} {}",
        "Total Expenses:".red().bold(),
        money(totals.expenses, &unit)
    );
    println!(
        "{} of {} transactions uncategorized\n",
        totals.uncategorized, totals.rows
    );

    let items = reports::category_breakdown(rows, Side::Debit);
    println!("Expenses by Category\n{}", breakdown_table(&items, Side::Debit, &unit));
    Ok(())
}

pub fn income(file: &Path, categories: Option<PathBuf>) -> Result<()> {
    let mut session = open_session(categories)?;
    let unit = session.settings.currency.clone();
    let rows = session.upload(file)?;

    let totals = reports::totals(rows);
    println!(
        "{} {}",
        "Total Income:".green().bold(),
        money(totals.income, &unit)
    );
    println!("{} {}\n", "Net:".bold(), money(totals.net, &unit));

    let credits: Vec<&Transaction> = rows.iter().filter(|t| t.is_credit()).collect();
    println!(
        "Credit Transactions\n{}",
        transactions_table(&credits, &[Side::Credit], &unit)
    );

    let items = reports::category_breakdown(rows, Side::Credit);
    if !items.is_empty() {
        println!("\nIncome by Category\n{}", breakdown_table(&items, Side::Credit, &unit));
    }
    Ok(())
}

pub fn timeline(
    file: &Path,
    credit: bool,
    period: Period,
    categories: Option<PathBuf>,
) -> Result<()> {
    let mut session = open_session(categories)?;
    let unit = session.settings.currency.clone();
    let rows = session.upload(file)?;

    let side = if credit { Side::Credit } else { Side::Debit };
    let series = reports::timeline(rows, side, period);
    let max = series.points.iter().map(|p| p.total).fold(0.0, f64::max);

    let mut table = Table::new();
    table.set_header(vec!["Period", side.label(), ""]);
    for point in &series.points {
        table.add_row(vec![
            Cell::new(&point.label),
            Cell::new(money(point.total, &unit)).set_alignment(CellAlignment::Right),
            Cell::new(bar(point.total, max, BAR_WIDTH)),
        ]);
    }
    println!("{} Transactions Over Time\n{table}", side.label());

    if series.undated > 0 {
        println!(
            "{}",
            format!("{} row(s) without a readable date not shown", series.undated).yellow()
        );
    }
    Ok(())
}
