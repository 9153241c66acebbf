pub mod apply;
pub mod categories;
pub mod categorize;
pub mod init;
pub mod keywords;
pub mod report;
pub mod review;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comfy_table::{Cell, CellAlignment, Table};

use crate::error::Result;
use crate::fmt;
use crate::models::{Side, Transaction};
use crate::reports::Period;
use crate::session::Session;
use crate::settings::load_settings;

pub(crate) fn open_session(categories: Option<PathBuf>) -> Result<Session> {
    Session::open(load_settings(), categories)
}

/// Render rows with one amount column per requested side.
pub(crate) fn transactions_table(rows: &[&Transaction], sides: &[Side], unit: &str) -> Table {
    let mut header = vec!["Txn Date".to_string(), "Description".to_string()];
    header.extend(sides.iter().map(|s| s.label().to_string()));
    header.push("Category".to_string());

    let mut table = Table::new();
    table.set_header(header);
    for txn in rows {
        let mut cells = vec![Cell::new(fmt::date(txn.date)), Cell::new(&txn.description)];
        for side in sides {
            cells.push(
                Cell::new(fmt::money(side.amount(txn), unit)).set_alignment(CellAlignment::Right),
            );
        }
        cells.push(Cell::new(&txn.category));
        table.add_row(cells);
    }
    table
}

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Categorize CSV bank statements by keyword and summarize spending."
)]
pub struct Cli {
    /// Category file to use instead of <data_dir>/categories.json
    #[arg(long = "categories", global = true, env = "TALLY_CATEGORIES")]
    pub categories_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create the category file.
    Init {
        /// Path for tally data (default: ~/Documents/tally)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Show settings and category file summary.
    Status,
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Manage category keywords.
    Keywords {
        #[command(subcommand)]
        command: KeywordsCommands,
    },
    /// Load a statement, categorize it and print the result.
    Categorize {
        /// Statement CSV file
        file: PathBuf,
        /// Write the categorized table to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Show credit rows too
        #[arg(long)]
        all: bool,
    },
    /// Interactively assign categories; each change teaches a new keyword.
    Review {
        /// Statement CSV file
        file: PathBuf,
        /// Review every row, not only uncategorized ones
        #[arg(long)]
        all: bool,
    },
    /// Apply category edits from an exported CSV back to the keyword store.
    Apply {
        /// Original statement CSV file
        file: PathBuf,
        /// Edited copy written by `tally categorize --output`
        edited: PathBuf,
    },
    /// Summaries of a statement.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// List categories in matching order.
    List,
    /// Add a new, empty category.
    Add {
        /// Category name (case-sensitive)
        name: String,
    },
}

#[derive(Subcommand)]
pub enum KeywordsCommands {
    /// Add a keyword to a category.
    Add {
        /// Category name
        category: String,
        /// Keyword; stored trimmed and lowercased
        keyword: String,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Total expenses and the per-category breakdown.
    Expenses {
        /// Statement CSV file
        file: PathBuf,
    },
    /// Total income and credit transactions.
    Income {
        /// Statement CSV file
        file: PathBuf,
    },
    /// Amounts over time as a bar chart.
    Timeline {
        /// Statement CSV file
        file: PathBuf,
        /// Chart credits instead of debits
        #[arg(long)]
        credit: bool,
        /// Bucket size
        #[arg(long, value_enum, default_value = "day")]
        period: Period,
    },
}
