use std::path::{Path, PathBuf};

use crate::categorizer::summarize;
use crate::cli::{open_session, transactions_table};
use crate::error::Result;
use crate::export::export_file;
use crate::models::{Side, Transaction};

pub fn run(
    file: &Path,
    output: Option<&Path>,
    all: bool,
    categories: Option<PathBuf>,
) -> Result<()> {
    let mut session = open_session(categories)?;
    let unit = session.settings.currency.clone();
    let date_format = session.settings.date_format.clone();
    let rows = session.upload(file)?;

    let (shown, sides): (Vec<&Transaction>, &[Side]) = if all {
        (rows.iter().collect(), &[Side::Debit, Side::Credit][..])
    } else {
        (rows.iter().filter(|t| t.is_debit()).collect(), &[Side::Debit][..])
    };
    println!("Transactions\n{}", transactions_table(&shown, sides, &unit));

    let result = summarize(rows);
    println!(
        "{} categorized, {} uncategorized",
        result.categorized, result.uncategorized
    );

    if let Some(path) = output {
        export_file(path, rows, &date_format)?;
        println!("Wrote {} rows to {}", rows.len(), path.display());
    }
    Ok(())
}
