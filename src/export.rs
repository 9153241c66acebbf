use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::Transaction;

/// Column names match what the importer reads, so an exported file can be
/// edited and loaded again.
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Txn Date")]
    date: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Debit")]
    debit: String,
    #[serde(rename = "Credit")]
    credit: String,
    #[serde(rename = "Balance")]
    balance: String,
    #[serde(rename = "Category")]
    category: &'a str,
}

pub fn write_transactions<W: Write>(
    writer: W,
    table: &[Transaction],
    date_format: &str,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for txn in table {
        wtr.serialize(ExportRow {
            date: txn
                .date
                .map(|d| d.format(date_format).to_string())
                .unwrap_or_default(),
            description: &txn.description,
            debit: format!("{:.2}", txn.debit),
            credit: format!("{:.2}", txn.credit),
            balance: txn.balance.map(|b| format!("{b:.2}")).unwrap_or_default(),
            category: &txn.category,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_file(path: &Path, table: &[Transaction], date_format: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_transactions(std::io::BufWriter::new(file), table, date_format)?;
    log::info!("exported {} rows to {}", table.len(), path.display());
    Ok(())
}
