use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::categorizer::summarize;
use crate::cli::open_session;
use crate::cli::review::print_summary;
use crate::error::{Result, TallyError};
use crate::importer::load_file;
use crate::reviewer::align_edits;

pub fn run(file: &Path, edited: &Path, categories: Option<PathBuf>) -> Result<()> {
    let mut session = open_session(categories)?;
    let edited_rows = load_file(edited, &session.settings.date_format)?;
    // Spreadsheets re-sort and filter; line rows up with the statement first.
    let edited_rows = align_edits(session.upload(file)?, &edited_rows)?;

    // Same guard as a dropdown: only names the store knows are accepted.
    if let Some(unknown) = edited_rows
        .iter()
        .find(|t| !session.store().contains(&t.category))
    {
        return Err(TallyError::UnknownCategory(unknown.category.clone()));
    }

    let summary = session.save_edits(&edited_rows)?;
    if summary.changes.is_empty() {
        println!("No changes.");
        return Ok(());
    }
    print_summary(&summary);
    println!(
        "{}",
        format!(
            "Changes saved successfully! {} change(s), {} new keyword(s)",
            summary.changes.len(),
            summary.keywords_added()
        )
        .green()
    );
    let skipped = summary.warnings().count();
    if skipped > 0 {
        println!("{}", format!("{skipped} description(s) not learned").yellow());
    }

    session.recategorize();
    if let Some(table) = session.table() {
        let result = summarize(table);
        println!(
            "With current keywords: {} categorized, {} uncategorized",
            result.categorized, result.uncategorized
        );
    }
    Ok(())
}
