use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_session;
use crate::error::Result;

pub fn list(categories: Option<PathBuf>) -> Result<()> {
    let session = open_session(categories)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "Count", "Keywords"]);
    for (i, cat) in session.store().categories().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&cat.name),
            Cell::new(cat.keywords.len()),
            Cell::new(cat.keywords.join(", ")),
        ]);
    }
    println!("Categories\n{table}");
    Ok(())
}

pub fn add(name: &str, categories: Option<PathBuf>) -> Result<()> {
    let mut session = open_session(categories)?;
    session.add_category(name)?;
    println!("{}", format!("Added category: {}", name.trim()).green());
    Ok(())
}
