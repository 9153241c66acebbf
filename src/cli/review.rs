use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, Table};
use dialoguer::{Confirm, Input};

use crate::cli::open_session;
use crate::error::Result;
use crate::fmt::{date, money};
use crate::reviewer::{pending_rows, ReviewSummary};
use crate::session::Session;

fn category_table(names: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Name"]);
    for (i, name) in names.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(name)]);
    }
    table
}

fn category_names(session: &Session) -> Vec<String> {
    session.store().names().into_iter().map(String::from).collect()
}

pub(crate) fn print_summary(summary: &ReviewSummary) {
    for change in &summary.changes {
        let line = format!(
            "Row {}: '{}': {} \u{2192} {}",
            change.row + 1,
            change.description,
            change.from,
            change.to
        );
        println!("{line}");
        let note = format!("  {}", change.keyword.describe(&change.to));
        if change.keyword.is_added() {
            println!("{}", note.green());
        } else {
            println!("{}", note.yellow());
        }
    }
}

pub fn run(file: &Path, all: bool, categories: Option<PathBuf>) -> Result<()> {
    let mut session = open_session(categories)?;
    let unit = session.settings.currency.clone();
    let rows = session.upload(file)?.to_vec();

    let queue: Vec<usize> = if all {
        (0..rows.len()).collect()
    } else {
        pending_rows(&rows)
    };
    if queue.is_empty() {
        println!("{}", "No uncategorized transactions to review.".green());
        return Ok(());
    }

    let mut names = category_names(&session);
    println!("\n{} transactions to review\n", queue.len());
    println!("Categories\n{}\n", category_table(&names));

    let mut edited = rows.clone();
    for idx in queue {
        let txn = &rows[idx];
        println!("{}", "\u{2500}".repeat(60));
        println!("  Date:        {}", date(txn.date));
        println!("  Description: {}", txn.description);
        if txn.is_credit() {
            println!("  Credit:      {}", money(txn.credit, &unit).green());
        } else {
            println!("  Debit:       {}", money(txn.debit, &unit).red());
        }
        println!("  Category:    {}", edited[idx].category);
        println!();

        let choice: String = Input::new()
            .with_prompt("Category # (n=new, s=skip, q=quit)")
            .interact_text()
            .unwrap_or_else(|_| "q".to_string());
        let choice = choice.trim().to_lowercase();

        if choice == "q" {
            println!("{}", "Review paused.".yellow());
            break;
        }
        if choice == "s" {
            continue;
        }
        if choice == "n" {
            let name: String = Input::new()
                .with_prompt("New category name")
                .interact_text()
                .unwrap_or_default();
            if let Err(e) = session.add_category(&name) {
                println!("{}", e.to_string().red());
                continue;
            }
            names = category_names(&session);
            edited[idx].category = name.trim().to_string();
            println!("{}", format!("\u{2192} Created and assigned {}", name.trim()).green());
            continue;
        }

        match choice.parse::<usize>() {
            Ok(n) if n >= 1 && n <= names.len() => {
                edited[idx].category = names[n - 1].clone();
                println!("{}", format!("\u{2192} {}", names[n - 1]).green());
            }
            _ => println!("{}", "Invalid choice, skipping.".red()),
        }
        println!();
    }

    let changed = rows
        .iter()
        .zip(&edited)
        .filter(|(a, b)| a.category != b.category)
        .count();
    if changed == 0 {
        println!("No changes.");
        return Ok(());
    }

    let save = Confirm::new()
        .with_prompt(format!("Save {changed} change(s)?"))
        .default(true)
        .interact()
        .unwrap_or(false);
    if !save {
        println!("{}", "Changes discarded.".yellow());
        return Ok(());
    }

    let summary = session.save_edits(&edited)?;
    print_summary(&summary);
    println!("{}", "Changes saved successfully!".green());
    Ok(())
}
