use std::path::PathBuf;

use colored::Colorize;

use crate::cli::open_session;
use crate::error::{Result, TallyError};
use crate::store::KeywordOutcome;

pub fn add(category: &str, keyword: &str, categories: Option<PathBuf>) -> Result<()> {
    let mut session = open_session(categories)?;
    let outcome = session.add_keyword(category, keyword)?;
    let message = outcome.describe(category);
    match outcome {
        KeywordOutcome::Added(_) => {
            println!("{}", message.green());
            let count = session.store().keywords(category).map_or(0, |k| k.len());
            println!("'{category}' now has {count} keyword(s)");
        }
        KeywordOutcome::UnknownCategory => {
            return Err(TallyError::UnknownCategory(category.to_string()))
        }
        _ => println!("{}", message.yellow()),
    }
    Ok(())
}
