use std::path::PathBuf;

use crate::cli::open_session;
use crate::error::Result;
use crate::settings::settings_path;

pub fn run(categories: Option<PathBuf>) -> Result<()> {
    let session = open_session(categories)?;
    let settings = &session.settings;
    let store = session.store();

    println!("Settings:     {}", settings_path().display());
    println!("Data dir:     {}", settings.data_dir);
    println!("Categories:   {}", store.path().display());
    println!("Date format:  {}", settings.date_format);
    println!("Match mode:   {:?}", settings.match_mode);
    println!("Currency:     {}", settings.currency);

    if store.path().exists() {
        println!();
        println!("Category count: {}", store.len());
        println!("Keyword count:  {}", store.keyword_count());
    } else {
        println!();
        println!("Category file not found. Run `tally init` to set up.");
    }
    Ok(())
}
