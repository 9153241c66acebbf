use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};
use crate::store::CategoryStore;

pub fn run(data_dir: Option<String>, categories: Option<PathBuf>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;

    let store = CategoryStore::load(categories.unwrap_or_else(|| settings.categories_path()))?;
    if !store.path().exists() {
        store.save()?;
    }

    println!("Initialized tally at {}", resolved.display());
    println!("Settings:   {}", settings_path().display());
    println!("Categories: {}", store.path().display());
    Ok(())
}
