//! Persistent category → keyword dictionary.
//!
//! The file is a single JSON object whose key order is the matching
//! precedence, so it is read and written through an order-preserving map.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Result, TallyError};
use crate::models::{Category, UNCATEGORIZED};

/// Result of [`CategoryStore::add_keyword`]. Only `Added` changes the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordOutcome {
    Added(String),
    Duplicate(String),
    UnknownCategory,
    Reserved,
    Blank,
}

impl KeywordOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }

    pub fn describe(&self, category: &str) -> String {
        match self {
            Self::Added(k) => format!("Keyword '{k}' added to category '{category}'"),
            Self::Duplicate(k) => format!("Keyword '{k}' already exists in category '{category}'"),
            Self::UnknownCategory => {
                format!("Category '{category}' does not exist. Please create it first.")
            }
            Self::Reserved => format!("Category '{category}' cannot hold keywords"),
            Self::Blank => "Keyword is empty".to_string(),
        }
    }
}

pub fn normalize_keyword(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct CategoryStore {
    path: PathBuf,
    categories: Vec<Category>,
}

impl CategoryStore {
    /// Fresh store holding only the reserved category. Nothing is written
    /// until the first mutation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            categories: vec![Category::new(UNCATEGORIZED)],
        }
    }

    /// Read the category file, or start empty when it does not exist yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            log::info!("no category file at {}, starting fresh", path.display());
            return Ok(Self::new(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let raw: Map<String, Value> =
            serde_json::from_str(&content).map_err(|source| TallyError::Store {
                path: path.clone(),
                source,
            })?;

        let mut categories = Vec::with_capacity(raw.len() + 1);
        for (name, value) in raw {
            let listed: Vec<String> =
                serde_json::from_value(value).map_err(|source| TallyError::Store {
                    path: path.clone(),
                    source,
                })?;
            let mut category = Category::new(name);
            for keyword in listed.iter().map(|k| normalize_keyword(k)) {
                if !keyword.is_empty() && !category.keywords.contains(&keyword) {
                    category.keywords.push(keyword);
                }
            }
            categories.push(category);
        }

        match categories.iter().position(|c| c.is_reserved()) {
            Some(idx) => {
                let reserved = &mut categories[idx];
                if !reserved.keywords.is_empty() {
                    log::warn!(
                        "discarding {} keyword(s) stored under '{UNCATEGORIZED}'",
                        reserved.keywords.len()
                    );
                    reserved.keywords.clear();
                }
            }
            None => categories.insert(0, Category::new(UNCATEGORIZED)),
        }

        log::info!("loaded {} categories from {}", categories.len(), path.display());
        Ok(Self { path, categories })
    }

    /// Overwrite the category file with the full map.
    pub fn save(&self) -> Result<()> {
        let mut map = Map::new();
        for category in &self.categories {
            let keywords = category.keywords.iter().cloned().map(Value::String).collect();
            map.insert(category.name.clone(), Value::Array(keywords));
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, format!("{json}\n"))?;
        log::info!("saved {} categories to {}", self.categories.len(), self.path.display());
        Ok(())
    }

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TallyError::EmptyName);
        }
        if self.contains(name) {
            return Err(TallyError::DuplicateCategory(name.to_string()));
        }
        self.categories.push(Category::new(name));
        self.save()
    }

    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> Result<KeywordOutcome> {
        let keyword = normalize_keyword(keyword);
        let Some(target) = self.categories.iter_mut().find(|c| c.name == category) else {
            return Ok(KeywordOutcome::UnknownCategory);
        };
        if target.is_reserved() {
            return Ok(KeywordOutcome::Reserved);
        }
        if keyword.is_empty() {
            return Ok(KeywordOutcome::Blank);
        }
        if target.keywords.contains(&keyword) {
            return Ok(KeywordOutcome::Duplicate(keyword));
        }
        target.keywords.push(keyword.clone());
        self.save()?;
        Ok(KeywordOutcome::Added(keyword))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn keywords(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.keywords.as_slice())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.name == category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }
}
