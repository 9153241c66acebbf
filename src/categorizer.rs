use serde::{Deserialize, Serialize};

use crate::models::{Transaction, UNCATEGORIZED};
use crate::store::CategoryStore;

/// How a keyword is compared against a lowercased, trimmed description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Contains,
    Exact,
}

impl MatchMode {
    fn matches(&self, details: &str, keyword: &str) -> bool {
        match self {
            Self::Contains => details.contains(keyword),
            Self::Exact => details == keyword,
        }
    }
}

pub struct CategorizeResult {
    pub categorized: usize,
    pub uncategorized: usize,
}

/// Assign one category per row. Categories are tried in store order and the
/// first one with a matching keyword wins; rows nothing matches fall back to
/// `Uncategorized`. Any category already on a row is discarded first.
pub fn categorize(
    mut table: Vec<Transaction>,
    store: &CategoryStore,
    mode: MatchMode,
) -> Vec<Transaction> {
    let rules: Vec<(&str, Vec<String>)> = store
        .categories()
        .filter(|c| !c.is_reserved() && !c.keywords.is_empty())
        .map(|c| {
            let keywords = c.keywords.iter().map(|k| k.to_lowercase()).collect();
            (c.name.as_str(), keywords)
        })
        .collect();

    for txn in &mut table {
        let details = txn.description.trim().to_lowercase();
        let hit = rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| mode.matches(&details, k)));
        txn.category = match hit {
            Some((name, _)) => {
                log::debug!("'{}' -> {name}", txn.description);
                name.to_string()
            }
            None => UNCATEGORIZED.to_string(),
        };
    }
    table
}

pub fn summarize(table: &[Transaction]) -> CategorizeResult {
    let uncategorized = table.iter().filter(|t| t.is_uncategorized()).count();
    CategorizeResult {
        categorized: table.len() - uncategorized,
        uncategorized,
    }
}
