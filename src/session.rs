use std::io::Read;
use std::path::{Path, PathBuf};

use crate::categorizer::categorize;
use crate::error::{Result, TallyError};
use crate::importer::{load_file, load_transactions};
use crate::models::Transaction;
use crate::reviewer::{apply_edits, ReviewSummary};
use crate::settings::Settings;
use crate::store::{CategoryStore, KeywordOutcome};

/// Everything one user action works on: settings, the category store and
/// the statement currently loaded, if any.
pub struct Session {
    pub settings: Settings,
    store: CategoryStore,
    table: Option<Vec<Transaction>>,
}

impl Session {
    /// Load the category store named by `categories`, or by the settings.
    pub fn open(settings: Settings, categories: Option<PathBuf>) -> Result<Self> {
        let path = categories.unwrap_or_else(|| settings.categories_path());
        let store = CategoryStore::load(path)?;
        Ok(Self::with_store(settings, store))
    }

    pub fn with_store(settings: Settings, store: CategoryStore) -> Self {
        Self {
            settings,
            store,
            table: None,
        }
    }

    /// Replace the current table with a freshly categorized statement. On
    /// failure no table is kept. `-` reads the statement from stdin.
    pub fn upload(&mut self, path: &Path) -> Result<&[Transaction]> {
        if path == Path::new("-") {
            return self.upload_reader(std::io::stdin().lock());
        }
        self.table = None;
        let rows = load_file(path, &self.settings.date_format)?;
        Ok(self.install(rows))
    }

    pub fn upload_reader<R: Read>(&mut self, reader: R) -> Result<&[Transaction]> {
        self.table = None;
        let rows = load_transactions(reader, &self.settings.date_format)?;
        Ok(self.install(rows))
    }

    fn install(&mut self, rows: Vec<Transaction>) -> &[Transaction] {
        let rows = categorize(rows, &self.store, self.settings.match_mode);
        self.table.insert(rows).as_slice()
    }

    pub fn recategorize(&mut self) {
        if let Some(rows) = self.table.take() {
            self.table = Some(categorize(rows, &self.store, self.settings.match_mode));
        }
    }

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        self.store.add_category(name)
    }

    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> Result<KeywordOutcome> {
        self.store.add_keyword(category, keyword)
    }

    /// Reconcile an edited copy of the current table.
    pub fn save_edits(&mut self, edited: &[Transaction]) -> Result<ReviewSummary> {
        let table = self
            .table
            .as_mut()
            .ok_or_else(|| TallyError::Other("No statement loaded".to_string()))?;
        apply_edits(&mut self.store, table, edited)
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    pub fn table(&self) -> Option<&[Transaction]> {
        self.table.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNCATEGORIZED;

    const STATEMENT: &str = "Txn Date,Description,Debit,Credit,Balance\n\
        05 Jan 2024,WALMART #123,\"$1,234.56\",,100\n\
        06 Jan 2024,Pizza Palace,20.00,,80\n\
        07 Jan 2024,Unknown Shop,5.00,,75\n";

    fn session(dir: &tempfile::TempDir) -> Session {
        let settings = Settings {
            data_dir: dir.path().to_string_lossy().to_string(),
            ..Settings::default()
        };
        let mut session = Session::open(settings, None).unwrap();
        session.add_category("Groceries").unwrap();
        session.add_category("Dining").unwrap();
        session.add_keyword("Groceries", "walmart").unwrap();
        session
    }

    #[test]
    fn test_upload_categorizes() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        let rows = s.upload_reader(STATEMENT.as_bytes()).unwrap();
        let cats: Vec<&str> = rows.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(cats, vec!["Groceries", UNCATEGORIZED, UNCATEGORIZED]);
    }

    #[test]
    fn test_failed_upload_discards_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        s.upload_reader(STATEMENT.as_bytes()).unwrap();
        assert!(s.upload_reader("just,some,words\n".as_bytes()).is_err());
        assert!(s.table().is_none());
        assert!(s.upload(&dir.path().join("missing.csv")).is_err());
        assert!(s.table().is_none());
    }

    #[test]
    fn test_save_edits_then_recategorize_uses_new_keyword() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        let mut edited = s.upload_reader(STATEMENT.as_bytes()).unwrap().to_vec();
        edited[1].category = "Dining".to_string();

        let summary = s.save_edits(&edited).unwrap();
        assert_eq!(summary.keywords_added(), 1);
        assert_eq!(s.store().keywords("Dining").unwrap(), ["pizza palace"]);

        s.recategorize();
        let cats: Vec<&str> = s
            .table()
            .unwrap()
            .iter()
            .map(|t| t.category.as_str())
            .collect();
        assert_eq!(cats, vec!["Groceries", "Dining", UNCATEGORIZED]);

        let reopened = Session::open(s.settings.clone(), None).unwrap();
        assert_eq!(reopened.store().keywords("Dining").unwrap(), ["pizza palace"]);
    }

    #[test]
    fn test_save_edits_without_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        assert!(matches!(s.save_edits(&[]), Err(TallyError::Other(_))));
    }
}
