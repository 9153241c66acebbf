use crate::error::{Result, TallyError};
use crate::models::Transaction;
use crate::store::{CategoryStore, KeywordOutcome};

/// One row whose category the user changed.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub row: usize,
    pub description: String,
    pub from: String,
    pub to: String,
    pub keyword: KeywordOutcome,
}

#[derive(Debug, Default)]
pub struct ReviewSummary {
    pub changes: Vec<EditOutcome>,
}

impl ReviewSummary {
    pub fn keywords_added(&self) -> usize {
        self.changes.iter().filter(|c| c.keyword.is_added()).count()
    }

    /// Changes whose description did not become a new keyword.
    pub fn warnings(&self) -> impl Iterator<Item = &EditOutcome> {
        self.changes.iter().filter(|c| !c.keyword.is_added())
    }
}

/// Indices of rows still waiting for a category.
pub fn pending_rows(table: &[Transaction]) -> Vec<usize> {
    table
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_uncategorized())
        .map(|(i, _)| i)
        .collect()
}

fn cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Two rows describe the same statement line. Amounts are compared to the
/// cent, which is what an export keeps.
fn same_row(a: &Transaction, b: &Transaction) -> bool {
    a.date == b.date
        && a.description == b.description
        && cents(a.debit) == cents(b.debit)
        && cents(a.credit) == cents(b.credit)
}

/// Put the rows of an edited export back into statement order.
///
/// Each edited row claims the first unclaimed statement row with the same
/// date, description and amounts, so re-sorted files line up again. Rows
/// missing from the edited file keep their current category. An edited row
/// with no counterpart is an error.
pub fn align_edits(table: &[Transaction], edited: &[Transaction]) -> Result<Vec<Transaction>> {
    let mut aligned = table.to_vec();
    let mut claimed = vec![false; table.len()];
    for (row, edit) in edited.iter().enumerate() {
        let idx = (0..table.len())
            .find(|&i| !claimed[i] && same_row(&table[i], edit))
            .ok_or(TallyError::RowMismatch { row: row + 1 })?;
        claimed[idx] = true;
        aligned[idx].category = edit.category.clone();
    }
    Ok(aligned)
}

/// Fold user edits back into the table and the keyword store.
///
/// Rows are paired by position and must describe the same transactions;
/// any mismatch is reported before anything is written. For every row
/// whose category changed, the row's description is offered as a keyword
/// for the new category and the new category is adopted whatever the
/// keyword outcome. Unchanged rows cause no writes.
pub fn apply_edits(
    store: &mut CategoryStore,
    table: &mut [Transaction],
    edited: &[Transaction],
) -> Result<ReviewSummary> {
    if table.len() != edited.len() {
        return Err(TallyError::RowCountMismatch {
            expected: table.len(),
            found: edited.len(),
        });
    }
    if let Some(row) = table.iter().zip(edited).position(|(a, b)| !same_row(a, b)) {
        return Err(TallyError::RowMismatch { row: row + 1 });
    }

    let mut summary = ReviewSummary::default();
    for (row, (current, edit)) in table.iter_mut().zip(edited).enumerate() {
        if current.category == edit.category {
            continue;
        }
        let keyword = store.add_keyword(&edit.category, &edit.description)?;
        if !keyword.is_added() {
            log::warn!("row {row}: {}", keyword.describe(&edit.category));
        }
        summary.changes.push(EditOutcome {
            row,
            description: current.description.clone(),
            from: std::mem::replace(&mut current.category, edit.category.clone()),
            to: edit.category.clone(),
            keyword,
        });
    }

    log::info!(
        "applied {} edit(s), {} new keyword(s)",
        summary.changes.len(),
        summary.keywords_added()
    );
    Ok(summary)
}
