use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STATEMENT: &str = "Txn Date,Description,Debit,Credit,Balance\n\
    05 Jan 2024,WALMART #123,\"1,234.56\",,5000.00\n\
    06 Jan 2024,Pizza Palace,20.00,,4980.00\n\
    07 Jan 2024,Unknown Shop,5.00,,4975.00\n\
    08 Jan 2024,Salary,,3000.00,7975.00\n";

const SHOP_UNCATEGORIZED: &str = "Unknown Shop,5.00,0.00,4975.00,Uncategorized";
const SHOP_DINING: &str = "Unknown Shop,5.00,0.00,4975.00,Dining";

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn categories(&self) -> PathBuf {
        self.dir.path().join("categories.json")
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn tally(&self) -> Command {
        let mut cmd = Command::cargo_bin("tally").unwrap();
        cmd.env("HOME", self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("TALLY_CATEGORIES")
            .env_remove("RUST_LOG")
            .arg("--categories")
            .arg(self.categories());
        cmd
    }

    fn seed(&self) {
        self.tally().args(["categories", "add", "Groceries"]).assert().success();
        self.tally().args(["categories", "add", "Dining"]).assert().success();
        self.tally()
            .args(["keywords", "add", "Groceries", "Walmart"])
            .assert()
            .success();
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn categories_are_listed_in_insertion_order() {
    let env = Env::new();
    env.seed();

    env.tally()
        .args(["categories", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Uncategorized"))
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("walmart"));

    let json = fs::read_to_string(env.categories()).unwrap();
    let uncategorized = json.find("\"Uncategorized\"").unwrap();
    let groceries = json.find("\"Groceries\"").unwrap();
    let dining = json.find("\"Dining\"").unwrap();
    assert!(uncategorized < groceries && groceries < dining);
}

#[test]
fn duplicate_category_is_rejected() {
    let env = Env::new();
    env.seed();
    env.tally()
        .args(["categories", "add", "Dining"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn keyword_outcomes_are_reported() {
    let env = Env::new();
    env.seed();

    env.tally()
        .args(["keywords", "add", "Groceries", "  WALMART "])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    env.tally()
        .args(["keywords", "add", "Uncategorized", "misc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot hold keywords"));

    env.tally()
        .args(["keywords", "add", "Travel", "uber"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));

    let json = read_json(&env.categories());
    assert_eq!(json["Groceries"], serde_json::json!(["walmart"]));
    assert_eq!(json["Uncategorized"], serde_json::json!([]));
    assert!(json.get("Travel").is_none());
}

#[test]
fn categorize_matches_keywords_and_exports() {
    let env = Env::new();
    env.seed();
    let statement = env.write("statement.csv", STATEMENT);
    let output = env.dir.path().join("out.csv");

    env.tally()
        .arg("categorize")
        .arg(&statement)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("1 categorized, 3 uncategorized"))
        .stdout(predicate::str::contains("Wrote 4 rows"));

    let exported = fs::read_to_string(&output).unwrap();
    let mut lines = exported.lines();
    assert_eq!(
        lines.next(),
        Some("Txn Date,Description,Debit,Credit,Balance,Category")
    );
    assert!(lines.next().unwrap().ends_with(",Groceries"));
}

#[test]
fn apply_learns_keyword_from_edit() {
    let env = Env::new();
    env.seed();
    let statement = env.write("statement.csv", STATEMENT);
    let output = env.dir.path().join("out.csv");

    env.tally()
        .arg("categorize")
        .arg(&statement)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let edited = fs::read_to_string(&output).unwrap().replace(
        "Pizza Palace,20.00,0.00,4980.00,Uncategorized",
        "Pizza Palace,20.00,0.00,4980.00,Dining",
    );
    let edited = env.write("edited.csv", &edited);

    env.tally()
        .arg("apply")
        .arg(&statement)
        .arg(&edited)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 change(s), 1 new keyword(s)"))
        .stdout(predicate::str::contains("2 categorized, 2 uncategorized"));

    let json = read_json(&env.categories());
    assert_eq!(json["Dining"], serde_json::json!(["pizza palace"]));

    // Applying the same edits again changes nothing.
    env.tally()
        .arg("apply")
        .arg(&statement)
        .arg(&edited)
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes."));
}

fn export(env: &Env, statement: &Path) -> String {
    let output = env.dir.path().join("out.csv");
    env.tally()
        .arg("categorize")
        .arg(statement)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();
    fs::read_to_string(output).unwrap()
}

#[test]
fn apply_ignores_reordered_rows() {
    let env = Env::new();
    env.seed();
    let statement = env.write("statement.csv", STATEMENT);

    let exported = export(&env, &statement);
    let mut lines: Vec<&str> = exported.lines().collect();
    lines.swap(1, 2);
    let edited = env.write("edited.csv", &(lines.join("\n") + "\n"));

    env.tally()
        .arg("apply")
        .arg(&statement)
        .arg(&edited)
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes."));
    assert_eq!(
        read_json(&env.categories())["Groceries"],
        serde_json::json!(["walmart"])
    );
}

#[test]
fn apply_accepts_filtered_export() {
    let env = Env::new();
    env.seed();
    let statement = env.write("statement.csv", STATEMENT);

    let exported = export(&env, &statement);
    let kept: Vec<String> = exported
        .lines()
        .filter(|l| !l.contains("WALMART") && !l.contains("Salary"))
        .map(|l| l.replace(SHOP_UNCATEGORIZED, SHOP_DINING))
        .collect();
    let edited = env.write("edited.csv", &(kept.join("\n") + "\n"));

    env.tally()
        .arg("apply")
        .arg(&statement)
        .arg(&edited)
        .assert()
        .success()
        .stdout(predicate::str::contains("Row 3: 'Unknown Shop'"))
        .stdout(predicate::str::contains("1 change(s), 1 new keyword(s)"));
    assert_eq!(
        read_json(&env.categories())["Dining"],
        serde_json::json!(["unknown shop"])
    );
}

#[test]
fn apply_rejects_rows_not_in_statement() {
    let env = Env::new();
    env.seed();
    let statement = env.write("statement.csv", STATEMENT);

    let edited = export(&env, &statement)
        .replace("Pizza Palace,20.00", "Pizza Place,20.00")
        .replace(SHOP_UNCATEGORIZED, SHOP_DINING);
    let edited = env.write("edited.csv", &edited);

    env.tally()
        .arg("apply")
        .arg(&statement)
        .arg(&edited)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Edited row 2 does not match"));
    assert_eq!(read_json(&env.categories())["Dining"], serde_json::json!([]));
}

#[test]
fn apply_rejects_unknown_category() {
    let env = Env::new();
    env.seed();
    let statement = env.write("statement.csv", STATEMENT);
    let edited = env.write(
        "edited.csv",
        &STATEMENT
            .replace("Balance\n", "Balance,Category\n")
            .replace("5000.00\n", "5000.00,Travel\n"),
    );

    env.tally()
        .arg("apply")
        .arg(&statement)
        .arg(&edited)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category 'Travel' does not exist"));
    assert!(read_json(&env.categories()).get("Travel").is_none());
}

#[test]
fn expenses_report_totals_debits() {
    let env = Env::new();
    env.seed();
    let statement = env.write("statement.csv", STATEMENT);

    env.tally()
        .args(["report", "expenses"])
        .arg(&statement)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Expenses:"))
        .stdout(predicate::str::contains("1,259.56"))
        .stdout(predicate::str::contains("3 of 4 transactions uncategorized"));
}

#[test]
fn income_report_shows_net() {
    let env = Env::new();
    env.seed();
    let statement = env.write("statement.csv", STATEMENT);

    env.tally()
        .args(["report", "income"])
        .arg(&statement)
        .assert()
        .success()
        .stdout(predicate::str::contains("3,000.00"))
        .stdout(predicate::str::contains("1,740.44"))
        .stdout(predicate::str::contains("Salary"));
}

#[test]
fn timeline_groups_by_month() {
    let env = Env::new();
    env.seed();
    let statement = env.write("statement.csv", STATEMENT);

    env.tally()
        .args(["report", "timeline", "--period", "month"])
        .arg(&statement)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jan 2024"))
        .stdout(predicate::str::contains("1,259.56"));
}

#[test]
fn missing_columns_fail_the_load() {
    let env = Env::new();
    let statement = env.write("bad.csv", "Date,Memo\n05 Jan 2024,Coffee\n");

    env.tally()
        .arg("categorize")
        .arg(&statement)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Description"));
}

#[test]
fn statement_can_be_read_from_stdin() {
    let env = Env::new();
    env.seed();

    env.tally()
        .args(["categorize", "-"])
        .write_stdin(STATEMENT)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 categorized, 3 uncategorized"));
}
