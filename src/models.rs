use chrono::NaiveDate;

/// Reserved fallback category. Always present, never holds keywords.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keywords: Vec::new(),
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.name == UNCATEGORIZED
    }
}

/// One normalized statement row. Debit and credit are both non-negative;
/// signed-amount statements are split into the pair at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: Option<NaiveDate>,
    pub description: String,
    pub debit: f64,
    pub credit: f64,
    pub balance: Option<f64>,
    pub category: String,
}

impl Transaction {
    pub fn new(
        date: Option<NaiveDate>,
        description: impl Into<String>,
        debit: f64,
        credit: f64,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            debit,
            credit,
            balance: None,
            category: UNCATEGORIZED.to_string(),
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category == UNCATEGORIZED
    }

    pub fn is_debit(&self) -> bool {
        self.debit > 0.0
    }

    pub fn is_credit(&self) -> bool {
        self.credit > 0.0
    }
}

/// Which side of the statement a summary looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Debit,
    Credit,
}

impl Side {
    pub fn amount(&self, txn: &Transaction) -> f64 {
        match self {
            Self::Debit => txn.debit,
            Self::Credit => txn.credit,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }
}
