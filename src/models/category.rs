use super::TransactionType;

/// Suggested category names per transaction type.
///
/// These are hints shown to the user, not a whitelist: any non-empty
/// category is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendedCategories {
    income: Vec<String>,
    expense: Vec<String>,
}

impl RecommendedCategories {
    pub fn new(income: Vec<String>, expense: Vec<String>) -> Self {
        Self { income, expense }
    }

    pub fn for_kind(&self, kind: TransactionType) -> &[String] {
        match kind {
            TransactionType::Income => &self.income,
            TransactionType::Expense => &self.expense,
        }
    }

    /// Find a recommended category by name (case-insensitive).
    pub fn find(&self, kind: TransactionType, name: &str) -> Option<&str> {
        let lower = name.to_lowercase();
        self.for_kind(kind)
            .iter()
            .find(|c| c.to_lowercase() == lower)
            .map(String::as_str)
    }
}

impl Default for RecommendedCategories {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            income: owned(&["Salary", "Bonus", "Investment", "Freelance"]),
            expense: owned(&[
                "Food",
                "Transport",
                "Utilities",
                "Entertainment",
                "Healthcare",
                "Shopping",
                "Other",
            ]),
        }
    }
}
