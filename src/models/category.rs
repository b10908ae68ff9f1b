//! Category lists
//!
//! Plain name lists per entity kind. Entities hold category names as
//! weak references, so removing a name never touches existing records.

use serde::{Deserialize, Serialize};

/// Which entity kind a category name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Subscription,
}

/// The three category name lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    #[serde(default)]
    pub income: Vec<String>,
    #[serde(default)]
    pub expense: Vec<String>,
    #[serde(default)]
    pub subscription: Vec<String>,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            income: ["Salary", "Business", "Investments", "Freelance", "Other"]
                .map(String::from)
                .to_vec(),
            expense: [
                "Housing",
                "Food",
                "Transportation",
                "Entertainment",
                "Utilities",
                "Healthcare",
                "Shopping",
                "Education",
                "Travel",
                "Other",
            ]
            .map(String::from)
            .to_vec(),
            subscription: ["Streaming", "Software", "Membership", "Service", "Other"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl CategorySet {
    /// The list for a kind
    pub fn list(&self, kind: CategoryKind) -> &[String] {
        match kind {
            CategoryKind::Income => &self.income,
            CategoryKind::Expense => &self.expense,
            CategoryKind::Subscription => &self.subscription,
        }
    }

    fn list_mut(&mut self, kind: CategoryKind) -> &mut Vec<String> {
        match kind {
            CategoryKind::Income => &mut self.income,
            CategoryKind::Expense => &mut self.expense,
            CategoryKind::Subscription => &mut self.subscription,
        }
    }

    /// Add a name; duplicates are ignored. Returns whether it was added.
    pub fn add(&mut self, kind: CategoryKind, name: impl Into<String>) -> bool {
        let name = name.into();
        let list = self.list_mut(kind);
        if list.iter().any(|c| c == &name) {
            false
        } else {
            list.push(name);
            true
        }
    }

    /// Remove a name. Returns whether it was present.
    pub fn remove(&mut self, kind: CategoryKind, name: &str) -> bool {
        let list = self.list_mut(kind);
        let before = list.len();
        list.retain(|c| c != name);
        list.len() != before
    }
}
