//! Command structs for engine write operations.
//!
//! Patch-style commands carry `Option` fields: `None` leaves the stored value
//! untouched, `Some("")` stores an empty string.

use crate::{CategoryType, TransactionKind};

/// Create a category.
#[derive(Clone, Debug)]
pub struct CreateCategoryCmd {
    pub category_type: CategoryType,
    pub name: String,
    pub description: String,
}

impl CreateCategoryCmd {
    #[must_use]
    pub fn new(category_type: CategoryType, name: impl Into<String>) -> Self {
        Self {
            category_type,
            name: name.into(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Rename and/or re-describe a category.
#[derive(Clone, Debug, Default)]
pub struct UpdateCategoryCmd {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Create or overwrite the budget of a category for a month.
#[derive(Clone, Debug)]
pub struct UpsertBudgetCmd {
    pub month: String,
    pub category_id: String,
    pub amount_cents: i64,
}

impl UpsertBudgetCmd {
    #[must_use]
    pub fn new(
        month: impl Into<String>,
        category_id: impl Into<String>,
        amount_cents: i64,
    ) -> Self {
        Self {
            month: month.into(),
            category_id: category_id.into(),
            amount_cents,
        }
    }
}

/// Book a transaction.
#[derive(Clone, Debug)]
pub struct CreateTransactionCmd {
    pub kind: TransactionKind,
    pub date: String,
    pub category_id: String,
    pub amount_cents: i64,
    pub note: String,
}

impl CreateTransactionCmd {
    #[must_use]
    pub fn new(
        kind: TransactionKind,
        date: impl Into<String>,
        category_id: impl Into<String>,
        amount_cents: i64,
    ) -> Self {
        Self {
            kind,
            date: date.into(),
            category_id: category_id.into(),
            amount_cents,
            note: String::new(),
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Partially update a transaction.
#[derive(Clone, Debug, Default)]
pub struct UpdateTransactionCmd {
    pub kind: Option<TransactionKind>,
    pub date: Option<String>,
    pub category_id: Option<String>,
    pub amount_cents: Option<i64>,
    pub note: Option<String>,
}
