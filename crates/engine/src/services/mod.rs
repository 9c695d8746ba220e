//! Entity services and the aggregate state service.
//!
//! Services own id assignment and timestamping. They hold no entity state
//! between calls: every operation goes through its repository.

mod budgets;
mod categories;
mod state;
mod transactions;

pub use budgets::BudgetService;
pub use categories::CategoryService;
pub use state::{APP_STATE_VERSION, AppState, StateService};
pub use transactions::TransactionService;

/// Run a block inside a DB transaction, committing on success. An early
/// return drops the transaction, which rolls it back.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}
