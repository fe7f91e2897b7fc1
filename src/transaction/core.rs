//! Defines the core data model for transactions.

use serde::{Deserialize, Serialize};
use time::Date;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Whether a transaction is income or an expense is a usage convention
/// carried by the sign of `amount`, not an enforced rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for. May be empty.
    pub description: String,
    /// The category of the transaction, e.g. "Income", "Expense", "Groceries".
    ///
    /// Any string is accepted. [crate::transaction::codec::parse] uppercases
    /// the first character and leaves the rest unchanged.
    pub category: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Positive values represent income/credits, negative values represent
    /// expenses/debits.
    pub amount: f64,
}
