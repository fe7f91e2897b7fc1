//! Transaction management for the ledger application.
//!
//! This module contains everything related to transactions:
//! - The [Transaction] model and the [codec] for converting it to and from
//!   the raw strings used by forms and the ledger file
//! - The [Ledger], which keeps the in-memory transactions and the backing
//!   CSV file in sync
//! - The pages and API endpoints for viewing, creating, editing and deleting
//!   transactions

pub mod codec;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod new_transaction_page;
mod store;
mod transactions_page;

pub use core::Transaction;
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use new_transaction_page::get_new_transaction_page;
pub use store::Ledger;
pub use transactions_page::get_transactions_page;
