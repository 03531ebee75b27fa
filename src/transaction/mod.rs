//! Transaction management.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its kind and category enumerations, and the
//!   `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying and deleting transactions
//! - The endpoints and page for creating and deleting transactions

mod create_endpoint;
mod delete_endpoint;
pub mod models;
mod new_transaction_page;
pub mod store;

pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use models::{
    ALL_CATEGORIES, Category, RECOGNIZED_KINDS, Transaction, TransactionBuilder, TransactionId,
    TransactionKind,
};
pub use new_transaction_page::get_new_transaction_page;
pub use store::{create_transaction, fetch_transactions};

#[cfg(test)]
pub use store::{
    count_transactions, delete_transaction, get_transaction, get_transactions_in_window,
};
