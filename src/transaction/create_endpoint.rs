//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, OffsetDateTime, Time};

use crate::{
    AppState, endpoints,
    transaction::{Category, Transaction, TransactionKind, store::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The kind of transaction.
    pub kind: TransactionKind,
    /// The date when the transaction occurred.
    pub date: Date,
    /// The category of the transaction, if the user picked one.
    #[serde(default)]
    pub category: Option<Category>,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
}

/// A route handler for creating a new transaction, redirects to the dashboard
/// on success.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> impl IntoResponse {
    // The form supplies a calendar date; the stored timestamp pins it to
    // midnight UTC so date bucketing puts it on the same day it was entered.
    let created_at = OffsetDateTime::new_utc(form.date, Time::MIDNIGHT);
    let builder = Transaction::build(form.amount, form.kind, created_at)
        .category(form.category)
        .description(&form.description);

    let connection = state.db_connection.lock().unwrap();

    if let Err(error) = create_transaction(builder, &connection) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
