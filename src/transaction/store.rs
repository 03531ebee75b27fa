//! Database functions for storing and querying transactions.
//!
//! Timestamps are normalized to UTC and stored as RFC 3339 text so that the
//! windowed query below can compare them lexicographically.

use rusqlite::{Connection, Row, types::Type};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

use crate::{
    Error,
    transaction::{
        Transaction, TransactionBuilder, TransactionId,
        models::{Category, TransactionKind},
    },
};

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is negative or not finite,
/// - or [Error::UnknownKind] if the builder carries the internal unknown kind,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if !builder.amount.is_finite() || builder.amount < 0.0 {
        return Err(Error::InvalidAmount(builder.amount));
    }

    if builder.kind == TransactionKind::Unknown {
        return Err(Error::UnknownKind);
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, kind, category, created_at, description)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, kind, category, created_at, description",
        )?
        .query_row(
            (
                builder.amount,
                builder.kind.as_str(),
                builder.category.map(Category::as_str),
                encode_timestamp(builder.created_at),
                builder.description,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, kind, category, created_at, description
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Delete a transaction from the database by its `id`.
///
/// Returns the number of rows deleted, which is zero if `id` does not refer
/// to a transaction.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<usize, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Retrieve the transactions whose `created_at` falls in the half-open window
/// `[from, to)`, ordered by `created_at` descending.
///
/// Rows whose stored timestamp cannot be parsed are logged and skipped rather
/// than failing the whole batch. Rows with an unrecognized kind are kept with
/// [TransactionKind::Unknown].
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_in_window(
    from: OffsetDateTime,
    to: OffsetDateTime,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let transactions = connection
        .prepare(
            "SELECT id, amount, kind, category, created_at, description
             FROM \"transaction\"
             WHERE created_at >= ?1 AND created_at < ?2
             ORDER BY created_at DESC, id DESC",
        )?
        .query_map(
            (encode_timestamp(from), encode_timestamp(to)),
            map_transaction_row_lossy,
        )?
        .collect::<Result<Vec<Option<Transaction>>, rusqlite::Error>>()?;

    Ok(transactions.into_iter().flatten().collect())
}

/// Retrieve the transactions in the window `[from, to)`, treating a store
/// failure as an empty result.
///
/// This is the boundary between the database and the dashboard: the caller
/// always receives a list to aggregate, and the failure is logged server-side.
pub fn fetch_transactions(
    from: OffsetDateTime,
    to: OffsetDateTime,
    connection: &Connection,
) -> Vec<Transaction> {
    get_transactions_in_window(from, to, connection).unwrap_or_else(|error| {
        tracing::warn!("could not fetch transactions, treating as empty: {error}");
        Vec::new()
    })
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                kind TEXT NOT NULL,
                category TEXT,
                created_at TEXT NOT NULL,
                description TEXT NOT NULL
                )",
        (),
    )?;

    // Index used by the dashboard's windowed query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_created_at
         ON \"transaction\"(created_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// This mapper is strict: an unparsable `created_at` fails the row. It is
/// meant for reading back rows the application just wrote.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let kind: String = row.get(2)?;
    let category: Option<String> = row.get(3)?;
    let created_at: String = row.get(4)?;
    let description = row.get(5)?;

    let created_at = OffsetDateTime::parse(&created_at, &Rfc3339).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id,
        amount,
        kind: TransactionKind::from_db(&kind),
        category: category.as_deref().and_then(Category::from_db),
        created_at,
        description,
    })
}

/// Map a database row to a Transaction, skipping rows with an unparsable
/// `created_at` instead of failing the batch.
fn map_transaction_row_lossy(row: &Row) -> Result<Option<Transaction>, rusqlite::Error> {
    let id: TransactionId = row.get(0)?;
    let created_at: String = row.get(4)?;

    if OffsetDateTime::parse(&created_at, &Rfc3339).is_err() {
        tracing::warn!(
            "skipping transaction {id}: could not parse created_at {created_at:?}"
        );
        return Ok(None);
    }

    map_transaction_row(row).map(Some)
}

fn encode_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .expect("UTC timestamp formats as RFC 3339")
}
