//! Defines the core data models for transactions.

use std::fmt::{self, Display};

use serde::Deserialize;
use time::OffsetDateTime;

/// The integer primary key type used by the database.
pub type DatabaseId = i64;
/// Alias for [DatabaseId] to clarify intent in function signatures.
pub type TransactionId = DatabaseId;

/// Whether a transaction brings money in or sends it out, and for outgoing
/// money, what broad purpose it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Saving,
    Investment,
    /// A kind recorded in the database that is none of the recognized values.
    ///
    /// This variant only comes from the read path: the application's own write
    /// path rejects it. Transactions with this kind appear in no per-kind
    /// summary but keep their place in the date-grouped listing.
    Unknown,
}

/// The four kinds a transaction can be created with.
pub const RECOGNIZED_KINDS: [TransactionKind; 4] = [
    TransactionKind::Income,
    TransactionKind::Expense,
    TransactionKind::Saving,
    TransactionKind::Investment,
];

impl TransactionKind {
    /// The string stored in the database for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Saving => "Saving",
            Self::Investment => "Investment",
            Self::Unknown => "Unknown",
        }
    }

    /// The value used for this kind in HTML forms.
    pub fn as_form_value(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Saving => "saving",
            Self::Investment => "investment",
            Self::Unknown => "unknown",
        }
    }

    /// Parse the string stored in the database. Unrecognized text maps to
    /// [TransactionKind::Unknown] rather than failing the row.
    pub fn from_db(text: &str) -> Self {
        match text {
            "Income" => Self::Income,
            "Expense" => Self::Expense,
            "Saving" => Self::Saving,
            "Investment" => Self::Investment,
            _ => Self::Unknown,
        }
    }

    /// Whether money flows into the user's accounts for this kind.
    ///
    /// Amounts are stored as non-negative magnitudes, so the kind alone
    /// decides the sign of a transaction's contribution to a running total.
    /// [TransactionKind::Unknown] has no direction and contributes nothing.
    pub fn is_inflow(self) -> bool {
        matches!(self, Self::Income)
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a transaction was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Housing,
    Car,
    Entertainment,
}

/// All the categories a transaction can be labeled with.
pub const ALL_CATEGORIES: [Category; 4] = [
    Category::Food,
    Category::Housing,
    Category::Car,
    Category::Entertainment,
];

impl Category {
    /// The string stored in the database for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Housing => "Housing",
            Self::Car => "Car",
            Self::Entertainment => "Entertainment",
        }
    }

    /// The value used for this category in HTML forms.
    pub fn as_form_value(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Housing => "housing",
            Self::Car => "car",
            Self::Entertainment => "entertainment",
        }
    }

    /// Parse the string stored in the database. Unrecognized text maps to
    /// "no category".
    pub fn from_db(text: &str) -> Option<Self> {
        match text {
            "Food" => Some(Self::Food),
            "Housing" => Some(Self::Housing),
            "Car" => Some(Self::Car),
            "Entertainment" => Some(Self::Entertainment),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single financial event, i.e. money that was earned, spent, saved or
/// invested.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money as a non-negative magnitude. The direction of the
    /// money flow is implied by `kind`, not encoded in the sign.
    pub amount: f64,
    /// Whether this transaction is income, an expense, a saving or an
    /// investment.
    pub kind: TransactionKind,
    /// What the transaction was spent on, if labeled.
    pub category: Option<Category>,
    /// When the transaction happened. This is the sole ordering and grouping
    /// key for transactions.
    pub created_at: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub description: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: f64,
        kind: TransactionKind,
        created_at: OffsetDateTime,
    ) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            kind,
            created_at,
            category: None,
            description: String::new(),
        }
    }

    /// The transaction's contribution to a running balance: positive for
    /// income, negative for expenses, savings and investments, zero for
    /// records with an unrecognized kind.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Unknown => 0.0,
            kind if kind.is_inflow() => self.amount,
            _ => -self.amount,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Pass the finished builder to
/// [create_transaction][crate::transaction::store::create_transaction] to
/// validate it and persist the transaction.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The amount of money as a non-negative magnitude.
    pub amount: f64,
    /// Whether this transaction is income, an expense, a saving or an
    /// investment.
    pub kind: TransactionKind,
    /// When the transaction happened.
    pub created_at: OffsetDateTime,
    /// What the transaction was spent on, if labeled.
    pub category: Option<Category>,
    /// A text description of what the transaction was for.
    pub description: String,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}
