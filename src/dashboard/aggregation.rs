//! Derived views over a window of transactions.
//!
//! Everything here is a pure function of the transaction list it is given:
//! the dashboard recomputes these views on every request rather than caching
//! them between requests. Date keys are the UTC calendar date of each
//! transaction's `created_at`, applied uniformly so that records near
//! midnight never straddle two days depending on where they were recorded.

use std::collections::HashMap;

use time::{Date, UtcOffset};

use crate::transaction::{Transaction, TransactionKind};

/// The transactions of one kind within a window, with their count and total.
#[derive(Debug, Clone, PartialEq)]
pub struct KindSummary {
    /// The matching transactions in their input order.
    pub transactions: Vec<Transaction>,
    /// The number of matching transactions.
    pub count: usize,
    /// The sum of the matching transactions' amounts. Zero for an empty
    /// subset.
    pub total: f64,
}

impl KindSummary {
    fn for_kind(transactions: &[Transaction], kind: TransactionKind) -> Self {
        let transactions = partition_by_kind(transactions, kind);
        let count = transactions.len();
        let total = total_amount(&transactions);

        Self {
            transactions,
            count,
            total,
        }
    }
}

/// Everything the dashboard derives from a window of transactions.
///
/// Each transaction in the source list appears in exactly one of the four
/// kind summaries (or none, if its kind is unrecognized) and in exactly one
/// date bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateView {
    pub income: KindSummary,
    pub expense: KindSummary,
    pub saving: KindSummary,
    pub investment: KindSummary,
    /// Transactions grouped by the UTC calendar date of `created_at`,
    /// preserving input order within each bucket. The map itself is
    /// unordered; use [sorted_dates_descending] to iterate newest-first.
    pub by_date: HashMap<Date, Vec<Transaction>>,
}

impl AggregateView {
    /// The four kind summaries paired with their kind, in display order.
    pub fn summaries(&self) -> [(TransactionKind, &KindSummary); 4] {
        [
            (TransactionKind::Income, &self.income),
            (TransactionKind::Expense, &self.expense),
            (TransactionKind::Saving, &self.saving),
            (TransactionKind::Investment, &self.investment),
        ]
    }

    /// The summary for one of the four recognized kinds.
    ///
    /// # Panics
    /// Panics when called with [TransactionKind::Unknown], which has no
    /// summary.
    pub fn summary(&self, kind: TransactionKind) -> &KindSummary {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
            TransactionKind::Saving => &self.saving,
            TransactionKind::Investment => &self.investment,
            TransactionKind::Unknown => panic!("no summary exists for the unknown kind"),
        }
    }
}

/// Compute the dashboard's derived views for a window of transactions.
///
/// An empty input yields empty subsets, zero counts and totals, and an empty
/// date mapping. This never fails.
pub fn aggregate(transactions: &[Transaction]) -> AggregateView {
    AggregateView {
        income: KindSummary::for_kind(transactions, TransactionKind::Income),
        expense: KindSummary::for_kind(transactions, TransactionKind::Expense),
        saving: KindSummary::for_kind(transactions, TransactionKind::Saving),
        investment: KindSummary::for_kind(transactions, TransactionKind::Investment),
        by_date: group_by_date(transactions),
    }
}

/// The transactions whose kind equals `kind`, in their input order.
///
/// No transaction is duplicated or dropped within a kind, and a transaction
/// with a kind outside the four recognized kinds matches none of them.
pub fn partition_by_kind(transactions: &[Transaction], kind: TransactionKind) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .cloned()
        .collect()
}

/// The sum of the transactions' amounts. Zero for an empty slice.
pub fn total_amount(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount)
        .sum()
}

/// Group transactions by the UTC calendar date of `created_at`, preserving
/// input order within each bucket.
///
/// Buckets materialize lazily: a date only has an entry once a transaction
/// falls on it.
pub fn group_by_date(transactions: &[Transaction]) -> HashMap<Date, Vec<Transaction>> {
    let mut buckets: HashMap<Date, Vec<Transaction>> = HashMap::new();

    for transaction in transactions {
        let date = transaction.created_at.to_offset(UtcOffset::UTC).date();
        buckets.entry(date).or_default().push(transaction.clone());
    }

    buckets
}

/// The bucket dates in descending order.
///
/// [group_by_date]'s map has no iteration order of its own, so consumers that
/// want newest-first must sort explicitly.
pub fn sorted_dates_descending(buckets: &HashMap<Date, Vec<Transaction>>) -> Vec<Date> {
    let mut dates: Vec<Date> = buckets.keys().copied().collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::{
        aggregate, group_by_date, partition_by_kind, sorted_dates_descending, total_amount,
    };
    use crate::transaction::{RECOGNIZED_KINDS, Transaction, TransactionKind};

    fn create_test_transaction(
        id: i64,
        amount: f64,
        kind: TransactionKind,
        created_at: time::OffsetDateTime,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            kind,
            category: None,
            created_at,
            description: String::new(),
        }
    }

    #[test]
    fn empty_input_yields_empty_view() {
        let view = aggregate(&[]);

        for (_, summary) in view.summaries() {
            assert!(summary.transactions.is_empty());
            assert_eq!(summary.count, 0);
            assert_eq!(summary.total, 0.0);
        }
        assert!(view.by_date.is_empty());
    }

    #[test]
    fn count_equals_partition_size_for_every_kind() {
        let transactions = vec![
            create_test_transaction(
                1,
                100.0,
                TransactionKind::Income,
                datetime!(2024-01-05 10:00 UTC),
            ),
            create_test_transaction(
                2,
                40.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 20:00 UTC),
            ),
            create_test_transaction(
                3,
                60.0,
                TransactionKind::Saving,
                datetime!(2024-01-06 08:00 UTC),
            ),
        ];

        let view = aggregate(&transactions);

        for kind in RECOGNIZED_KINDS {
            assert_eq!(
                view.summary(kind).count,
                partition_by_kind(&transactions, kind).len()
            );
        }
    }

    #[test]
    fn partitions_preserve_input_order() {
        let transactions = vec![
            create_test_transaction(
                1,
                10.0,
                TransactionKind::Expense,
                datetime!(2024-01-06 10:00 UTC),
            ),
            create_test_transaction(
                2,
                20.0,
                TransactionKind::Income,
                datetime!(2024-01-05 10:00 UTC),
            ),
            create_test_transaction(
                3,
                30.0,
                TransactionKind::Expense,
                datetime!(2024-01-04 10:00 UTC),
            ),
        ];

        let expenses = partition_by_kind(&transactions, TransactionKind::Expense);

        let ids: Vec<i64> = expenses.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn partitions_cover_recognized_kinds_exactly_once() {
        let transactions = vec![
            create_test_transaction(
                1,
                100.0,
                TransactionKind::Income,
                datetime!(2024-01-05 10:00 UTC),
            ),
            create_test_transaction(
                2,
                40.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 20:00 UTC),
            ),
            create_test_transaction(
                3,
                60.0,
                TransactionKind::Unknown,
                datetime!(2024-01-06 08:00 UTC),
            ),
        ];

        let view = aggregate(&transactions);

        let partitioned: usize = view
            .summaries()
            .iter()
            .map(|(_, summary)| summary.count)
            .sum();

        // The unknown-kind record appears in no partition.
        assert_eq!(partitioned, transactions.len() - 1);
    }

    #[test]
    fn each_partition_filters_its_own_kind() {
        // Savings and investments must not be folded into expenses, and the
        // expense total must come from the expense subset.
        let transactions = vec![
            create_test_transaction(
                1,
                100.0,
                TransactionKind::Income,
                datetime!(2024-01-05 10:00 UTC),
            ),
            create_test_transaction(
                2,
                40.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 11:00 UTC),
            ),
            create_test_transaction(
                3,
                25.0,
                TransactionKind::Saving,
                datetime!(2024-01-05 12:00 UTC),
            ),
            create_test_transaction(
                4,
                75.0,
                TransactionKind::Investment,
                datetime!(2024-01-05 13:00 UTC),
            ),
        ];

        let view = aggregate(&transactions);

        assert_eq!(view.income.total, 100.0);
        assert_eq!(view.expense.total, 40.0);
        assert_eq!(view.saving.total, 25.0);
        assert_eq!(view.investment.total, 75.0);
        assert_eq!(view.saving.transactions[0].id, 3);
        assert_eq!(view.investment.transactions[0].id, 4);
    }

    #[test]
    fn group_by_date_is_a_partition_of_the_input() {
        let transactions = vec![
            create_test_transaction(
                1,
                100.0,
                TransactionKind::Income,
                datetime!(2024-01-05 10:00 UTC),
            ),
            create_test_transaction(
                2,
                40.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 20:00 UTC),
            ),
            create_test_transaction(
                3,
                60.0,
                TransactionKind::Expense,
                datetime!(2024-01-06 08:00 UTC),
            ),
        ];

        let buckets = group_by_date(&transactions);

        let bucketed: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(bucketed, transactions.len());
    }

    #[test]
    fn worked_example() {
        let records = vec![
            create_test_transaction(
                1,
                100.0,
                TransactionKind::Income,
                datetime!(2024-01-05 10:00 UTC),
            ),
            create_test_transaction(
                2,
                40.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 20:00 UTC),
            ),
            create_test_transaction(
                3,
                60.0,
                TransactionKind::Expense,
                datetime!(2024-01-06 08:00 UTC),
            ),
        ];

        let view = aggregate(&records);

        assert_eq!(view.income.count, 1);
        assert_eq!(view.income.total, 100.0);
        assert_eq!(view.expense.count, 2);
        assert_eq!(view.expense.total, 100.0);

        assert_eq!(view.by_date.len(), 2);
        let jan_5 = &view.by_date[&date!(2024 - 01 - 05)];
        assert_eq!(
            jan_5.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 2],
            "bucket order should follow input order"
        );
        let jan_6 = &view.by_date[&date!(2024 - 01 - 06)];
        assert_eq!(jan_6.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn unrecognized_kind_is_excluded_from_partitions_but_date_bucketed() {
        let records = vec![create_test_transaction(
            1,
            50.0,
            TransactionKind::Unknown,
            datetime!(2024-01-05 10:00 UTC),
        )];

        let view = aggregate(&records);

        for (_, summary) in view.summaries() {
            assert_eq!(summary.count, 0);
        }
        assert_eq!(view.by_date[&date!(2024 - 01 - 05)].len(), 1);
    }

    #[test]
    fn date_keys_use_the_utc_calendar_date() {
        // 01:30 on Jan 6 at +13:00 is still Jan 5 in UTC; 22:00 on Jan 5 at
        // -05:00 is already Jan 6 in UTC. Mixing normalizations would put
        // these in the wrong buckets.
        let records = vec![
            create_test_transaction(
                1,
                10.0,
                TransactionKind::Expense,
                datetime!(2024-01-06 01:30 +13:00),
            ),
            create_test_transaction(
                2,
                20.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 22:00 -05:00),
            ),
            create_test_transaction(
                3,
                30.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 23:59:59 UTC),
            ),
        ];

        let buckets = group_by_date(&records);

        let jan_5: Vec<i64> = buckets[&date!(2024 - 01 - 05)].iter().map(|t| t.id).collect();
        let jan_6: Vec<i64> = buckets[&date!(2024 - 01 - 06)].iter().map(|t| t.id).collect();
        assert_eq!(jan_5, vec![1, 3]);
        assert_eq!(jan_6, vec![2]);
    }

    #[test]
    fn sorted_dates_are_descending() {
        let records = vec![
            create_test_transaction(
                1,
                10.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 10:00 UTC),
            ),
            create_test_transaction(
                2,
                20.0,
                TransactionKind::Expense,
                datetime!(2024-03-01 10:00 UTC),
            ),
            create_test_transaction(
                3,
                30.0,
                TransactionKind::Expense,
                datetime!(2023-12-31 10:00 UTC),
            ),
        ];

        let buckets = group_by_date(&records);

        assert_eq!(
            sorted_dates_descending(&buckets),
            vec![
                date!(2024 - 03 - 01),
                date!(2024 - 01 - 05),
                date!(2023 - 12 - 31)
            ]
        );
    }

    #[test]
    fn aggregate_is_idempotent() {
        let records = vec![
            create_test_transaction(
                1,
                100.0,
                TransactionKind::Income,
                datetime!(2024-01-05 10:00 UTC),
            ),
            create_test_transaction(
                2,
                40.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 20:00 UTC),
            ),
        ];

        assert_eq!(aggregate(&records), aggregate(&records));
    }

    #[test]
    fn total_of_empty_subset_is_zero() {
        assert_eq!(total_amount(&[]), 0.0);
    }
}
