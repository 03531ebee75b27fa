//! The date-grouped transaction listing on the dashboard.
//!
//! Renders one table per calendar date in descending date order, with a
//! per-day net total in the heading and a delete control on each row.

use maud::{Markup, html};
use time::Date;

use crate::{
    dashboard::aggregation::{AggregateView, sorted_dates_descending},
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, format_currency,
    },
    period::month_abbrev,
    transaction::Transaction,
};

/// Renders the transactions of a period grouped by date, newest date first.
pub(super) fn date_grouped_tables(view: &AggregateView) -> Markup {
    let dates = sorted_dates_descending(&view.by_date);

    html! {
        section class="w-full mx-auto mb-8" {
            @for date in dates {
                (day_table(date, &view.by_date[&date]))
            }
        }
    }
}

/// Renders one day's transactions as a table with the day's net total.
fn day_table(date: Date, transactions: &[Transaction]) -> Markup {
    let day_total: f64 = transactions
        .iter()
        .map(Transaction::signed_amount)
        .sum();

    html! {
        div class="mb-6" {
            div class="flex justify-between items-baseline mb-2" {
                h3 class="text-lg font-semibold" {
                    (format_date_label(date))
                }
                span class="text-sm font-medium text-gray-600 dark:text-gray-400" {
                    (format_currency(day_total))
                }
            }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Kind" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) {
                                span class="sr-only" { "Actions" }
                            }
                        }
                    }
                    tbody {
                        @for transaction in transactions {
                            (transaction_row(transaction))
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);
    let signed_amount = transaction.signed_amount();
    let amount_style = if signed_amount >= 0.0 {
        "text-green-600 dark:text-green-400"
    } else {
        "text-red-600 dark:text-red-400"
    };

    html! {
        tr class=(TABLE_ROW_STYLE) {
            td class=(TABLE_CELL_STYLE) {
                @if transaction.description.is_empty() {
                    span class="text-gray-400 dark:text-gray-500" { "Transaction" }
                } @else {
                    (transaction.description)
                }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.kind) }
            td class=(TABLE_CELL_STYLE) {
                @if let Some(category) = transaction.category {
                    span class=(CATEGORY_BADGE_STYLE) { (category) }
                }
            }
            td class={(TABLE_CELL_STYLE) " text-right font-medium " (amount_style)} {
                (format_currency(signed_amount))
            }
            td class={(TABLE_CELL_STYLE) " text-right"} {
                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-confirm="Delete this transaction?"
                {
                    "Delete"
                }
            }
        }
    }
}

fn format_date_label(date: Date) -> String {
    format!(
        "{} {} {}",
        date.day(),
        month_abbrev(date.month()),
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::datetime;

    use super::date_grouped_tables;
    use crate::{
        dashboard::aggregation::aggregate,
        transaction::{Category, Transaction, TransactionKind},
    };

    fn transaction(
        id: i64,
        amount: f64,
        kind: TransactionKind,
        created_at: time::OffsetDateTime,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            kind,
            category: Some(Category::Food),
            created_at,
            description: "Lunch".to_owned(),
        }
    }

    #[test]
    fn renders_one_table_per_date_newest_first() {
        let view = aggregate(&[
            transaction(
                1,
                10.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 10:00 UTC),
            ),
            transaction(
                2,
                20.0,
                TransactionKind::Expense,
                datetime!(2024-01-06 10:00 UTC),
            ),
        ]);

        let html = date_grouped_tables(&view).into_string();
        let document = Html::parse_fragment(&html);

        let heading_selector = Selector::parse("h3").unwrap();
        let headings: Vec<String> = document
            .select(&heading_selector)
            .map(|heading| heading.text().collect())
            .collect();

        assert_eq!(headings, vec!["6 Jan 2024", "5 Jan 2024"]);
    }

    #[test]
    fn day_heading_shows_net_total() {
        let view = aggregate(&[
            transaction(
                1,
                100.0,
                TransactionKind::Income,
                datetime!(2024-01-05 10:00 UTC),
            ),
            transaction(
                2,
                40.0,
                TransactionKind::Expense,
                datetime!(2024-01-05 12:00 UTC),
            ),
        ]);

        let html = date_grouped_tables(&view).into_string();

        assert!(html.contains("$60.00"), "net of 100 income and 40 expense");
    }

    #[test]
    fn rows_carry_delete_controls() {
        let view = aggregate(&[transaction(
            7,
            10.0,
            TransactionKind::Expense,
            datetime!(2024-01-05 10:00 UTC),
        )]);

        let html = date_grouped_tables(&view).into_string();
        let document = Html::parse_fragment(&html);

        let button_selector = Selector::parse("button[hx-delete]").unwrap();
        let buttons: Vec<_> = document.select(&button_selector).collect();
        assert_eq!(buttons.len(), 1);
        assert_eq!(
            buttons[0].value().attr("hx-delete"),
            Some("/api/transactions/7")
        );
    }

    #[test]
    fn category_renders_as_badge() {
        let view = aggregate(&[transaction(
            1,
            10.0,
            TransactionKind::Expense,
            datetime!(2024-01-05 10:00 UTC),
        )]);

        let html = date_grouped_tables(&view).into_string();

        assert!(html.contains("Food"));
    }
}
