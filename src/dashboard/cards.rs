//! Summary cards showing each transaction kind's total for the period.
//!
//! Each card shows the kind's total and count for the current period and a
//! trend indicator comparing the total against the previous period of the
//! same preset.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{AggregateView, KindSummary},
    html::format_currency,
    transaction::TransactionKind,
};

/// How the current period's total compares to the previous period's.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Trend {
    Up(f64),
    Down(f64),
    Flat,
    /// The previous period has no total of this kind to compare against.
    NoBaseline,
}

/// Compares totals between periods as a percentage change.
fn determine_trend(current_total: f64, previous_total: f64) -> Trend {
    if previous_total == 0.0 {
        return Trend::NoBaseline;
    }

    let percentage_change = ((current_total - previous_total) / previous_total) * 100.0;

    // Changes that would display as "0%" are shown as flat.
    if percentage_change.round().abs() < 0.5 {
        Trend::Flat
    } else if percentage_change > 0.0 {
        Trend::Up(percentage_change)
    } else {
        Trend::Down(percentage_change.abs())
    }
}

/// Formats a percentage value, avoiding "-0%" display.
fn format_percentage(value: f64) -> String {
    let rounded = value.round();
    if rounded.abs() < 0.5 {
        "0".to_string()
    } else {
        format!("{:.0}", rounded)
    }
}

/// Renders the four kind summary cards for the current period.
///
/// # Arguments
/// * `current` - The aggregate view for the period being displayed
/// * `previous` - The aggregate view for the period before it, used for the
///   trend indicators
pub(super) fn summary_cards_view(current: &AggregateView, previous: &AggregateView) -> Markup {
    html! {
        section class="w-full mx-auto mb-8" {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4" {
                @for (kind, summary) in current.summaries() {
                    (summary_card(kind, summary, previous.summary(kind)))
                }
            }
        }
    }
}

/// Renders a single kind's summary card.
fn summary_card(kind: TransactionKind, current: &KindSummary, previous: &KindSummary) -> Markup {
    let trend = determine_trend(current.total, previous.total);

    let transaction_count = if current.count == 1 {
        "1 transaction".to_owned()
    } else {
        format!("{} transactions", current.count)
    };

    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md
                   hover:shadow-lg transition-shadow flex flex-col
                   justify-between"
            aria-label=(format!(
                "{}: {} across {}{}",
                kind,
                format_currency(current.total),
                transaction_count,
                match trend {
                    Trend::Up(change) => format!(", up {}% from last period", format_percentage(change)),
                    Trend::Down(change) => format!(", down {}% from last period", format_percentage(change)),
                    Trend::Flat => ", unchanged from last period".to_owned(),
                    Trend::NoBaseline => String::new(),
                }
            ))
        {
            div {
                h4 class="text-lg font-semibold mb-3" { (kind) }

                div class="text-3xl font-bold mb-1" {
                    (format_currency(current.total))
                }

                div class="text-sm text-gray-600 dark:text-gray-400 mb-2" {
                    (transaction_count)
                }
            }

            (card_trend_content(trend))
        }
    }
}

/// Renders the trend line at the bottom of a card.
fn card_trend_content(trend: Trend) -> Markup {
    html! {
        div class="mt-3" {
            @match trend {
                Trend::NoBaseline => {
                    div class="text-sm text-gray-600 dark:text-gray-400" {
                        "No data for last period"
                    }
                }
                Trend::Flat => {
                    div class="text-sm text-gray-600 dark:text-gray-400" {
                        "→ Same as last period"
                    }
                }
                Trend::Up(change) => {
                    div class="text-sm font-medium text-red-600 dark:text-red-400" {
                        "↑ +" (format_percentage(change)) "% vs last period"
                    }
                }
                Trend::Down(change) => {
                    div class="text-sm font-medium text-green-600 dark:text-green-400" {
                        "↓ -" (format_percentage(change)) "% vs last period"
                    }
                }
            }
        }
    }
}
