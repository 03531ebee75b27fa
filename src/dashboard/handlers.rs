//! Dashboard HTTP handlers and view rendering.
//!
//! The dashboard is recomputed from the store on every request: the handler
//! fetches the transactions for the requested period, aggregates them, and
//! renders the result. Nothing derived is cached between requests.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{AggregateView, aggregate},
        cards::summary_cards_view,
        tables::date_grouped_tables,
    },
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    period::{ALL_PRESETS, Period, PeriodQuery, ViewPreset, current_period},
    timezone::get_local_offset,
    transaction::fetch_transactions,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    period: Period,
    current: AggregateView,
    previous: AggregateView,
}

/// Display a page with an overview of the user's transactions for a period.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, Error> {
    let preset = query.view.unwrap_or_else(ViewPreset::default_preset);
    let anchor = match query.anchor {
        Some(anchor) => anchor,
        None => today(&state.local_timezone)?,
    };

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);
    let period = current_period(preset, anchor);

    match build_dashboard_data(period, &connection) {
        Some(data) => Ok(dashboard_view(nav_bar, &data).into_response()),
        None => Ok(dashboard_no_data_view(nav_bar, &period).into_response()),
    }
}

/// The current date in the configured local timezone.
///
/// This only picks the default anchor for the dashboard; all window
/// arithmetic and date bucketing stays in UTC.
fn today(local_timezone_name: &str) -> Result<Date, Error> {
    let local_timezone = get_local_offset(local_timezone_name).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", local_timezone_name);
        Error::InvalidTimezoneError(local_timezone_name.to_owned())
    })?;

    Ok(OffsetDateTime::now_utc().to_offset(local_timezone).date())
}

/// Fetches and aggregates the transactions for `period` and the period
/// before it.
///
/// Returns `None` if the period has no transactions. A store failure is
/// treated the same way as an empty period, so the page degrades to the
/// no-data prompt rather than an error page.
fn build_dashboard_data(period: Period, connection: &Connection) -> Option<DashboardData> {
    let (from, to) = period.query_window();
    let transactions = fetch_transactions(from, to, connection);

    if transactions.is_empty() {
        return None;
    }

    let (previous_from, previous_to) = period.previous().query_window();
    let previous_transactions = fetch_transactions(previous_from, previous_to, connection);

    Some(DashboardData {
        period,
        current: aggregate(&transactions),
        previous: aggregate(&previous_transactions),
    })
}

/// Renders the main dashboard page with the period selector, summary cards
/// and the date-grouped transaction listing.
fn dashboard_view(nav_bar: NavBar, data: &DashboardData) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class={(PAGE_CONTAINER_STYLE) " max-w-screen-xl"}
        {
            (period_selector(&data.period))

            (summary_cards_view(&data.current, &data.previous))

            (date_grouped_tables(&data.current))

            p
            {
                "Add a new transaction "
                (link(endpoints::NEW_TRANSACTION_VIEW, "here"))
                "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the dashboard page when the period has no transaction data.
fn dashboard_no_data_view(nav_bar: NavBar, period: &Period) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class={(PAGE_CONTAINER_STYLE) " max-w-screen-xl"}
        {
            (period_selector(period))

            div class="flex flex-col items-center px-6 py-8 mx-auto"
            {
                h2 class="text-xl font-bold"
                {
                    "Nothing here yet..."
                }

                p
                {
                    "Summaries will show up here once there is something to
                    summarize. Get started by " (new_transaction_link) "."
                }
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the preset links and previous/next navigation for a period.
fn period_selector(period: &Period) -> Markup {
    html!(
        div class="w-full flex flex-wrap items-center justify-between mb-6 gap-4"
        {
            nav class="flex gap-4" aria-label="View presets"
            {
                @for preset in ALL_PRESETS {
                    @if preset == period.preset {
                        span class="font-semibold text-blue-700 dark:text-blue-500"
                        {
                            (preset.label())
                        }
                    } @else {
                        a
                            href=(current_period(preset, period.start).href())
                            class=(LINK_STYLE)
                        {
                            (preset.label())
                        }
                    }
                }
            }

            nav class="flex items-center gap-4" aria-label="Period navigation"
            {
                a
                    href=(period.previous().href())
                    class=(LINK_STYLE)
                    aria-label="Previous period"
                {
                    "←"
                }

                span class="font-semibold" { (period.label()) }

                a
                    href=(period.next().href())
                    class=(LINK_STYLE)
                    aria-label="Next period"
                {
                    "→"
                }
            }
        }
    )
}
