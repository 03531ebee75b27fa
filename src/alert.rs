//! Alert partials for reporting errors from HTMX endpoints.
//!
//! Alerts are swapped into the `#alert-container` element that the base page
//! template renders on every page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An error message with a short title and a longer explanation.
pub struct Alert<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert.
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
                class="flex p-4 text-red-800 rounded-lg bg-red-50
                    dark:bg-gray-800 dark:text-red-400 shadow-lg"
                role="alert"
            {
                div class="text-sm font-medium"
                {
                    p class="font-semibold" { (self.message) }

                    @if !self.details.is_empty() {
                        p { (self.details) }
                    }
                }
            }
        }
    }
}

/// Render an alert as an HTTP response with the given status code.
pub fn render_alert(status_code: StatusCode, alert: Alert) -> Response {
    (status_code, alert.into_html()).into_response()
}

#[cfg(test)]
mod tests {
    use super::Alert;

    #[test]
    fn renders_message_and_details() {
        let html = Alert::error("Something failed", "Try again later.")
            .into_html()
            .into_string();

        assert!(html.contains("Something failed"));
        assert!(html.contains("Try again later."));
    }

    #[test]
    fn omits_empty_details() {
        let html = Alert::error("Something failed", "").into_html().into_string();

        assert_eq!(html.matches("<p").count(), 1);
    }
}
