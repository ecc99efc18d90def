//! Per-collection card rendering for list views.

use chrono::DateTime;
use serde::Serialize;

use crate::controller::detail::detail_route;
use crate::domain::collection::Collection;
use crate::domain::page::Record;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CardLine {
    pub label: &'static str,
    pub value: String,
    /// Optional CSS class for the value (status colouring, flags).
    pub class: Option<&'static str>,
}

/// One record rendered as a linked card.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CardView {
    pub href: String,
    pub title: String,
    pub image: Option<String>,
    pub lines: Vec<CardLine>,
}

impl CardView {
    fn new(collection: Collection, record: &Record, title_field: &str) -> Self {
        let id = record.id().unwrap_or_default();
        Self {
            href: detail_route(collection.config(), id),
            title: record
                .display_at(title_field)
                .unwrap_or_else(|| "N/A".to_string()),
            image: None,
            lines: Vec::new(),
        }
    }

    fn image(mut self, url: Option<&str>) -> Self {
        self.image = url.filter(|u| !u.is_empty()).map(str::to_string);
        self
    }

    fn line(mut self, label: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.lines.push(CardLine {
                label,
                value,
                class: None,
            });
        }
        self
    }

    fn styled(mut self, label: &'static str, value: Option<String>, class: &'static str) -> Self {
        if let Some(value) = value {
            self.lines.push(CardLine {
                label,
                value,
                class: Some(class),
            });
        }
        self
    }

    fn flag(self, label: &'static str, value: Option<bool>) -> Self {
        let value = value.unwrap_or(false);
        let class = if value { "text-success" } else { "text-danger" };
        let text = if value { "Yes" } else { "No" };
        self.styled(label, Some(text.to_string()), class)
    }
}

/// Formats an ISO-8601 timestamp as e.g. `Fri Mar 24 2006`.
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.format("%a %b %d %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn with_unit(value: Option<String>, unit: &str) -> Option<String> {
    value.map(|value| format!("{value}{unit}"))
}

/// CSS class for a core's status.
pub fn core_status_class(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "active" => "text-success",
        "lost" => "text-danger",
        "inactive" => "text-secondary",
        "expended" => "text-warning",
        _ => "text-body",
    }
}

/// CSS class for a launch pad's status.
pub fn launch_pad_status_class(status: &str) -> &'static str {
    match status {
        "active" => "text-success",
        "inactive" => "text-secondary",
        "unknown" => "text-warning",
        "retired" => "text-primary",
        "lost" => "text-danger",
        "under construction" => "text-orange",
        _ => "text-muted",
    }
}

/// Renders `record` as a card of `collection`.
pub fn render_card(collection: Collection, record: &Record) -> CardView {
    match collection {
        Collection::Launches => CardView::new(collection, record, "name")
            .image(record.str_at("links.patch.small"))
            .line("Flight", record.display_at("flight_number"))
            .line("Date", record.str_at("date_utc").map(format_date))
            .flag("Success", record.bool_at("success")),
        Collection::Payloads => CardView::new(collection, record, "name")
            .line("Type", record.display_at("type"))
            .line("Orbit", record.display_at("orbit"))
            .line("Mass", with_unit(record.display_at("mass_lbs"), " lbs"))
            .line(
                "Launched",
                record.str_at("launch.date_utc").map(format_date),
            )
            .flag("Reused", record.bool_at("reused")),
        Collection::Cores => {
            let status = record.str_at("status").unwrap_or_default();
            CardView::new(collection, record, "serial")
                .image(record.str_at("launches.0.links.patch.small"))
                .styled(
                    "Status",
                    Some(status.to_string()),
                    core_status_class(status),
                )
        }
        Collection::Rockets => CardView::new(collection, record, "name")
            .image(record.str_at("flickr_images.0"))
            .line("Company", record.display_at("company"))
            .line("Country", record.display_at("country"))
            .line(
                "Success Rate",
                with_unit(record.display_at("success_rate_pct"), "%"),
            )
            .line("First Flight", record.display_at("first_flight"))
            .flag("Active", record.bool_at("active")),
        Collection::Ships => CardView::new(collection, record, "name")
            .image(record.str_at("image"))
            .line("Type", record.display_at("type"))
            .line("Home Port", record.display_at("home_port"))
            .line(
                "Number of Launches",
                Some(record.len_at("launches").to_string()),
            )
            .flag("Active", record.bool_at("active")),
        Collection::LaunchPads => {
            let status = record.str_at("status").unwrap_or_default();
            CardView::new(collection, record, "name")
                .image(record.str_at("images.large.0"))
                .line("Region", record.display_at("region"))
                .line("Locality", record.display_at("locality"))
                .line("TimeZone", record.display_at("timezone"))
                .styled(
                    "Status",
                    Some(status.to_string()),
                    launch_pad_status_class(status),
                )
        }
    }
}
