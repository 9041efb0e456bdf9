//! Full render requests: rows in, view plus pager, title and legend out.

use calgrid_core::argument::{DateArgument, DateRange};
use calgrid_core::calendar::{CalendarEvent, CalendarOptions, EventIndex, Stripe};
use calgrid_core::grid::{build_view, CalendarView, GridContext};
use calgrid_core::legend::{annotate_all, collect_legend, StripeLookup};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::rows::{normalize_rows, EventRow};

/// Tokens for the previous, current and next calendar page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    pub previous: Option<String>,
    pub current: String,
    pub next: Option<String>,
}

impl Pager {
    fn for_argument(argument: &DateArgument) -> Option<Self> {
        let current = argument.value.clone()?;
        Some(Self {
            previous: argument.previous_token(),
            current,
            next: argument.next_token(),
        })
    }
}

/// Result of one render request.
///
/// An invalid argument gives no view and a message for the host to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOutput {
    pub view: Option<CalendarView>,
    pub title: Option<String>,
    pub pager: Option<Pager>,
    pub legend: Vec<Stripe>,
    pub message: Option<String>,
    /// Rows dropped because they could not be parsed.
    pub skipped: usize,
}

impl RenderOutput {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            view: None,
            title: None,
            pager: None,
            legend: Vec::new(),
            message: Some(message.into()),
            skipped: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.view.is_some()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Renders calendars for a host with fixed options and colour lookups.
#[derive(Debug, Clone, Default)]
pub struct CalendarRenderer {
    options: CalendarOptions,
    lookup: StripeLookup,
}

impl CalendarRenderer {
    pub fn new(options: CalendarOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            lookup: StripeLookup::default(),
        })
    }

    pub fn with_lookup(mut self, lookup: StripeLookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    /// Argument for the configured calendar type around `today`.
    pub fn default_argument(&self, today: NaiveDate) -> DateArgument {
        DateArgument::for_date(self.options.calendar_type.token_kind(), today)
    }

    /// Every legend entry for the configured mode, whether used or not.
    pub fn legend_block(&self) -> Vec<Stripe> {
        self.lookup.legend(self.options.legend)
    }

    /// Builds the calendar page `argument` names from the host's rows.
    #[tracing::instrument(skip(self, rows))]
    pub fn render(&self, argument: &DateArgument, rows: Vec<EventRow>) -> RenderOutput {
        let range = match argument.range() {
            Ok(range) => range,
            Err(err) => {
                info!(error = %err, "Invalid calendar argument");
                return RenderOutput::invalid(err.to_string());
            }
        };

        let (mut events, skipped) = normalize_rows(rows);
        annotate_all(&mut events, self.options.legend, &self.lookup);

        let index = EventIndex::build(&events, &range);
        let view = build_view(&GridContext::new(&range, &index, &self.options));
        let legend = collect_legend(events.iter().filter(|event| overlaps(event, &range)));

        debug!(
            events = events.len(),
            clones = index.len(),
            skipped,
            legend = legend.len(),
            "Rendered calendar"
        );

        RenderOutput {
            view: Some(view),
            title: argument.title(),
            pager: Pager::for_argument(argument),
            legend,
            message: None,
            skipped,
        }
    }

    /// Same as [`CalendarRenderer::render`] for rows given as a JSON array.
    pub fn render_json(&self, argument: &DateArgument, rows_json: &str) -> Result<String> {
        let rows: Vec<EventRow> = serde_json::from_str(rows_json)?;
        self.render(argument, rows).to_json()
    }
}

fn overlaps(event: &CalendarEvent, range: &DateRange) -> bool {
    event.first_day() <= range.max_date() && event.last_day() >= range.min_date()
}

#[cfg(test)]
mod tests {
    use calgrid_core::argument::DateTokenKind;
    use calgrid_core::calendar::{CalendarType, MaxItemsBehavior};
    use calgrid_core::legend::LegendMode;

    use super::*;
    use crate::error::RenderError;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn month(value: &str) -> DateArgument {
        DateArgument::new(DateTokenKind::YearMonth).with_value(value)
    }

    fn rows() -> Vec<EventRow> {
        vec![
            EventRow::new("1", "2024-03-04 10:00:00")
                .with_end("2024-03-06 15:00:00")
                .with_category("article"),
            EventRow::new("2", "2024-03-07 09:00:00").with_category("page"),
            EventRow::new("3", "2024-04-10 09:00:00").with_category("event"),
            EventRow::new("4", "whenever"),
        ]
    }

    fn lookup() -> StripeLookup {
        StripeLookup::new()
            .with_content_type("article", "Article", "#ff0000")
            .unwrap()
            .with_content_type("page", "Basic page", "#00ff00")
            .unwrap()
            .with_content_type("event", "Event", "#0000ff")
            .unwrap()
    }

    fn renderer() -> CalendarRenderer {
        let options = CalendarOptions::default().with_legend(LegendMode::ContentType);
        CalendarRenderer::new(options).unwrap().with_lookup(lookup())
    }

    #[test]
    fn test_render_month() {
        let output = renderer().render(&month("202403"), rows());

        assert!(output.is_valid());
        assert_eq!(output.title.as_deref(), Some("March 2024"));
        assert_eq!(output.skipped, 1);
        assert_eq!(output.message, None);

        let Some(CalendarView::Month(view)) = output.view else {
            panic!("expected a month view");
        };
        assert_eq!(view.weeks[1].grid.multiday[0][0].colspan(), 3);
    }

    #[test]
    fn test_render_pager_crosses_years() {
        let output = renderer().render(&month("202401"), Vec::new());

        assert_eq!(
            output.pager,
            Some(Pager {
                previous: Some("202312".to_string()),
                current: "202401".to_string(),
                next: Some("202402".to_string()),
            })
        );
    }

    #[test]
    fn test_render_legend_only_lists_visible_stripes() {
        let output = renderer().render(&month("202403"), rows());

        let labels: Vec<&str> = output.legend.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Article", "Basic page"]);
        assert_eq!(renderer().legend_block().len(), 3);
    }

    #[test]
    fn test_render_invalid_argument() {
        let output = renderer().render(&month("202413"), rows());

        assert!(!output.is_valid());
        assert_eq!(output.pager, None);
        assert_eq!(
            output.message.as_deref(),
            Some("The value 202413 is not a valid date argument for month")
        );

        let missing = renderer().render(&DateArgument::new(DateTokenKind::Year), rows());
        assert_eq!(
            missing.message.as_deref(),
            Some("No calendar date argument value was provided.")
        );
    }

    #[test]
    fn test_default_argument_validates() {
        let options = CalendarOptions::default().with_calendar_type(CalendarType::Week);
        let renderer = CalendarRenderer::new(options).unwrap();

        let argument = renderer.default_argument(make_date(2024, 12, 30));

        assert_eq!(argument.value.as_deref(), Some("202501"));
        assert!(argument.validate_value());
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let options = CalendarOptions::default().with_week_starts_on(8);

        assert!(matches!(
            CalendarRenderer::new(options),
            Err(RenderError::Options(_))
        ));
    }

    #[test]
    fn test_render_json() {
        let options = CalendarOptions::default().with_max_items(1, MaxItemsBehavior::ShowLink);
        let renderer = CalendarRenderer::new(options).unwrap();
        let rows = r#"[
            {"id": "a", "start": "2024-03-07 09:00:00"},
            {"id": "b", "start": "2024-03-07 11:00:00"}
        ]"#;

        let json = renderer.render_json(&month("202403"), rows).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["view"]["type"], "month");
        assert_eq!(value["title"], "March 2024");
        assert_eq!(value["skipped"], 0);
        assert!(renderer.render_json(&month("202403"), "{").is_err());
    }
}
