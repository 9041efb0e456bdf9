use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::color::{is_stripe_color, normalize_color};
use crate::calendar::{CalendarEvent, Stripe};

/// What the colour stripes of a calendar categorise by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendMode {
    #[default]
    None,
    ContentType,
    Taxonomy,
}

/// Errors that can occur when building a stripe lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LegendError {
    #[error("Invalid color format for {key}: {color}")]
    InvalidColor { key: String, color: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Category {
    name: String,
    color: String,
}

/// Names and colours of content types and taxonomy terms for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripeLookup {
    content_types: BTreeMap<String, Category>,
    terms: BTreeMap<String, Category>,
}

impl StripeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a content type (bundle) with its display name and colour.
    pub fn with_content_type(
        mut self,
        bundle: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<Self, LegendError> {
        let (bundle, category) = checked_category(bundle.into(), name.into(), color.into())?;
        self.content_types.insert(bundle, category);
        Ok(self)
    }

    /// Registers a taxonomy term with its display name and colour.
    pub fn with_term(
        mut self,
        term_id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<Self, LegendError> {
        let (term_id, category) = checked_category(term_id.into(), name.into(), color.into())?;
        self.terms.insert(term_id, category);
        Ok(self)
    }

    fn categories(&self, mode: LegendMode) -> Option<&BTreeMap<String, Category>> {
        match mode {
            LegendMode::None => None,
            LegendMode::ContentType => Some(&self.content_types),
            LegendMode::Taxonomy => Some(&self.terms),
        }
    }

    fn stripe_for(&self, mode: LegendMode, key: &str) -> Option<Stripe> {
        let category = self.categories(mode)?.get(key)?;
        is_stripe_color(&category.color).then(|| Stripe::new(&category.name, &category.color))
    }

    /// Legend entries for `mode`, sorted by label.
    pub fn legend(&self, mode: LegendMode) -> Vec<Stripe> {
        let mut entries: Vec<Stripe> = self
            .categories(mode)
            .into_iter()
            .flat_map(|categories| categories.values())
            .filter(|category| is_stripe_color(&category.color))
            .map(|category| Stripe::new(&category.name, &category.color))
            .collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label));
        entries
    }
}

fn checked_category(
    key: String,
    name: String,
    color: String,
) -> Result<(String, Category), LegendError> {
    let color = color.trim();
    let color = if color.is_empty() {
        String::new()
    } else {
        normalize_color(color).ok_or_else(|| LegendError::InvalidColor {
            key: key.clone(),
            color: color.to_string(),
        })?
    };
    let name = if name.trim().is_empty() { key.clone() } else { name };
    Ok((key, Category { name, color }))
}

/// Appends the stripes `mode` assigns to `event`.
///
/// Content types give at most one stripe. Taxonomy mode adds one stripe per
/// coloured term, in the order the terms are attached.
pub fn annotate(event: &mut CalendarEvent, mode: LegendMode, lookup: &StripeLookup) {
    let stripes: Vec<Stripe> = match mode {
        LegendMode::None => Vec::new(),
        LegendMode::ContentType => event
            .category
            .as_deref()
            .and_then(|bundle| lookup.stripe_for(mode, bundle))
            .into_iter()
            .collect(),
        LegendMode::Taxonomy => event
            .terms
            .iter()
            .filter_map(|term| lookup.stripe_for(mode, term))
            .collect(),
    };

    for stripe in stripes {
        event.add_stripe(stripe);
    }
}

pub fn annotate_all(events: &mut [CalendarEvent], mode: LegendMode, lookup: &StripeLookup) {
    for event in events {
        annotate(event, mode, lookup);
    }
}

/// Distinct stripes used by `events`, in first-seen order.
pub fn collect_legend<'a, I>(events: I) -> Vec<Stripe>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let mut seen = HashSet::new();
    events
        .into_iter()
        .flat_map(|event| event.stripes())
        .filter(|stripe| seen.insert((*stripe).clone()))
        .cloned()
        .collect()
}
