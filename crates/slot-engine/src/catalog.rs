//! Client-side filtering and ordering of event listings.
//!
//! Every criterion in [`EventFilter`] is optional; an empty filter keeps all
//! events. Sorting is stable, so events that compare equal keep their input
//! order.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::occupancy::EventId;
use crate::time::TimeOfDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Active,
    Full,
    Inactive,
}

/// The listing fields filtering and sorting look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: f64,
    pub event_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub status: EventStatus,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub reservation_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventFilter {
    /// Case-insensitive substring of name, description or city.
    pub query: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Inclusive.
    pub date_from: Option<NaiveDate>,
    /// Inclusive.
    pub date_to: Option<NaiveDate>,
    pub country: Option<String>,
    pub city: Option<String>,
    /// Keep events in any of these categories. Empty keeps all.
    pub categories: BTreeSet<String>,
    pub status: Option<EventStatus>,
}

impl EventFilter {
    pub fn matches(&self, event: &EventSummary) -> bool {
        if let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let hit = [&event.name, &event.description, &event.city]
                .iter()
                .any(|field| field.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| event.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| event.price > max) {
            return false;
        }
        if self.date_from.is_some_and(|from| event.event_date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| event.event_date > to) {
            return false;
        }
        if self.country.as_ref().is_some_and(|c| *c != event.country) {
            return false;
        }
        if self.city.as_ref().is_some_and(|c| *c != event.city) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&event.category) {
            return false;
        }
        if self.status.is_some_and(|s| s != event.status) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Date, then start time.
    DateAsc,
    DateDesc,
    PriceAsc,
    PriceDesc,
    /// Case-insensitive.
    #[default]
    NameAsc,
    NameDesc,
    /// Most reservations first.
    PopularityDesc,
}

impl SortOrder {
    pub fn compare(self, a: &EventSummary, b: &EventSummary) -> Ordering {
        match self {
            Self::DateAsc => when(a).cmp(&when(b)),
            Self::DateDesc => when(b).cmp(&when(a)),
            Self::PriceAsc => a.price.total_cmp(&b.price),
            Self::PriceDesc => b.price.total_cmp(&a.price),
            Self::NameAsc => by_name(a, b),
            Self::NameDesc => by_name(b, a),
            Self::PopularityDesc => b.reservation_count.cmp(&a.reservation_count),
        }
    }
}

fn when(event: &EventSummary) -> (NaiveDate, TimeOfDay) {
    (event.event_date, event.start_time)
}

fn by_name(a: &EventSummary, b: &EventSummary) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

pub fn filter_events<'a>(events: &'a [EventSummary], filter: &EventFilter) -> Vec<&'a EventSummary> {
    events.iter().filter(|e| filter.matches(e)).collect()
}

pub fn sort_events(events: &mut [&EventSummary], order: SortOrder) {
    events.sort_by(|a, b| order.compare(a, b));
}

/// Filter then sort.
pub fn browse<'a>(events: &'a [EventSummary], filter: &EventFilter, order: SortOrder) -> Vec<&'a EventSummary> {
    let mut result = filter_events(events, filter);
    sort_events(&mut result, order);
    result
}
