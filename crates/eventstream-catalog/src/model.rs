//! Catalog Models
//!
//! Events and categories shown on the browse surfaces. Read-only seed data;
//! ticket purchase is not modeled here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Event identifier (slug, e.g. "techcon-2024")
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category identifier (slug, e.g. "music")
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A streamable event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier
    pub id: EventId,

    /// Display title
    pub title: String,

    /// Category this event belongs to
    pub category: CategoryId,

    /// Scheduled start (UTC)
    pub starts_at: DateTime<Utc>,

    /// Venue name
    pub venue: String,

    /// Expected audience size
    pub expected_attendees: u32,

    /// Ticket price in USD
    pub ticket_price: Decimal,

    /// Promoted on the home page
    pub featured: bool,
}

/// An event category
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier
    pub id: CategoryId,

    /// Display name (e.g. "IT & Tech")
    pub name: String,

    /// Short description for the category card
    pub description: String,

    /// Total events ever hosted
    pub event_count: u32,

    /// Events currently scheduled
    pub upcoming_count: u32,

    /// Typical audience size
    pub avg_attendees: u32,

    /// Venues this category most often runs in
    pub popular_venues: Vec<String>,
}
