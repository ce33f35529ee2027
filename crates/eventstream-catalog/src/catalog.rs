//! Seeded Catalogs
//!
//! The launch set of events and categories. Immutable once constructed;
//! lookups return `Option` and listings preserve declaration order.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;

use crate::model::{Category, CategoryId, Event, EventId};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    // Seed literals are always valid calendar dates
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

/// The event catalog
pub struct EventCatalog {
    events: Vec<Event>,
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCatalog {
    /// The events scheduled at launch
    pub fn new() -> Self {
        let events = vec![
            Event {
                id: EventId::new("techcon-2024"),
                title: "TechCon 2024".into(),
                category: CategoryId::new("it"),
                starts_at: at(2024, 12, 15, 9, 0),
                venue: "Tech Convention Center".into(),
                expected_attendees: 1200,
                ticket_price: dec!(149),
                featured: true,
            },
            Event {
                id: EventId::new("wedding-expo-spring"),
                title: "Wedding Expo Spring".into(),
                category: CategoryId::new("wedding"),
                starts_at: at(2025, 1, 20, 10, 0),
                venue: "Grand Ballroom".into(),
                expected_attendees: 450,
                ticket_price: dec!(25),
                featured: false,
            },
            Event {
                id: EventId::new("summer-music-festival"),
                title: "Summer Music Festival".into(),
                category: CategoryId::new("music"),
                starts_at: at(2025, 2, 5, 16, 0),
                venue: "Open Air Stadium".into(),
                expected_attendees: 5000,
                ticket_price: dec!(89),
                featured: true,
            },
            Event {
                id: EventId::new("business-leaders-summit"),
                title: "Business Leaders Summit".into(),
                category: CategoryId::new("corporate"),
                starts_at: at(2025, 2, 12, 8, 30),
                venue: "Executive Towers".into(),
                expected_attendees: 300,
                ticket_price: dec!(299),
                featured: false,
            },
            Event {
                id: EventId::new("ai-ml-conf"),
                title: "AI & Machine Learning Conf".into(),
                category: CategoryId::new("it"),
                starts_at: at(2025, 2, 28, 9, 0),
                venue: "Innovation Hub".into(),
                expected_attendees: 800,
                ticket_price: dec!(199),
                featured: false,
            },
            Event {
                id: EventId::new("jazz-night-live"),
                title: "Jazz Night Live".into(),
                category: CategoryId::new("music"),
                starts_at: at(2025, 3, 8, 19, 0),
                venue: "Jazz Lounge".into(),
                expected_attendees: 200,
                ticket_price: dec!(45),
                featured: false,
            },
        ];

        Self { events }
    }

    /// All events, in declaration order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Look up a single event
    ///
    /// Matching is case-insensitive; ids normalize through [`EventId::new`].
    pub fn get(&self, id: &str) -> Option<&Event> {
        let wanted = EventId::new(id);
        self.events.iter().find(|e| e.id == wanted)
    }

    /// Events starting after `now`, soonest first
    pub fn upcoming(&self, now: DateTime<Utc>) -> Vec<&Event> {
        let mut upcoming: Vec<&Event> =
            self.events.iter().filter(|e| e.starts_at > now).collect();
        upcoming.sort_by_key(|e| e.starts_at);
        upcoming
    }

    /// Events promoted on the home page
    pub fn featured(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.featured).collect()
    }

    /// Events in a category, declaration order
    pub fn by_category(&self, category: &str) -> Vec<&Event> {
        let wanted = CategoryId::new(category);
        self.events
            .iter()
            .filter(|e| e.category == wanted)
            .collect()
    }
}

/// The category catalog
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCatalog {
    /// The four launch categories
    pub fn new() -> Self {
        let categories = vec![
            Category {
                id: CategoryId::new("it"),
                name: "IT & Tech".into(),
                description: "Tech conferences, hackathons, and developer meetups".into(),
                event_count: 156,
                upcoming_count: 45,
                avg_attendees: 500,
                popular_venues: vec![
                    "Tech Convention Center".into(),
                    "Innovation Hub".into(),
                    "Digital Campus".into(),
                ],
            },
            Category {
                id: CategoryId::new("wedding"),
                name: "Wedding".into(),
                description: "Wedding expos, bridal shows, and ceremony planning".into(),
                event_count: 89,
                upcoming_count: 28,
                avg_attendees: 300,
                popular_venues: vec![
                    "Grand Ballroom".into(),
                    "Garden Estate".into(),
                    "Seaside Resort".into(),
                ],
            },
            Category {
                id: CategoryId::new("music"),
                name: "Music".into(),
                description: "Concerts, festivals, and live performances".into(),
                event_count: 234,
                upcoming_count: 78,
                avg_attendees: 1500,
                popular_venues: vec![
                    "City Arena".into(),
                    "Open Air Stadium".into(),
                    "Jazz Lounge".into(),
                ],
            },
            Category {
                id: CategoryId::new("corporate"),
                name: "Corporate".into(),
                description: "Business conferences, networking, and seminars".into(),
                event_count: 178,
                upcoming_count: 52,
                avg_attendees: 400,
                popular_venues: vec![
                    "Business Center".into(),
                    "Executive Towers".into(),
                    "Conference Hall".into(),
                ],
            },
        ];

        Self { categories }
    }

    /// All categories, in declaration order
    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a single category
    ///
    /// Matching is case-insensitive, like [`EventCatalog::get`].
    pub fn get(&self, id: &str) -> Option<&Category> {
        let wanted = CategoryId::new(id);
        self.categories.iter().find(|c| c.id == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_keep_declaration_order() {
        let catalog = EventCatalog::new();
        let ids: Vec<&str> = catalog.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "techcon-2024",
                "wedding-expo-spring",
                "summer-music-festival",
                "business-leaders-summit",
                "ai-ml-conf",
                "jazz-night-live",
            ]
        );
    }

    #[test]
    fn test_event_lookup() {
        let catalog = EventCatalog::new();

        let event = catalog.get("techcon-2024").unwrap();
        assert_eq!(event.title, "TechCon 2024");
        assert_eq!(event.ticket_price, dec!(149));

        assert!(catalog.get("nonexistent").is_none());
    }

    #[test]
    fn test_upcoming_sorts_by_start_time() {
        let catalog = EventCatalog::new();

        let now = at(2025, 1, 1, 0, 0);
        let upcoming = catalog.upcoming(now);
        assert_eq!(upcoming.len(), 5);
        assert_eq!(upcoming[0].id.as_str(), "wedding-expo-spring");
        assert!(upcoming.windows(2).all(|w| w[0].starts_at <= w[1].starts_at));

        assert!(catalog.upcoming(at(2026, 1, 1, 0, 0)).is_empty());
    }

    #[test]
    fn test_featured_events() {
        let catalog = EventCatalog::new();
        let featured: Vec<&str> = catalog
            .featured()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(featured, vec!["techcon-2024", "summer-music-festival"]);
    }

    #[test]
    fn test_every_event_belongs_to_a_known_category() {
        let events = EventCatalog::new();
        let categories = CategoryCatalog::new();

        for event in events.events() {
            assert!(
                categories.get(event.category.as_str()).is_some(),
                "event {} references unknown category {}",
                event.id,
                event.category
            );
        }
    }

    #[test]
    fn test_category_lookup_and_order() {
        let catalog = CategoryCatalog::new();
        let ids: Vec<&str> = catalog.list().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["it", "wedding", "music", "corporate"]);

        let music = catalog.get("music").unwrap();
        assert_eq!(music.name, "Music");
        assert_eq!(music.avg_attendees, 1500);
    }

    #[test]
    fn test_by_category_filter() {
        let catalog = EventCatalog::new();

        let tech: Vec<&str> = catalog
            .by_category("it")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(tech, vec!["techcon-2024", "ai-ml-conf"]);

        assert!(catalog.by_category("cooking").is_empty());
    }

    #[test]
    fn test_lookups_ignore_case() {
        let events = EventCatalog::new();
        assert!(events.get("TECHCON-2024").is_some());
        assert_eq!(events.by_category("Music").len(), 2);

        let categories = CategoryCatalog::new();
        assert!(categories.get("IT").is_some());
    }
}
