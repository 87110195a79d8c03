//! In-memory repository implementations.
//!
//! Records are held in plain vectors for the lifetime of a build. Use the
//! builder methods to assemble fixtures in tests.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::DataError;
use crate::model::{Event, Group, Hackathon};
use crate::repository::{EventRepository, EventWindow, GroupRepository, HackathonRepository};

/// Events held in memory.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
    window: EventWindow,
}

impl EventStore {
    /// Create a store with the given records and query windows.
    #[must_use]
    pub fn new(events: Vec<Event>, window: EventWindow) -> Self {
        Self { events, window }
    }

    /// Add an event.
    #[must_use]
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Replace the query windows.
    #[must_use]
    pub fn with_window(mut self, window: EventWindow) -> Self {
        self.window = window;
        self
    }

    /// Clone the events matching `keep`, newest first.
    fn select(&self, keep: impl Fn(&Event) -> bool) -> Vec<Event> {
        let mut selected: Vec<Event> = self.events.iter().filter(|e| keep(e)).cloned().collect();
        // Stable sort keeps storage order between events at the same instant.
        selected.sort_by(|a, b| b.when.cmp(&a.when));
        selected
    }
}

impl EventRepository for EventStore {
    fn all(&self) -> Result<Vec<Event>, DataError> {
        Ok(self.events.clone())
    }

    fn filter_around(&self, now: DateTime<Utc>) -> Result<Vec<Event>, DataError> {
        let start = now - self.window.around_past;
        let end = now + self.window.around_future;
        Ok(self.select(|e| e.when >= start && e.when <= end))
    }

    fn filter_group(
        &self,
        slug: &str,
        now: DateTime<Utc>,
        past: Option<TimeDelta>,
    ) -> Result<Vec<Event>, DataError> {
        let start = now - past.unwrap_or(self.window.group_past);
        Ok(self.select(|e| e.group_slug == slug && e.when >= start))
    }
}

/// Groups held in memory.
#[derive(Debug, Default)]
pub struct GroupStore {
    groups: Vec<Group>,
}

impl GroupStore {
    /// Create a store with the given records.
    #[must_use]
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Add a group.
    #[must_use]
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }
}

impl GroupRepository for GroupStore {
    fn all(&self) -> Result<Vec<Group>, DataError> {
        Ok(self.groups.clone())
    }

    fn find_by(&self, slug: &str) -> Result<Option<Group>, DataError> {
        if slug.is_empty() {
            return Ok(None);
        }
        Ok(self.groups.iter().find(|g| g.slug == slug).cloned())
    }
}

/// Hackathons held in memory.
#[derive(Debug, Default)]
pub struct HackathonStore {
    hackathons: Vec<Hackathon>,
}

impl HackathonStore {
    /// Create a store with the given records.
    #[must_use]
    pub fn new(hackathons: Vec<Hackathon>) -> Self {
        Self { hackathons }
    }

    /// Add a hackathon.
    #[must_use]
    pub fn with_hackathon(mut self, hackathon: Hackathon) -> Self {
        self.hackathons.push(hackathon);
        self
    }
}

impl HackathonRepository for HackathonStore {
    fn all(&self) -> Result<Vec<Hackathon>, DataError> {
        Ok(self.hackathons.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn event(id: &str, group: &str, offset_days: i64) -> Event {
        Event {
            id: id.to_owned(),
            name: format!("Event {id}"),
            url: None,
            when: now() + TimeDelta::days(offset_days),
            venue: None,
            description: String::new(),
            group_slug: group.to_owned(),
            joint_with: None,
        }
    }

    fn group(slug: &str) -> Group {
        Group {
            slug: slug.to_owned(),
            name: slug.to_uppercase(),
            url: None,
            teaser: None,
            extra: BTreeMap::new(),
        }
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_all_preserves_storage_order() {
        let store = EventStore::default()
            .with_event(event("b", "g", 5))
            .with_event(event("a", "g", -5));

        assert_eq!(ids(&store.all().unwrap()), vec!["b", "a"]);
    }

    #[test]
    fn test_filter_around_applies_window() {
        let store = EventStore::default()
            .with_event(event("too-old", "g", -30))
            .with_event(event("recent", "g", -3))
            .with_event(event("soon", "g", 2))
            .with_event(event("too-far", "g", 120));

        let events = store.filter_around(now()).unwrap();

        assert_eq!(ids(&events), vec!["soon", "recent"]);
    }

    #[test]
    fn test_filter_around_orders_newest_first() {
        let store = EventStore::default()
            .with_event(event("past-2", "g", -2))
            .with_event(event("future-10", "g", 10))
            .with_event(event("past-1", "g", -1))
            .with_event(event("future-3", "g", 3));

        let events = store.filter_around(now()).unwrap();

        assert_eq!(
            ids(&events),
            vec!["future-10", "future-3", "past-1", "past-2"]
        );
    }

    #[test]
    fn test_filter_around_includes_window_edges() {
        let window = EventWindow {
            around_past: TimeDelta::days(1),
            around_future: TimeDelta::days(1),
            group_past: TimeDelta::days(1),
        };
        let store = EventStore::default()
            .with_window(window)
            .with_event(event("start", "g", -1))
            .with_event(event("end", "g", 1));

        assert_eq!(ids(&store.filter_around(now()).unwrap()), vec!["end", "start"]);
    }

    #[test]
    fn test_filter_group_matches_slug_only() {
        let store = EventStore::default()
            .with_event(event("mine", "python", 1))
            .with_event(event("theirs", "js", 1));

        let events = store.filter_group("python", now(), None).unwrap();

        assert_eq!(ids(&events), vec!["mine"]);
    }

    #[test]
    fn test_filter_group_default_lower_bound_and_no_upper_bound() {
        let store = EventStore::default()
            .with_event(event("ancient", "python", -400))
            .with_event(event("last-month", "python", -30))
            .with_event(event("next-year", "python", 365));

        let events = store.filter_group("python", now(), None).unwrap();

        assert_eq!(ids(&events), vec!["next-year", "last-month"]);
    }

    #[test]
    fn test_filter_group_past_override() {
        let store = EventStore::default()
            .with_event(event("ancient", "python", -400))
            .with_event(event("last-month", "python", -30));

        let events = store
            .filter_group("python", now(), Some(TimeDelta::days(50 * 365)))
            .unwrap();

        assert_eq!(ids(&events), vec!["last-month", "ancient"]);
    }

    #[test]
    fn test_find_by_existing_group() {
        let store = GroupStore::default()
            .with_group(group("python"))
            .with_group(group("js"));

        assert_eq!(store.find_by("js").unwrap(), Some(group("js")));
    }

    #[test]
    fn test_find_by_missing_or_empty_slug() {
        let store = GroupStore::default().with_group(group("python"));

        assert_eq!(store.find_by("rust").unwrap(), None);
        assert_eq!(store.find_by("").unwrap(), None);
    }

    #[test]
    fn test_hackathon_store_all() {
        let store = HackathonStore::default().with_hackathon(Hackathon {
            slug: "hack-2024".to_owned(),
            name: "Hack 2024".to_owned(),
            url: None,
            description: String::new(),
        });

        assert_eq!(store.all().unwrap().len(), 1);
    }
}
