//! Upcoming/recent split for the home page.

use chrono::{DateTime, Utc};
use techcity_data::Event;

/// Events split around a snapshot instant.
#[derive(Debug, PartialEq, Eq)]
pub struct Partitioned<T> {
    /// Events collected before the first past-due event, in input order.
    pub upcoming: Vec<T>,
    /// The first past-due event and everything after it, in input order.
    pub recent: Vec<T>,
}

impl<T> Default for Partitioned<T> {
    fn default() -> Self {
        Self {
            upcoming: Vec::new(),
            recent: Vec::new(),
        }
    }
}

/// Split `events` with a single forward scan.
///
/// Events land in `upcoming` until the first event with `when < now`; from
/// then on every event lands in `recent`, whatever its time. The input must
/// therefore place all upcoming events before all past events, which is the
/// newest-first order `EventRepository::filter_around` returns.
pub fn partition_by_now<I>(events: I, now: DateTime<Utc>) -> Partitioned<Event>
where
    I: IntoIterator<Item = Event>,
{
    let mut partitioned = Partitioned::default();
    let mut past_due = false;
    for event in events {
        if event.when < now {
            past_due = true;
        }
        if past_due {
            partitioned.recent.push(event);
        } else {
            partitioned.upcoming.push(event);
        }
    }
    partitioned
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn event(id: &str, offset_hours: i64) -> Event {
        Event {
            id: id.to_owned(),
            name: id.to_owned(),
            url: None,
            when: now() + TimeDelta::hours(offset_hours),
            venue: None,
            description: String::new(),
            group_slug: "g".to_owned(),
            joint_with: None,
        }
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_partition_newest_first() {
        let events = vec![
            event("far", 48),
            event("near", 2),
            event("just-past", -1),
            event("older", -30),
        ];

        let split = partition_by_now(events, now());

        assert_eq!(ids(&split.upcoming), vec!["far", "near"]);
        assert_eq!(ids(&split.recent), vec!["just-past", "older"]);
    }

    #[test]
    fn test_partition_event_at_now_is_upcoming() {
        let split = partition_by_now(vec![event("now", 0)], now());

        assert_eq!(ids(&split.upcoming), vec!["now"]);
        assert!(split.recent.is_empty());
    }

    #[test]
    fn test_partition_switch_is_irreversible() {
        // A future event after the first past-due one still lands in recent.
        let events = vec![event("past", -1), event("future", 5)];

        let split = partition_by_now(events, now());

        assert!(split.upcoming.is_empty());
        assert_eq!(ids(&split.recent), vec!["past", "future"]);
    }

    #[test]
    fn test_partition_past_events_never_upcoming() {
        let events = vec![
            event("a", 10),
            event("b", -2),
            event("c", -3),
            event("d", -4),
        ];

        let split = partition_by_now(events, now());

        assert!(split.upcoming.iter().all(|e| e.when >= now()));
        assert_eq!(ids(&split.recent), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_partition_empty() {
        let split = partition_by_now(Vec::new(), now());

        assert_eq!(split, Partitioned::default());
    }
}
