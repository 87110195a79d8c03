//! Repository traits consumed by the site builder.
//!
//! Each trait is a read-only view over one record type. Implementations decide
//! where records come from; the builder only relies on the ordering and window
//! contracts documented on each method.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::DataError;
use crate::model::{Event, Group, Hackathon};

/// Time windows applied by event queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    /// How far back `filter_around` looks.
    pub around_past: TimeDelta,
    /// How far ahead `filter_around` looks.
    pub around_future: TimeDelta,
    /// Default lower bound for `filter_group`.
    pub group_past: TimeDelta,
}

impl Default for EventWindow {
    fn default() -> Self {
        Self {
            around_past: TimeDelta::days(14),
            around_future: TimeDelta::days(60),
            group_past: TimeDelta::days(90),
        }
    }
}

/// Read access to events.
pub trait EventRepository: Send + Sync {
    /// Every event, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if the backing source cannot be read.
    fn all(&self) -> Result<Vec<Event>, DataError>;

    /// Events within the repository's window around `now`.
    ///
    /// Results are ordered newest first: every event at or after `now` comes
    /// before every event before `now`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if the backing source cannot be read.
    fn filter_around(&self, now: DateTime<Utc>) -> Result<Vec<Event>, DataError>;

    /// Events owned by the group `slug` starting no earlier than `now - past`.
    ///
    /// `past` overrides the repository's default lower bound. There is no upper
    /// bound. Results are ordered newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if the backing source cannot be read.
    fn filter_group(
        &self,
        slug: &str,
        now: DateTime<Utc>,
        past: Option<TimeDelta>,
    ) -> Result<Vec<Event>, DataError>;
}

/// Read access to groups.
pub trait GroupRepository: Send + Sync {
    /// Every group, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if the backing source cannot be read.
    fn all(&self) -> Result<Vec<Group>, DataError>;

    /// Look up a group by slug. Unknown or empty slugs yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if the backing source cannot be read.
    fn find_by(&self, slug: &str) -> Result<Option<Group>, DataError>;
}

/// Read access to hackathons.
pub trait HackathonRepository: Send + Sync {
    /// Every hackathon, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if the backing source cannot be read.
    fn all(&self) -> Result<Vec<Hackathon>, DataError>;
}

/// The three repositories a build reads from.
pub struct Repositories {
    pub events: Box<dyn EventRepository>,
    pub groups: Box<dyn GroupRepository>,
    pub hackathons: Box<dyn HackathonRepository>,
}

impl Repositories {
    /// Bundle existing repository implementations.
    #[must_use]
    pub fn new(
        events: impl EventRepository + 'static,
        groups: impl GroupRepository + 'static,
        hackathons: impl HackathonRepository + 'static,
    ) -> Self {
        Self {
            events: Box::new(events),
            groups: Box::new(groups),
            hackathons: Box::new(hackathons),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
