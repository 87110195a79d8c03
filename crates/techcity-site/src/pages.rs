//! Typed template contexts.
//!
//! Each page type names its template and carries exactly the fields that
//! template reads. Field names are the variable names templates see.

use chrono::{DateTime, Utc};
use serde::Serialize;
use techcity_data::{Event, Group, Hackathon};

/// A template context bound to one template.
pub(crate) trait Page: Serialize {
    /// Template name, relative to the template directory.
    const TEMPLATE: &'static str;
}

/// An event paired with its owning group. Joint events have no group.
#[derive(Debug, Serialize)]
pub(crate) struct EventWithGroup {
    pub event: Event,
    pub group: Option<Group>,
}

/// Home page.
#[derive(Debug, Serialize)]
pub(crate) struct IndexPage<'a> {
    /// Upcoming events, soonest first.
    pub upcoming_events_with_group: Vec<EventWithGroup>,
    /// Past events within the window, most recent first.
    pub recent_events_with_group: Vec<EventWithGroup>,
    pub groups: &'a [Group],
    pub hackathons: &'a [Hackathon],
    pub now: DateTime<Utc>,
}

impl Page for IndexPage<'_> {
    const TEMPLATE: &'static str = "index.html";
}

/// Single event page.
#[derive(Debug, Serialize)]
pub(crate) struct EventPage<'a> {
    /// Styled description markup, rendered unescaped.
    pub description: String,
    pub event: &'a Event,
    pub group: Option<Group>,
}

impl Page for EventPage<'_> {
    const TEMPLATE: &'static str = "event.html";
}

/// An event on a group landing page, flagged as upcoming or past.
#[derive(Debug, Serialize)]
pub(crate) struct GroupEvent<'a> {
    #[serde(flatten)]
    pub event: &'a Event,
    /// `when >= now`, compared as instants.
    pub upcoming: bool,
}

/// Group landing page with events around `now`.
#[derive(Debug, Serialize)]
pub(crate) struct GroupPage<'a> {
    pub events: Vec<GroupEvent<'a>>,
    pub group: &'a Group,
    pub now: DateTime<Utc>,
}

impl Page for GroupPage<'_> {
    const TEMPLATE: &'static str = "group.html";
}

/// Full event history for a group.
#[derive(Debug, Serialize)]
pub(crate) struct GroupEventsPage<'a> {
    pub events: &'a [Event],
    pub group: &'a Group,
}

impl Page for GroupEventsPage<'_> {
    const TEMPLATE: &'static str = "group_events.html";
}

/// Single hackathon page.
#[derive(Debug, Serialize)]
pub(crate) struct HackathonPage<'a> {
    pub hackathon: &'a Hackathon,
}

impl Page for HackathonPage<'_> {
    const TEMPLATE: &'static str = "hackathon.html";
}

/// Every group and hackathon, for the CSS class scanner.
#[derive(Debug, Serialize)]
pub(crate) struct PalettePage<'a> {
    pub groups: &'a [Group],
    pub hackathons: &'a [Hackathon],
}

impl Page for PalettePage<'_> {
    const TEMPLATE: &'static str = "palette.html";
}
