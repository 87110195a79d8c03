//! Domain records rendered by the site builder.
//!
//! Records are read-only snapshots: repositories hand out owned copies and
//! nothing in the build pipeline mutates them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled meetup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, also used as the event's URL segment.
    #[serde(default)]
    pub id: String,
    /// Display title.
    pub name: String,
    /// External link to the event listing.
    #[serde(default)]
    pub url: Option<String>,
    /// Start instant.
    pub when: DateTime<Utc>,
    /// Venue name or address.
    #[serde(default)]
    pub venue: Option<String>,
    /// Free-form HTML description as supplied by the organizer.
    #[serde(default)]
    pub description: String,
    /// Slug of the owning group. Empty for most joint events.
    #[serde(default)]
    pub group_slug: String,
    /// Co-host marker. A joint event has no single owning group.
    #[serde(default)]
    pub joint_with: Option<String>,
}

impl Event {
    /// Whether the event is co-hosted by several groups.
    #[must_use]
    pub fn is_joint(&self) -> bool {
        self.joint_with.is_some()
    }
}

/// A community group that organizes events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier, also used as the group's URL segment.
    #[serde(default)]
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Group homepage.
    #[serde(default)]
    pub url: Option<String>,
    /// Short one-line pitch.
    #[serde(default)]
    pub teaser: Option<String>,
    /// Additional display attributes (colors, icons, social links).
    ///
    /// Flattened on serialization so templates read `group.color` directly.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A hackathon listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hackathon {
    /// Unique identifier, also used as the hackathon's URL segment.
    #[serde(default)]
    pub slug: String,
    /// Display name.
    pub name: String,
    /// External link.
    #[serde(default)]
    pub url: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_event_is_joint() {
        let mut event = Event {
            id: "e1".to_owned(),
            name: "Meetup".to_owned(),
            url: None,
            when: Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap(),
            venue: None,
            description: String::new(),
            group_slug: "python".to_owned(),
            joint_with: None,
        };
        assert!(!event.is_joint());

        event.joint_with = Some("python,js".to_owned());
        assert!(event.is_joint());
    }

    #[test]
    fn test_event_deserialize_defaults() {
        let yaml = "
name: Joint Social
when: 2024-05-01T18:00:00Z
joint_with: everyone
";
        let event: Event = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(event.id, "");
        assert_eq!(event.group_slug, "");
        assert_eq!(event.joint_with.as_deref(), Some("everyone"));
        assert_eq!(
            event.when,
            Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_group_extra_attributes_flatten() {
        let yaml = "
slug: python
name: Python Frederick
color: emerald
icon: snake
";
        let group: Group = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(group.extra.get("color"), Some(&serde_json::json!("emerald")));

        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["color"], "emerald");
        assert_eq!(json["icon"], "snake");
        assert_eq!(json["name"], "Python Frederick");
    }
}
