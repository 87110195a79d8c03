//! Loads repositories from a YAML data directory.
//!
//! Expected layout, one record per file:
//!
//! ```text
//! data/
//!   groups/<slug>.yaml
//!   events/<id>.yaml
//!   hackathons/<slug>.yaml
//! ```
//!
//! A record without an explicit `id`/`slug` takes its file stem. Missing
//! sub-directories are treated as empty collections.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::DataError;
use crate::memory::{EventStore, GroupStore, HackathonStore};
use crate::model::{Event, Group, Hackathon};
use crate::repository::{EventWindow, Repositories};

const GROUPS_DIR: &str = "groups";
const EVENTS_DIR: &str = "events";
const HACKATHONS_DIR: &str = "hackathons";

impl Repositories {
    /// Instantiate in-memory repositories from a data directory.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if a record file cannot be read or parsed, or if two
    /// records share an identity.
    pub fn load(data_dir: &Path, window: EventWindow) -> Result<Self, DataError> {
        let groups: Vec<Group> = load_records(&data_dir.join(GROUPS_DIR))?;
        let events: Vec<Event> = load_records(&data_dir.join(EVENTS_DIR))?;
        let hackathons: Vec<Hackathon> = load_records(&data_dir.join(HACKATHONS_DIR))?;

        tracing::info!(
            groups = groups.len(),
            events = events.len(),
            hackathons = hackathons.len(),
            "Loaded data from {}",
            data_dir.display()
        );

        Ok(Self::new(
            EventStore::new(events, window),
            GroupStore::new(groups),
            HackathonStore::new(hackathons),
        ))
    }
}

/// A record stored as one YAML file.
trait Record: DeserializeOwned {
    /// Record type name for log and error messages.
    const KIND: &'static str;

    /// Mutable access to the identity field (`id` or `slug`).
    fn identity_mut(&mut self) -> &mut String;
}

impl Record for Group {
    const KIND: &'static str = "group";

    fn identity_mut(&mut self) -> &mut String {
        &mut self.slug
    }
}

impl Record for Event {
    const KIND: &'static str = "event";

    fn identity_mut(&mut self) -> &mut String {
        &mut self.id
    }
}

impl Record for Hackathon {
    const KIND: &'static str = "hackathon";

    fn identity_mut(&mut self) -> &mut String {
        &mut self.slug
    }
}

/// Parse every `*.yaml`/`*.yml` file in `dir`, in path order.
fn load_records<T: Record>(dir: &Path) -> Result<Vec<T>, DataError> {
    let what = T::KIND;
    if !dir.is_dir() {
        tracing::debug!("No {what} directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for path in yaml_files(dir)? {
        let content = fs::read_to_string(&path).map_err(|e| DataError::io(e, &path))?;
        let mut record: T =
            serde_yaml::from_str(&content).map_err(|e| DataError::malformed(e, &path))?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let identity = record.identity_mut();
        if identity.is_empty() {
            identity.clone_from(&stem);
        }
        let id = identity.clone();
        if !seen.insert(id.clone()) {
            return Err(DataError::duplicate(what, &id, &path));
        }
        records.push(record);
    }
    Ok(records)
}

/// List YAML files directly inside `dir`, sorted by path.
fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>, DataError> {
    let entries = fs::read_dir(dir).map_err(|e| DataError::io(e, dir))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| DataError::io(e, dir))?.path();
        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if path.is_file() && is_yaml {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::DataErrorKind;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_empty_dir() {
        let temp = tempfile::tempdir().unwrap();

        let repos = Repositories::load(temp.path(), EventWindow::default()).unwrap();

        assert!(repos.events.all().unwrap().is_empty());
        assert!(repos.groups.all().unwrap().is_empty());
        assert!(repos.hackathons.all().unwrap().is_empty());
    }

    #[test]
    fn test_load_records_with_stem_identity() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "groups/python.yaml", "name: Python Frederick\ncolor: emerald\n");
        write(
            temp.path(),
            "events/e1.yaml",
            "name: Lightning Talks\nwhen: 2024-05-01T22:00:00Z\ngroup_slug: python\n",
        );
        write(temp.path(), "hackathons/hack.yml", "name: Hack Frederick\n");

        let repos = Repositories::load(temp.path(), EventWindow::default()).unwrap();

        let group = repos.groups.find_by("python").unwrap().unwrap();
        assert_eq!(group.name, "Python Frederick");

        let events = repos.events.all().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "e1");
        assert_eq!(
            events[0].when,
            Utc.with_ymd_and_hms(2024, 5, 1, 22, 0, 0).unwrap()
        );

        let hackathons = repos.hackathons.all().unwrap();
        assert_eq!(hackathons[0].slug, "hack");
    }

    #[test]
    fn test_load_explicit_identity_wins() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "groups/file.yaml", "slug: real\nname: Real\n");

        let repos = Repositories::load(temp.path(), EventWindow::default()).unwrap();

        assert!(repos.groups.find_by("real").unwrap().is_some());
        assert!(repos.groups.find_by("file").unwrap().is_none());
    }

    #[test]
    fn test_load_sorted_by_path() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "groups/b.yaml", "name: B\n");
        write(temp.path(), "groups/a.yaml", "name: A\n");
        write(temp.path(), "groups/notes.txt", "ignored");

        let repos = Repositories::load(temp.path(), EventWindow::default()).unwrap();
        let slugs: Vec<String> = repos
            .groups
            .all()
            .unwrap()
            .into_iter()
            .map(|g| g.slug)
            .collect();

        assert_eq!(slugs, vec!["a", "b"]);
    }

    #[test]
    fn test_load_malformed_record() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "events/bad.yaml", "name: [unterminated\n");

        let err = Repositories::load(temp.path(), EventWindow::default()).unwrap_err();

        assert_eq!(err.kind, DataErrorKind::Malformed);
        assert!(err.path.unwrap().ends_with("events/bad.yaml"));
    }

    #[test]
    fn test_load_duplicate_identity() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "groups/a.yaml", "slug: same\nname: A\n");
        write(temp.path(), "groups/b.yaml", "slug: same\nname: B\n");

        let err = Repositories::load(temp.path(), EventWindow::default()).unwrap_err();

        assert_eq!(err.kind, DataErrorKind::Duplicate);
        assert!(err.to_string().contains("same"));
    }
}
