//! Static site builder.
//!
//! [`SiteBuilder`] renders the whole site in one synchronous run:
//!
//! ```text
//! <out>/index.html
//! <out>/events/<id>/index.html
//! <out>/groups/<slug>/index.html
//! <out>/groups/<slug>/events/index.html
//! <out>/hackathons/<slug>/index.html
//! <out>/<public assets>
//! <templates>/palette-rendered.html
//! ```
//!
//! The output directory is never cleared, so files from earlier builds that
//! no longer correspond to a record stay in place.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use minijinja::Environment;
use serde::Serialize;
use techcity_data::{
    Event, EventRepository, Group, GroupRepository, Hackathon, Repositories,
};
use techcity_html::tailwindify_html;
use walkdir::WalkDir;

use crate::environment::create_environment;
use crate::error::BuildError;
use crate::pages::{
    EventPage, EventWithGroup, GroupEvent, GroupEventsPage, GroupPage, HackathonPage, IndexPage, Page,
    PalettePage,
};
use crate::partition::partition_by_now;

/// Template directory bundled with this crate.
const TEMPLATES_DIR: &str = "templates";
/// Static asset directory bundled with this crate.
const PUBLIC_DIR: &str = "public";
/// Palette output filename inside the template directory.
const PALETTE_FILE: &str = "palette-rendered.html";
/// Page filename inside every page directory.
const INDEX_FILE: &str = "index.html";

/// Lower bound for "all events" group pages.
///
/// Fifty years back stands in for the beginning of time.
fn all_time() -> TimeDelta {
    TimeDelta::days(50 * 365)
}

/// Build-time side output that lives outside the published site.
///
/// The palette lists every dynamic value (group colors and the like) in a file
/// inside the template source tree so that Tailwind's source scan picks the
/// classes up. It is never written under the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteTarget {
    path: PathBuf,
}

impl PaletteTarget {
    /// The default target inside a template directory.
    #[must_use]
    pub fn in_templates(templates: &Path) -> Self {
        Self {
            path: templates.join(PALETTE_FILE),
        }
    }

    /// An explicit target file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Site pages written under the output directory.
    pub pages: usize,
    /// Static files copied into the output directory.
    pub static_files: usize,
    /// Wall-clock time spent in [`SiteBuilder::build`].
    pub elapsed: Duration,
}

/// Renders the site for a fixed snapshot instant.
pub struct SiteBuilder {
    now: DateTime<Utc>,
    out: PathBuf,
    templates: PathBuf,
    public: PathBuf,
    palette: Option<PaletteTarget>,
    timezone: Tz,
    environment: Environment<'static>,
}

impl SiteBuilder {
    /// Create a builder for `now` writing to `out`.
    ///
    /// Templates and static assets default to the directories bundled with
    /// this crate. Nothing is created on disk until [`build`](Self::build).
    #[must_use]
    pub fn new(now: DateTime<Utc>, out: impl Into<PathBuf>) -> Self {
        let crate_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let templates = crate_dir.join(TEMPLATES_DIR);
        let timezone = chrono_tz::UTC;
        Self {
            now,
            out: out.into(),
            environment: create_environment(&templates, timezone),
            templates,
            public: crate_dir.join(PUBLIC_DIR),
            palette: None,
            timezone,
        }
    }

    /// Load templates from `dir` instead of the bundled ones.
    #[must_use]
    pub fn with_templates(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates = dir.into();
        self.environment = create_environment(&self.templates, self.timezone);
        self
    }

    /// Copy static assets from `dir` instead of the bundled ones.
    #[must_use]
    pub fn with_public(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public = dir.into();
        self
    }

    /// Write the palette to an explicit target instead of the template directory.
    #[must_use]
    pub fn with_palette(mut self, target: PaletteTarget) -> Self {
        self.palette = Some(target);
        self
    }

    /// Display event times in `timezone`.
    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self.environment = create_environment(&self.templates, self.timezone);
        self
    }

    /// Snapshot instant used for every time comparison in the build.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Output root.
    #[must_use]
    pub fn out(&self) -> &Path {
        &self.out
    }

    /// Template directory.
    #[must_use]
    pub fn templates(&self) -> &Path {
        &self.templates
    }

    /// Static asset directory.
    #[must_use]
    pub fn public(&self) -> &Path {
        &self.public
    }

    /// Where the palette is written.
    #[must_use]
    pub fn palette(&self) -> PaletteTarget {
        self.palette
            .clone()
            .unwrap_or_else(|| PaletteTarget::in_templates(&self.templates))
    }

    /// Render every page and copy static assets.
    ///
    /// Passes run in a fixed order: index, events, groups, hackathons,
    /// palette, then the static copy.
    ///
    /// # Errors
    ///
    /// Returns the first repository, template, markup or filesystem error.
    /// Files written before the failure are left in place.
    pub fn build(&self, repos: &Repositories) -> Result<BuildReport, BuildError> {
        let started = Instant::now();
        tracing::info!("Generating content to {}", self.out.display());
        fs::create_dir_all(&self.out)?;

        let groups = repos.groups.all()?;
        let hackathons = repos.hackathons.all()?;

        let mut pages = 0;
        pages += self.render_index(repos, &groups, &hackathons)?;
        pages += self.render_events(repos.events.as_ref(), repos.groups.as_ref())?;
        pages += self.render_groups(&groups, repos.events.as_ref())?;
        pages += self.render_hackathons(&hackathons)?;
        self.render_palette(&groups, &hackathons)?;

        let static_files = self.copy_static()?;

        let elapsed = started.elapsed();
        tracing::info!(
            pages,
            static_files,
            "Done in {:.3} seconds",
            elapsed.as_secs_f64()
        );

        Ok(BuildReport {
            pages,
            static_files,
            elapsed,
        })
    }

    /// Render `template_name` with `context` and write it to `out_path`.
    ///
    /// Existing files are overwritten. Parent directories must exist.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Template`] if the template is missing or fails to
    /// render, and [`BuildError::Io`] if the file cannot be written.
    pub fn render(
        &self,
        template_name: &str,
        context: &impl Serialize,
        out_path: &Path,
    ) -> Result<(), BuildError> {
        let template = self.environment.get_template(template_name)?;
        let html = template.render(context)?;
        fs::write(out_path, html)?;
        Ok(())
    }

    fn render_page<P: Page>(&self, page: &P, out_path: &Path) -> Result<(), BuildError> {
        self.render(P::TEMPLATE, page, out_path)
    }

    /// Mirror the static asset tree into the output root.
    ///
    /// Returns the number of files copied. A missing asset directory copies
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Walk`] or [`BuildError::Io`] on filesystem failure.
    pub fn copy_static(&self) -> Result<usize, BuildError> {
        if !self.public.is_dir() {
            tracing::warn!(
                "Static directory {} does not exist, skipping copy",
                self.public.display()
            );
            return Ok(0);
        }

        tracing::info!(
            "Copying static files from {} to {}",
            self.public.display(),
            self.out.display()
        );
        let mut copied = 0;
        for entry in WalkDir::new(&self.public).sort_by_file_name() {
            let entry = entry?;
            let Ok(relative) = entry.path().strip_prefix(&self.public) else {
                continue;
            };
            let target = self.out.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                fs::copy(entry.path(), &target)?;
                copied += 1;
            }
        }
        Ok(copied)
    }

    fn render_index(
        &self,
        repos: &Repositories,
        groups: &[Group],
        hackathons: &[Hackathon],
    ) -> Result<usize, BuildError> {
        tracing::info!("Rendering index");

        let split = partition_by_now(repos.events.filter_around(self.now)?, self.now);
        let with_group = |events: Vec<Event>| -> Result<Vec<EventWithGroup>, BuildError> {
            events
                .into_iter()
                .map(|event| -> Result<EventWithGroup, BuildError> {
                    let group = if event.is_joint() {
                        None
                    } else {
                        repos.groups.find_by(&event.group_slug)?
                    };
                    Ok(EventWithGroup { event, group })
                })
                .collect()
        };

        let mut upcoming = with_group(split.upcoming)?;
        upcoming.reverse();

        let page = IndexPage {
            upcoming_events_with_group: upcoming,
            recent_events_with_group: with_group(split.recent)?,
            groups,
            hackathons,
            now: self.now,
        };
        self.render_page(&page, &self.out.join(INDEX_FILE))?;
        Ok(1)
    }

    fn render_events(
        &self,
        events: &dyn EventRepository,
        groups: &dyn GroupRepository,
    ) -> Result<usize, BuildError> {
        tracing::info!("Rendering events");
        let events_dir = self.out.join("events");
        fs::create_dir_all(&events_dir)?;

        let mut count = 0;
        for event in events.all()? {
            let event_dir = page_dir(&events_dir, "event", &event.id)?;
            // A single root element is required for the markup transform.
            let description = tailwindify_html(&format!("<div>{}</div>", event.description))?;
            // Joint events carry no reliable owner, whatever `group_slug` holds.
            let group = groups
                .find_by(&event.group_slug)?
                .filter(|_| !event.is_joint());

            let page = EventPage {
                description,
                event: &event,
                group,
            };
            self.render_page(&page, &event_dir.join(INDEX_FILE))?;
            count += 1;
        }
        Ok(count)
    }

    fn render_groups(
        &self,
        groups: &[Group],
        events: &dyn EventRepository,
    ) -> Result<usize, BuildError> {
        let groups_dir = self.out.join("groups");
        fs::create_dir_all(&groups_dir)?;

        let mut count = 0;
        for group in groups {
            let group_dir = page_dir(&groups_dir, "group", &group.slug)?;

            let current = events.filter_group(&group.slug, self.now, None)?;
            self.render_group(group, &current, &group_dir)?;

            let all_events = events.filter_group(&group.slug, self.now, Some(all_time()))?;
            self.render_group_events(group, &all_events, &group_dir)?;

            count += 2;
        }
        Ok(count)
    }

    fn render_group(
        &self,
        group: &Group,
        events: &[Event],
        group_dir: &Path,
    ) -> Result<(), BuildError> {
        tracing::info!("Rendering group: {}", group.name);
        let page = GroupPage {
            events: events
                .iter()
                .map(|event| GroupEvent {
                    event,
                    upcoming: event.when >= self.now,
                })
                .collect(),
            group,
            now: self.now,
        };
        self.render_page(&page, &group_dir.join(INDEX_FILE))
    }

    fn render_group_events(
        &self,
        group: &Group,
        events: &[Event],
        group_dir: &Path,
    ) -> Result<(), BuildError> {
        tracing::info!("Rendering group events: {}", group.name);
        let events_dir = group_dir.join("events");
        fs::create_dir_all(&events_dir)?;

        let page = GroupEventsPage { events, group };
        self.render_page(&page, &events_dir.join(INDEX_FILE))
    }

    fn render_hackathons(&self, hackathons: &[Hackathon]) -> Result<usize, BuildError> {
        let hackathons_dir = self.out.join("hackathons");
        fs::create_dir_all(&hackathons_dir)?;

        for hackathon in hackathons {
            tracing::info!("Rendering hackathon: {}", hackathon.name);
            let hackathon_dir = page_dir(&hackathons_dir, "hackathon", &hackathon.slug)?;
            self.render_page(
                &HackathonPage { hackathon },
                &hackathon_dir.join(INDEX_FILE),
            )?;
        }
        Ok(hackathons.len())
    }

    fn render_palette(&self, groups: &[Group], hackathons: &[Hackathon]) -> Result<(), BuildError> {
        let target = self.palette();
        tracing::debug!("Rendering palette to {}", target.path().display());
        self.render_page(&PalettePage { groups, hackathons }, target.path())
    }
}

/// Create `parent/<id>` for a record, rejecting identities that are not a
/// single plain path segment.
fn page_dir(parent: &Path, kind: &'static str, id: &str) -> Result<PathBuf, BuildError> {
    let mut components = Path::new(id).components();
    let single_segment = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_segment {
        return Err(BuildError::InvalidIdentity {
            kind,
            id: id.to_owned(),
        });
    }

    let dir = parent.join(id);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
