//! Data repositories for the Tech City site.
//!
//! This crate provides:
//! - [`Event`], [`Group`], [`Hackathon`]: read-only domain records
//! - [`EventRepository`], [`GroupRepository`], [`HackathonRepository`]: the
//!   query contracts the site builder consumes
//! - [`EventStore`], [`GroupStore`], [`HackathonStore`]: in-memory implementations
//! - [`Repositories::load`]: instantiates the stores from a YAML data directory
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use techcity_data::{EventWindow, Repositories};
//!
//! let repos = Repositories::load(Path::new("data"), EventWindow::default())?;
//! for group in repos.groups.all()? {
//!     println!("{}: {}", group.slug, group.name);
//! }
//! ```

mod error;
mod loader;
mod memory;
mod model;
mod repository;

pub use error::{DataError, DataErrorKind};
pub use memory::{EventStore, GroupStore, HackathonStore};
pub use model::{Event, Group, Hackathon};
pub use repository::{
    EventRepository, EventWindow, GroupRepository, HackathonRepository, Repositories,
};
