//! Static site builder for Tech City.
//!
//! This crate provides:
//! - [`SiteBuilder`]: renders the home page, event, group and hackathon pages
//!   plus the palette side file, then mirrors static assets
//! - [`partition_by_now`]: the upcoming/recent split used by the home page
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use chrono::Utc;
//! use techcity_data::{EventWindow, Repositories};
//! use techcity_site::SiteBuilder;
//!
//! let repos = Repositories::load(Path::new("data"), EventWindow::default())?;
//! let report = SiteBuilder::new(Utc::now(), "out").build(&repos)?;
//! println!("{} pages", report.pages);
//! # Ok(())
//! # }
//! ```

mod builder;
mod environment;
mod error;
mod pages;
mod partition;

pub use builder::{BuildReport, PaletteTarget, SiteBuilder};
pub use error::BuildError;
pub use partition::{Partitioned, partition_by_now};
