//! `techcity build` command implementation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use techcity_config::{CliSettings, Config, SiteConfig};
use techcity_data::Repositories;
use techcity_site::{BuildReport, PaletteTarget, SiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Directory holding groups/, events/ and hackathons/ (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Template directory (overrides config).
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Static asset directory (overrides config).
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Palette file for the CSS class scanner (default: <templates>/palette-rendered.html).
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Snapshot instant as RFC 3339, e.g. 2024-06-01T12:00:00Z (default: current time).
    #[arg(long, value_parser = parse_now, env = "TECHCITY_NOW")]
    now: Option<DateTime<Utc>>,

    /// Path to configuration file (default: auto-discover techcity.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            out_dir: self.out_dir.clone(),
            data_dir: self.data_dir.clone(),
            templates_dir: self.templates_dir.clone(),
            public_dir: self.public_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = &config.site_resolved;
        check_dirs(site)?;

        output.path("Data", &site.data_dir);
        output.path("Output", &site.out_dir);
        if !site.data_dir.is_dir() {
            output.warning(&format!(
                "Data directory {} not found, building an empty site",
                site.data_dir.display()
            ));
        }

        let now = self.now.unwrap_or_else(Utc::now);
        let report = self.build_site(&config, now)?;

        output.success(&format!(
            "Built {} pages and {} static files to {} in {:.2?}",
            report.pages,
            report.static_files,
            site.out_dir.display(),
            report.elapsed
        ));
        Ok(())
    }

    /// Load the data directory and render the site for `now`.
    fn build_site(&self, config: &Config, now: DateTime<Utc>) -> Result<BuildReport, CliError> {
        let site = &config.site_resolved;
        tracing::info!(data_dir = %site.data_dir.display(), "Loading records");
        let repos = Repositories::load(&site.data_dir, config.events.window())?;

        tracing::info!(%now, timezone = %site.timezone, "Building site");
        let report = self.builder(now, site).build(&repos)?;
        tracing::info!(
            pages = report.pages,
            static_files = report.static_files,
            "Site written to {}",
            site.out_dir.display()
        );
        Ok(report)
    }

    /// Configure a site builder from resolved settings.
    fn builder(&self, now: DateTime<Utc>, site: &SiteConfig) -> SiteBuilder {
        let mut builder = SiteBuilder::new(now, site.out_dir.clone()).with_timezone(site.timezone);
        if let Some(dir) = &site.templates_dir {
            builder = builder.with_templates(dir.clone());
        }
        if let Some(dir) = &site.public_dir {
            builder = builder.with_public(dir.clone());
        }
        if let Some(path) = &self.palette {
            builder = builder.with_palette(PaletteTarget::at(path.clone()));
        }
        builder
    }
}

/// Parse the `--now` argument.
fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

/// Reject layouts where the output would land on top of a source directory.
fn check_dirs(site: &SiteConfig) -> Result<(), CliError> {
    let out = site.out_dir.as_path();
    let sources: [(&str, Option<&Path>); 3] = [
        ("data", Some(site.data_dir.as_path())),
        ("templates", site.templates_dir.as_deref()),
        ("public", site.public_dir.as_deref()),
    ];
    for (name, dir) in sources {
        if dir == Some(out) {
            return Err(CliError::Validation(format!(
                "Output directory {} is also the {name} directory",
                out.display()
            )));
        }
    }
    Ok(())
}
