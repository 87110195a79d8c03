//! `${VAR}` expansion for `[site]` paths.

use crate::{ConfigError, SiteConfigRaw};

impl SiteConfigRaw {
    /// Expand `${VAR}` and `${VAR:-default}` in every path setting.
    pub(crate) fn expand_env(&mut self) -> Result<(), ConfigError> {
        for (value, field) in [
            (&mut self.out_dir, "site.out_dir"),
            (&mut self.data_dir, "site.data_dir"),
            (&mut self.templates_dir, "site.templates_dir"),
            (&mut self.public_dir, "site.public_dir"),
        ] {
            if let Some(path) = value.as_mut().filter(|p| p.contains("${")) {
                *path = expand_path(path, field)?;
            }
        }
        Ok(())
    }
}

/// Substitute set variables; a reference left over afterwards had no value.
fn expand_path(path: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = shellexpand::env_with_context_no_errors(path, |var| std::env::var(var).ok());
    match unresolved(&expanded) {
        Some(var) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("{var} is not set and has no default"),
        }),
        None => Ok(expanded.into_owned()),
    }
}

/// Name of the first `${VAR}` reference still present in `text`.
fn unresolved(text: &str) -> Option<&str> {
    let start = text.find("${")? + 2;
    let len = text[start..].find('}')?;
    Some(&text[start..start + len])
}
