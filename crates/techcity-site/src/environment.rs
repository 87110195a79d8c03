//! Template environment setup.

use std::path::Path;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use minijinja::{AutoEscape, Environment, Error, ErrorKind, UndefinedBehavior};

/// Format used by the `datetime` filter when the template gives none.
const DEFAULT_DATETIME_FORMAT: &str = "%A, %B %-d, %Y at %-I:%M %p";

/// Create a template environment that loads from `templates`.
///
/// HTML templates auto-escape interpolated values; markup that must pass
/// through is marked with `|safe` in the template. Undefined variables are
/// errors.
pub(crate) fn create_environment(templates: &Path, timezone: Tz) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(minijinja::path_loader(templates.to_path_buf()));
    env.set_auto_escape_callback(|name| {
        if name.ends_with(".html") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_filter("datetime", move |value: String, format: Option<String>| {
        format_datetime(&value, format.as_deref(), timezone)
    });
    env
}

/// Render an RFC 3339 timestamp in `timezone`.
fn format_datetime(value: &str, format: Option<&str>, timezone: Tz) -> Result<String, Error> {
    let parsed = DateTime::parse_from_rfc3339(value).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("datetime filter expects an RFC 3339 timestamp, got {value:?}"),
        )
        .with_source(e)
    })?;
    let local = parsed.with_timezone(&Utc).with_timezone(&timezone);
    Ok(local
        .format(format.unwrap_or(DEFAULT_DATETIME_FORMAT))
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime_default_format() {
        let formatted =
            format_datetime("2024-06-04T22:00:00Z", None, chrono_tz::America::New_York).unwrap();

        assert_eq!(formatted, "Tuesday, June 4, 2024 at 6:00 PM");
    }

    #[test]
    fn test_format_datetime_custom_format() {
        let formatted =
            format_datetime("2024-06-04T22:00:00Z", Some("%Y-%m-%d %H:%M"), chrono_tz::UTC)
                .unwrap();

        assert_eq!(formatted, "2024-06-04 22:00");
    }

    #[test]
    fn test_format_datetime_rejects_garbage() {
        let err = format_datetime("next tuesday", None, chrono_tz::UTC).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_environment_escapes_html() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("t.html"), "<p>{{ text }}</p>").unwrap();
        let env = create_environment(temp.path(), chrono_tz::UTC);

        let html = env
            .get_template("t.html")
            .unwrap()
            .render(minijinja::context! { text => "<b>Tom & Jerry" })
            .unwrap();

        assert_eq!(html, "<p>&lt;b&gt;Tom &amp; Jerry</p>");
    }

    #[test]
    fn test_environment_strict_undefined() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("t.html"), "{{ missing }}").unwrap();
        let env = create_environment(temp.path(), chrono_tz::UTC);

        let result = env
            .get_template("t.html")
            .unwrap()
            .render(minijinja::context! {});

        assert!(result.is_err());
    }

    #[test]
    fn test_environment_missing_template() {
        let temp = tempfile::tempdir().unwrap();
        let env = create_environment(temp.path(), chrono_tz::UTC);

        let err = env.get_template("nope.html").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TemplateNotFound);
    }
}
