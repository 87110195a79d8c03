//! Build error type.

use techcity_data::DataError;
use techcity_html::HtmlError;

/// Error returned by the site builder.
///
/// Any error aborts the whole build. Output written before the failure is
/// left in place.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Static asset walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Description markup error: {0}")]
    Html(#[from] HtmlError),

    /// A record identity cannot be used as a single path segment.
    #[error("Invalid {kind} identity for output path: {id:?}")]
    InvalidIdentity {
        /// Record type ("event", "group", "hackathon").
        kind: &'static str,
        /// Offending identity.
        id: String,
    },
}
