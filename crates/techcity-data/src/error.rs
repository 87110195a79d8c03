//! Repository error type.

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DataErrorKind {
    /// Data source does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Record could not be parsed.
    Malformed,
    /// Two records share the same identity.
    Duplicate,
    /// Other/unknown error category.
    Other,
}

/// Repository error with semantic kind and underlying source.
#[derive(Debug)]
pub struct DataError {
    /// Semantic error category.
    pub kind: DataErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DataError {
    /// Create a new data error.
    #[must_use]
    pub fn new(kind: DataErrorKind) -> Self {
        Self {
            kind,
            path: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a data error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => DataErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => DataErrorKind::PermissionDenied,
            _ => DataErrorKind::Other,
        };
        Self::new(kind).with_source(err).with_path(path)
    }

    /// Create a parse error for a record file.
    #[must_use]
    pub fn malformed(err: serde_yaml::Error, path: impl Into<PathBuf>) -> Self {
        Self::new(DataErrorKind::Malformed)
            .with_source(err)
            .with_path(path)
    }

    /// Create a duplicate identity error.
    #[must_use]
    pub fn duplicate(what: &str, id: &str, path: impl Into<PathBuf>) -> Self {
        Self::new(DataErrorKind::Duplicate)
            .with_source(DuplicateId(format!("{what} '{id}' defined twice")))
            .with_path(path)
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind_str = match self.kind {
            DataErrorKind::NotFound => "Not found",
            DataErrorKind::PermissionDenied => "Permission denied",
            DataErrorKind::Malformed => "Malformed record",
            DataErrorKind::Duplicate => "Duplicate record",
            DataErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[derive(Debug)]
struct DuplicateId(String);

impl std::fmt::Display for DuplicateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for DuplicateId {}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_data_error_new() {
        let err = DataError::new(DataErrorKind::NotFound);

        assert_eq!(err.kind, DataErrorKind::NotFound);
        assert!(err.path.is_none());
    }

    #[test]
    fn test_data_error_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = DataError::io(io_err, "/data/groups");

        assert_eq!(err.kind, DataErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("/data/groups")));
        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_data_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DataError::io(io_err, "/data");

        assert_eq!(err.kind, DataErrorKind::PermissionDenied);
    }

    #[test]
    fn test_data_error_display_simple() {
        let err = DataError::new(DataErrorKind::Malformed);

        assert_eq!(err.to_string(), "Malformed record");
    }

    #[test]
    fn test_data_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = DataError::io(io_err, "/data/events/e1.yaml");

        assert_eq!(
            err.to_string(),
            "Not found: file not found (path: /data/events/e1.yaml)"
        );
    }

    #[test]
    fn test_data_error_duplicate_display() {
        let err = DataError::duplicate("group", "python", "/data/groups/python.yaml");

        assert_eq!(err.kind, DataErrorKind::Duplicate);
        assert_eq!(
            err.to_string(),
            "Duplicate record: group 'python' defined twice (path: /data/groups/python.yaml)"
        );
    }

    #[test]
    fn test_data_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DataError>();
    }
}
