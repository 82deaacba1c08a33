//! Typed loaders for the vellum site data directory.
//!
//! The data directory holds the editorial content that feeds page
//! templates: showcase users, sponsors, the team roster, talk videos, and
//! the tool setup catalog with its per-tool markdown guides. Each loader
//! reads one file (or directory) and maps it into the record shape the
//! templates consume; [`SiteData::load`] bundles them all.
//!
//! Empty YAML files deserialize as the empty collection. Missing files are
//! errors, reported with the offending path.

mod bundle;
mod sponsors;
mod team;
mod tools;
mod users;
mod videos;

pub use bundle::SiteData;
pub use sponsors::{Sponsor, load_sponsors};
pub use team::{Team, TeamMember, load_team};
pub use tools::{
    ToolCategory, ToolGuide, ToolItem, load_setup_snippet, load_tool_catalog, load_tool_guides,
};
pub use users::{ShowcaseUser, load_users};
pub use videos::{Video, load_videos};

use std::path::{Path, PathBuf};

/// Data loading error.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// I/O error reading a data file.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// File or directory the read failed on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// YAML parsing error.
    #[error("YAML error in {}: {source}", .path.display())]
    Yaml {
        /// File the parse failed on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },
    /// JSON parsing error.
    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        /// File the parse failed on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// Structurally valid data with an invalid entry.
    #[error("Invalid data in {}: {message}", .path.display())]
    Invalid {
        /// File the entry came from.
        path: PathBuf,
        /// What is wrong with the entry.
        message: String,
    },
}

/// Read a file to a string, reporting the path on failure.
pub(crate) fn read_file(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a YAML data file.
///
/// An empty or null document yields the collection's default value, so a
/// freshly created `sponsors.yml` with nothing in it is an empty list
/// rather than an error.
pub(crate) fn load_yaml<T>(path: &Path) -> Result<T, DataError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let content = read_file(path)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let parsed: Option<T> = serde_yaml::from_str(&content).map_err(|source| DataError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parsed.unwrap_or_default())
}

/// Load a JSON data file.
pub(crate) fn load_json<T>(path: &Path) -> Result<T, DataError>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_file_missing_reports_path() {
        let err = read_file(Path::new("/nonexistent/users.yml")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/users.yml"));
    }

    #[test]
    fn test_load_yaml_empty_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yml");
        std::fs::write(&path, "").unwrap();

        let loaded: Vec<String> = load_yaml(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_yaml_comment_only_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.yml");
        std::fs::write(&path, "# nothing here yet\n").unwrap();

        let loaded: Vec<String> = load_yaml(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_yaml_invalid_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yml");
        std::fs::write(&path, "- [unclosed").unwrap();

        let err = load_yaml::<Vec<String>>(&path).unwrap_err();
        assert!(matches!(err, DataError::Yaml { .. }));
        assert!(err.to_string().contains("broken.yml"));
    }

    #[test]
    fn test_load_json_invalid_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{").unwrap();

        let err = load_json::<Vec<String>>(&path).unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
