//! Team roster loaded from `team.yml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::DataError;

const TEAM_FILE: &str = "team.yml";

/// The team roster, grouped the way the team page renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    /// Core maintainers.
    pub core: Vec<TeamMember>,
    /// Regular members.
    pub members: Vec<TeamMember>,
    /// Summer of Code students.
    pub summer_of_code: Vec<TeamMember>,
    /// Former members.
    pub alumni: Vec<TeamMember>,
}

impl Team {
    /// Total number of people across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.core.len() + self.members.len() + self.summer_of_code.len() + self.alumni.len()
    }

    /// Whether the roster has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One person on the team page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Display name.
    pub name: String,
    /// GitHub username.
    pub github: String,
    /// Twitter username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Personal website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Affiliated organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// Affiliated organization URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_url: Option<String>,
}

/// Load the team roster from `<data_dir>/team.yml`.
///
/// # Errors
///
/// Returns an error if the file is missing or not valid YAML.
pub fn load_team(data_dir: &Path) -> Result<Team, DataError> {
    crate::load_yaml(&data_dir.join(TEAM_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_team_groups() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(TEAM_FILE),
            "core:\n  - name: Ada\n    github: ada\n    twitter: ada_dev\n\
             alumni:\n  - name: Grace\n    github: grace\n    org: Navy\n    org_url: https://navy.example\n",
        )
        .unwrap();

        let team = load_team(dir.path()).unwrap();

        assert_eq!(team.core.len(), 1);
        assert_eq!(team.core[0].name, "Ada");
        assert_eq!(team.core[0].twitter.as_deref(), Some("ada_dev"));
        assert!(team.members.is_empty());
        assert!(team.summer_of_code.is_empty());
        assert_eq!(team.alumni[0].org.as_deref(), Some("Navy"));
        assert_eq!(team.len(), 2);
        assert!(!team.is_empty());
    }

    #[test]
    fn test_load_team_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TEAM_FILE), "").unwrap();

        let team = load_team(dir.path()).unwrap();
        assert!(team.is_empty());
    }
}
