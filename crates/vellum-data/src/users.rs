//! Showcase users loaded from `users.yml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::DataError;

const USERS_FILE: &str = "users.yml";

/// One entry of the "who is using this" showcase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseUser {
    /// Display name.
    pub caption: String,
    /// Link to the user's site.
    pub info_link: String,
    /// Logo path under the static image root.
    pub image: String,
    /// Pinned entries render on the landing page.
    pub pinned: bool,
}

/// Raw `users.yml` entry.
#[derive(Debug, Deserialize)]
struct UserEntry {
    name: String,
    url: String,
    logo: String,
    #[serde(default)]
    pinned: bool,
}

impl From<UserEntry> for ShowcaseUser {
    fn from(entry: UserEntry) -> Self {
        Self {
            caption: entry.name,
            info_link: entry.url,
            image: format!("/img/users/{}", entry.logo),
            pinned: entry.pinned,
        }
    }
}

/// Load the showcase users from `<data_dir>/users.yml`.
///
/// # Errors
///
/// Returns an error if the file is missing or not valid YAML.
pub fn load_users(data_dir: &Path) -> Result<Vec<ShowcaseUser>, DataError> {
    let entries: Vec<UserEntry> = crate::load_yaml(&data_dir.join(USERS_FILE))?;
    Ok(entries.into_iter().map(ShowcaseUser::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_users_maps_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(USERS_FILE),
            "- name: Acme\n  url: https://acme.example\n  logo: acme.svg\n  pinned: true\n\
             - name: Beta\n  url: https://beta.example\n  logo: beta.png\n",
        )
        .unwrap();

        let users = load_users(dir.path()).unwrap();

        assert_eq!(
            users,
            vec![
                ShowcaseUser {
                    caption: "Acme".to_owned(),
                    info_link: "https://acme.example".to_owned(),
                    image: "/img/users/acme.svg".to_owned(),
                    pinned: true,
                },
                ShowcaseUser {
                    caption: "Beta".to_owned(),
                    info_link: "https://beta.example".to_owned(),
                    image: "/img/users/beta.png".to_owned(),
                    pinned: false,
                },
            ]
        );
    }

    #[test]
    fn test_load_users_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(USERS_FILE), "").unwrap();

        let users = load_users(dir.path()).unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_load_users_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_users(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_serialized_keys_match_templates() {
        let user = ShowcaseUser {
            caption: "Acme".to_owned(),
            info_link: "https://acme.example".to_owned(),
            image: "/img/users/acme.svg".to_owned(),
            pinned: false,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["caption"], "Acme");
        assert_eq!(json["infoLink"], "https://acme.example");
    }
}
