//! Sponsors merged from two sources.
//!
//! `sponsors.json` is an Open Collective export refreshed by CI;
//! `sponsors.yml` holds manually maintained entries. Exported entries come
//! first in the merged list, matching the order page templates expect.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::DataError;

const MANUAL_FILE: &str = "sponsors.yml";
const EXPORTED_FILE: &str = "sponsors.json";

/// The GitHub mirror collective duplicates sponsors listed individually.
const EXCLUDED_SLUG: &str = "github-sponsors";

/// Placeholder avatar for exported sponsors without one.
const FALLBACK_IMAGE: &str = "/img/user.svg";

/// One sponsor, unified across both sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sponsor {
    /// Record origin, `"opencollective"` for exported entries.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Sponsorship tier name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// Display name.
    pub name: String,
    /// Link target for the sponsor's logo.
    pub url: String,
    /// Logo or avatar image path.
    pub image: String,
    /// Free-form blurb.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Monthly donation amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<f64>,
    /// Yearly donation amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly: Option<f64>,
    /// All-time donation amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// Raw `sponsors.yml` entry.
#[derive(Debug, Deserialize)]
struct ManualEntry {
    name: String,
    url: String,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    tier: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Raw `sponsors.json` entry, as exported from Open Collective.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportedEntry {
    slug: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    tier: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    twitter_handle: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    monthly_donations: Option<f64>,
    #[serde(default)]
    yearly_donations: Option<f64>,
    #[serde(default)]
    total_donations: Option<f64>,
}

impl Sponsor {
    fn from_exported(entry: ExportedEntry) -> Self {
        let url = if let Some(website) = entry.website {
            if has_url_scheme(&website) {
                website
            } else {
                format!("http://{website}")
            }
        } else if let Some(handle) = entry.twitter_handle {
            format!("https://twitter.com/@{handle}")
        } else {
            format!("https://opencollective.com/{}", entry.slug)
        };

        Self {
            kind: Some("opencollective".to_owned()),
            tier: entry.tier,
            name: entry.name,
            url,
            image: entry.avatar.unwrap_or_else(|| FALLBACK_IMAGE.to_owned()),
            description: entry.description,
            monthly: entry.monthly_donations,
            yearly: entry.yearly_donations,
            total: entry.total_donations,
        }
    }

    fn from_manual(entry: ManualEntry, path: &Path) -> Result<Self, DataError> {
        let image = match (entry.image, entry.logo) {
            (Some(image), _) => image,
            (None, Some(logo)) => format!("/img/sponsors/{logo}"),
            (None, None) => {
                return Err(DataError::Invalid {
                    path: path.to_path_buf(),
                    message: format!("sponsor {} needs an image or a logo", entry.name),
                });
            }
        };

        Ok(Self {
            kind: entry.kind,
            tier: entry.tier,
            name: entry.name,
            url: entry.url,
            image,
            description: entry.description,
            monthly: None,
            yearly: None,
            total: None,
        })
    }
}

/// Whether a website value already carries a URL scheme (`https:`, ...).
fn has_url_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Load and merge sponsors from `<data_dir>/sponsors.json` and
/// `<data_dir>/sponsors.yml`.
///
/// Exported entries for the `github-sponsors` mirror collective are
/// dropped. Exported entries without a website fall back to the
/// sponsor's Twitter profile, then to their Open Collective page.
///
/// # Errors
///
/// Returns an error if either file is missing or malformed, or a manual
/// entry has neither an image nor a logo.
pub fn load_sponsors(data_dir: &Path) -> Result<Vec<Sponsor>, DataError> {
    let exported_path = data_dir.join(EXPORTED_FILE);
    let exported: Vec<ExportedEntry> = crate::load_json(&exported_path)?;

    let manual_path = data_dir.join(MANUAL_FILE);
    let manual: Vec<ManualEntry> = crate::load_yaml(&manual_path)?;

    let mut sponsors: Vec<Sponsor> = exported
        .into_iter()
        .filter(|entry| entry.slug != EXCLUDED_SLUG)
        .map(Sponsor::from_exported)
        .collect();
    for entry in manual {
        sponsors.push(Sponsor::from_manual(entry, &manual_path)?);
    }
    Ok(sponsors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_sources(exported: &str, manual: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(EXPORTED_FILE), exported).unwrap();
        std::fs::write(dir.path().join(MANUAL_FILE), manual).unwrap();
        dir
    }

    #[test]
    fn test_exported_before_manual() {
        let dir = write_sources(
            r#"[{"slug": "acme", "name": "Acme", "website": "https://acme.example"}]"#,
            "- name: Handmade\n  url: https://handmade.example\n  logo: handmade.png\n",
        );

        let sponsors = load_sponsors(dir.path()).unwrap();

        assert_eq!(sponsors.len(), 2);
        assert_eq!(sponsors[0].name, "Acme");
        assert_eq!(sponsors[0].kind.as_deref(), Some("opencollective"));
        assert_eq!(sponsors[1].name, "Handmade");
        assert_eq!(sponsors[1].kind, None);
    }

    #[test]
    fn test_github_sponsors_mirror_dropped() {
        let dir = write_sources(
            r#"[
                {"slug": "github-sponsors", "name": "GitHub Sponsors"},
                {"slug": "acme", "name": "Acme"}
            ]"#,
            "",
        );

        let sponsors = load_sponsors(dir.path()).unwrap();

        assert_eq!(sponsors.len(), 1);
        assert_eq!(sponsors[0].name, "Acme");
    }

    #[test]
    fn test_exported_url_fallback_chain() {
        let dir = write_sources(
            r#"[
                {"slug": "a", "name": "A", "website": "https://a.example"},
                {"slug": "b", "name": "B", "website": "b.example"},
                {"slug": "c", "name": "C", "twitterHandle": "c_handle"},
                {"slug": "d", "name": "D"}
            ]"#,
            "",
        );

        let sponsors = load_sponsors(dir.path()).unwrap();

        assert_eq!(sponsors[0].url, "https://a.example");
        assert_eq!(sponsors[1].url, "http://b.example");
        assert_eq!(sponsors[2].url, "https://twitter.com/@c_handle");
        assert_eq!(sponsors[3].url, "https://opencollective.com/d");
    }

    #[test]
    fn test_exported_avatar_fallback() {
        let dir = write_sources(
            r#"[
                {"slug": "a", "name": "A", "avatar": "/img/sponsors/a.png"},
                {"slug": "b", "name": "B"}
            ]"#,
            "",
        );

        let sponsors = load_sponsors(dir.path()).unwrap();

        assert_eq!(sponsors[0].image, "/img/sponsors/a.png");
        assert_eq!(sponsors[1].image, "/img/user.svg");
    }

    #[test]
    fn test_exported_donation_amounts() {
        let dir = write_sources(
            r#"[{
                "slug": "acme",
                "name": "Acme",
                "tier": "gold",
                "monthlyDonations": 500,
                "yearlyDonations": 6000,
                "totalDonations": 18000
            }]"#,
            "",
        );

        let sponsors = load_sponsors(dir.path()).unwrap();

        assert_eq!(sponsors[0].tier.as_deref(), Some("gold"));
        assert_eq!(sponsors[0].monthly, Some(500.0));
        assert_eq!(sponsors[0].yearly, Some(6000.0));
        assert_eq!(sponsors[0].total, Some(18000.0));
    }

    #[test]
    fn test_manual_logo_expands_to_image_path() {
        let dir = write_sources(
            "[]",
            "- name: Handmade\n  url: https://handmade.example\n  logo: handmade.png\n",
        );

        let sponsors = load_sponsors(dir.path()).unwrap();

        assert_eq!(sponsors[0].image, "/img/sponsors/handmade.png");
    }

    #[test]
    fn test_manual_explicit_image_wins() {
        let dir = write_sources(
            "[]",
            "- name: Handmade\n  url: https://handmade.example\n  logo: handmade.png\n  image: /img/custom.svg\n",
        );

        let sponsors = load_sponsors(dir.path()).unwrap();

        assert_eq!(sponsors[0].image, "/img/custom.svg");
    }

    #[test]
    fn test_manual_without_image_or_logo_errors() {
        let dir = write_sources(
            "[]",
            "- name: Handmade\n  url: https://handmade.example\n",
        );

        let err = load_sponsors(dir.path()).unwrap_err();

        assert!(matches!(err, DataError::Invalid { .. }));
        assert!(err.to_string().contains("Handmade"));
    }

    #[test]
    fn test_empty_manual_file() {
        let dir = write_sources(r#"[{"slug": "acme", "name": "Acme"}]"#, "");

        let sponsors = load_sponsors(dir.path()).unwrap();
        assert_eq!(sponsors.len(), 1);
    }

    #[test]
    fn test_serialized_kind_key_is_type() {
        let sponsor = Sponsor {
            kind: Some("opencollective".to_owned()),
            tier: None,
            name: "Acme".to_owned(),
            url: "https://acme.example".to_owned(),
            image: "/img/user.svg".to_owned(),
            description: None,
            monthly: None,
            yearly: None,
            total: None,
        };
        let json = serde_json::to_value(&sponsor).unwrap();
        assert_eq!(json["type"], "opencollective");
        assert!(json.get("tier").is_none());
    }

    // ── has_url_scheme ──────────────────────────────────────────────────

    #[test]
    fn test_has_url_scheme() {
        assert!(has_url_scheme("https://example.com"));
        assert!(has_url_scheme("http://example.com"));
        assert!(has_url_scheme("mailto:hi@example.com"));
        assert!(!has_url_scheme("example.com"));
        assert!(!has_url_scheme("example.com/path"));
        assert!(!has_url_scheme(""));
    }
}
