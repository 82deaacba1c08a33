//! Configuration management for vellum.
//!
//! Parses `vellum.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! The render flag for variant sections is resolved at load time from the
//! environment variable named by `[variants] env` (see [`env_flag`]) and
//! stored on the loaded config; the markdown pipeline receives it as a
//! plain boolean and never consults the environment itself.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `site.repo_url`
//! - `docs.edit_url`
//! - `docs.source_dir` (also expands a leading `~`)
//! - `data.dir` (also expands a leading `~`)

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override data directory.
    pub data_dir: Option<PathBuf>,
    /// Override the render flag for next-variant sections.
    pub render_next: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vellum.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata (raw strings from TOML).
    site: SiteSectionRaw,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsSectionRaw,
    /// Data directory configuration.
    data: DataSectionRaw,
    /// Variant section labels and the render flag's variable name.
    pub variants: VariantsConfig,
    /// Navbar configuration.
    pub navbar: NavbarConfig,
    /// Theme configuration.
    pub theme: ThemeConfig,
    /// Script tags injected into every page.
    pub scripts: Vec<ScriptTag>,

    /// Resolved site metadata (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved data configuration (set after loading).
    #[serde(skip)]
    pub data_resolved: DataConfig,
    /// Whether next-variant sections render (set after loading).
    #[serde(skip)]
    pub render_next: bool,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site metadata as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteSectionRaw {
    title: Option<String>,
    tagline: Option<String>,
    url: Option<String>,
    base_url: Option<String>,
    favicon: Option<String>,
    title_delimiter: Option<String>,
    repo_url: Option<String>,
    on_broken_links: Option<BrokenLinks>,
}

/// Resolved site metadata with defaults applied.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site title, used in page titles and the navbar.
    pub title: String,
    /// Optional tagline for the landing page.
    pub tagline: Option<String>,
    /// Canonical site URL.
    pub url: String,
    /// URL path prefix the site is served under. Starts and ends with `/`.
    pub base_url: String,
    /// Favicon path relative to the static root.
    pub favicon: Option<String>,
    /// Separator between page title and site title.
    pub title_delimiter: String,
    /// Source repository URL, used for footer and edit links.
    pub repo_url: Option<String>,
    /// How broken internal links are reported.
    pub on_broken_links: BrokenLinks,
}

impl SiteConfig {
    /// Browser title for a page, e.g. `"Plugins · Documentation"`.
    #[must_use]
    pub fn page_title(&self, page: &str) -> String {
        format!("{page} {} {}", self.title_delimiter, self.title)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            tagline: None,
            url: "http://localhost".to_owned(),
            base_url: "/".to_owned(),
            favicon: None,
            title_delimiter: "·".to_owned(),
            repo_url: None,
            on_broken_links: BrokenLinks::Throw,
        }
    }
}

/// Broken internal link handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinks {
    /// Fail the build.
    #[default]
    Throw,
    /// Log a warning and continue.
    Warn,
    /// Silently continue.
    Ignore,
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsSectionRaw {
    source_dir: Option<String>,
    edit_url: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Clone, Default)]
pub struct DocsConfig {
    /// Source directory for markdown pages.
    pub source_dir: PathBuf,
    /// Base URL for per-page edit links.
    pub edit_url: Option<String>,
}

/// Raw data configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DataSectionRaw {
    dir: Option<String>,
}

/// Resolved data directory configuration.
#[derive(Debug, Clone, Default)]
pub struct DataConfig {
    /// Directory holding the site data files (users, sponsors, team, ...).
    pub dir: PathBuf,
}

impl DataConfig {
    /// Directory holding per-tool guide snippets (`<dir>/tools/`).
    #[must_use]
    pub fn tools_dir(&self) -> PathBuf {
        self.dir.join("tools")
    }
}

/// Variant section configuration.
///
/// `next` and `current` are the two directive labels the variant filter
/// recognizes; `env` names the environment variable that decides which
/// variant renders.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VariantsConfig {
    /// Label for next-variant sections.
    pub next: String,
    /// Label for current-variant sections.
    pub current: String,
    /// Environment variable consulted for the render flag.
    pub env: String,
}

impl Default for VariantsConfig {
    fn default() -> Self {
        Self {
            next: "v2".to_owned(),
            current: "v1".to_owned(),
            env: "VELLUM_RENDER_NEXT".to_owned(),
        }
    }
}

/// Navbar configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Navbar entries in display order.
    pub items: Vec<NavbarItem>,
}

/// One navbar entry. Exactly one of `to` (site-relative) or `href`
/// (external) must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct NavbarItem {
    /// Display label.
    pub label: String,
    /// Site-relative target path.
    #[serde(default)]
    pub to: Option<String>,
    /// External target URL.
    #[serde(default)]
    pub href: Option<String>,
    /// Which side of the navbar the entry renders on.
    #[serde(default)]
    pub position: NavbarPosition,
}

/// Navbar entry placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    /// Left side.
    Left,
    /// Right side.
    #[default]
    Right,
}

/// Color theme configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Mode used before the visitor picks one.
    pub default_mode: ThemeMode,
    /// Hide the light/dark switch.
    pub disable_switch: bool,
    /// Honor the OS-level color scheme preference.
    pub respect_prefers_color_scheme: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_mode: ThemeMode::Light,
            disable_switch: false,
            respect_prefers_color_scheme: true,
        }
    }
}

/// Color theme mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light mode.
    #[default]
    Light,
    /// Dark mode.
    Dark,
}

/// A script tag injected into every page.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptTag {
    /// Script source URL or site-relative path.
    pub src: String,
    /// Add the `defer` attribute.
    #[serde(default)]
    pub defer: bool,
    /// Load as an ES module.
    #[serde(default)]
    pub module: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error in {field}: {message}")]
    Validation {
        /// Config field path (e.g., `site.base_url`).
        field: String,
        /// What is wrong with the value.
        message: String,
    },
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., `docs.source_dir`).
        field: String,
        /// Error message (e.g., "${`VELLUM_DOCS`} not set").
        message: String,
    },
}

/// Truthiness of an environment flag variable.
///
/// The flag is false when the variable is absent, empty, `"false"`, or
/// `"0"`; any other value counts as true.
#[must_use]
pub fn env_flag(name: &str) -> bool {
    match std::env::var(name) {
        Ok(value) => !matches!(value.as_str(), "" | "false" | "0"),
        Err(_) => false,
    }
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_owned(),
        message: message.to_owned(),
    }
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(validation(field, "cannot be empty"));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(validation(field, "must start with http:// or https://"));
    }
    Ok(())
}

/// Whether a variant label is usable as a directive name.
fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `vellum.toml` in current directory and parents,
    /// falling back to defaults when nothing is found.
    ///
    /// The render flag is resolved from the configured environment variable
    /// here; CLI settings are applied last, so CLI arguments take precedence
    /// over both the config file and the environment.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist or parsing,
    /// resolution, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        config.render_next = env_flag(&config.variants.env);

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(data_dir) = &settings.data_dir {
            self.data_resolved.dir.clone_from(data_dir);
        }
        if let Some(render_next) = settings.render_next {
            self.render_next = render_next;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteSectionRaw::default(),
            docs: DocsSectionRaw::default(),
            data: DataSectionRaw::default(),
            variants: VariantsConfig::default(),
            navbar: NavbarConfig::default(),
            theme: ThemeConfig::default(),
            scripts: Vec::new(),
            site_resolved: SiteConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                edit_url: None,
            },
            data_resolved: DataConfig {
                dir: base.join("data"),
            },
            render_next: false,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid
    /// values. Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_docs()?;
        self.validate_variants()?;
        self.validate_navbar()?;
        self.validate_scripts()?;
        Ok(())
    }

    /// Validate resolved site metadata.
    fn validate_site(&self) -> Result<(), ConfigError> {
        let site = &self.site_resolved;
        require_non_empty(&site.title, "site.title")?;
        require_non_empty(&site.url, "site.url")?;
        require_http_url(&site.url, "site.url")?;
        if !site.base_url.starts_with('/') || !site.base_url.ends_with('/') {
            return Err(validation("site.base_url", "must start and end with /"));
        }
        require_non_empty(&site.title_delimiter, "site.title_delimiter")?;
        if let Some(repo_url) = &site.repo_url {
            require_http_url(repo_url, "site.repo_url")?;
        }
        Ok(())
    }

    /// Validate resolved docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        if let Some(edit_url) = &self.docs_resolved.edit_url {
            require_http_url(edit_url, "docs.edit_url")?;
        }
        Ok(())
    }

    /// Validate variant labels.
    fn validate_variants(&self) -> Result<(), ConfigError> {
        if !is_valid_label(&self.variants.next) {
            return Err(validation(
                "variants.next",
                "must be a non-empty run of alphanumerics, - or _",
            ));
        }
        if !is_valid_label(&self.variants.current) {
            return Err(validation(
                "variants.current",
                "must be a non-empty run of alphanumerics, - or _",
            ));
        }
        if self.variants.next == self.variants.current {
            return Err(validation(
                "variants.current",
                "must differ from variants.next",
            ));
        }
        Ok(())
    }

    /// Validate navbar entries.
    fn validate_navbar(&self) -> Result<(), ConfigError> {
        for (i, item) in self.navbar.items.iter().enumerate() {
            let field = format!("navbar.items[{i}]");
            require_non_empty(&item.label, &format!("{field}.label"))?;
            match (&item.to, &item.href) {
                (Some(_), Some(_)) | (None, None) => {
                    return Err(validation(&field, "must set exactly one of to or href"));
                }
                (Some(to), None) => require_non_empty(to, &format!("{field}.to"))?,
                (None, Some(href)) => require_http_url(href, &format!("{field}.href"))?,
            }
        }
        Ok(())
    }

    /// Validate script tags.
    fn validate_scripts(&self) -> Result<(), ConfigError> {
        for (i, script) in self.scripts.iter().enumerate() {
            require_non_empty(&script.src, &format!("scripts[{i}].src"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = &self.site.url {
            self.site.url = Some(expand::expand_env(url, "site.url")?);
        }
        if let Some(url) = &self.site.repo_url {
            self.site.repo_url = Some(expand::expand_env(url, "site.repo_url")?);
        }
        if let Some(url) = &self.docs.edit_url {
            self.docs.edit_url = Some(expand::expand_env(url, "docs.edit_url")?);
        }
        if let Some(dir) = &self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_path(dir, "docs.source_dir")?);
        }
        if let Some(dir) = &self.data.dir {
            self.data.dir = Some(expand::expand_path(dir, "data.dir")?);
        }
        Ok(())
    }

    /// Resolve raw sections into their resolved forms.
    ///
    /// Relative paths are resolved against the config file's directory.
    /// Validates that required site fields are present.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.site_resolved = SiteConfig {
            title: self
                .site
                .title
                .clone()
                .ok_or_else(|| validation("site.title", "is required"))?,
            tagline: self.site.tagline.clone(),
            url: self
                .site
                .url
                .clone()
                .ok_or_else(|| validation("site.url", "is required"))?,
            base_url: self.site.base_url.clone().unwrap_or_else(|| "/".to_owned()),
            favicon: self.site.favicon.clone(),
            title_delimiter: self
                .site
                .title_delimiter
                .clone()
                .unwrap_or_else(|| "·".to_owned()),
            repo_url: self.site.repo_url.clone(),
            on_broken_links: self.site.on_broken_links.unwrap_or_default(),
        };

        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            edit_url: self.docs.edit_url.clone(),
        };
        self.data_resolved = DataConfig {
            dir: resolve(self.data.dir.as_deref(), "data"),
        };

        Ok(())
    }
}
