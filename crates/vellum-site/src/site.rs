//! Site assembly and the per-document pipeline.
//!
//! [`SiteBuilder`] loads the data bundle and the doc inventory for a resolved
//! configuration, runs lifecycle plugins to collect the route table, and
//! assembles the document transform pipeline with the variant filter in
//! front. The resulting [`Site`] answers structure queries and preprocesses
//! individual documents.

use std::path::PathBuf;

use vellum_config::{Config, ConfigError};
use vellum_data::{DataError, SiteData};
use vellum_markdown::{ParseWarning, Transform, VariantFilter, VariantLabels};

use crate::inventory::{self, DocPage};
use crate::routes::{Plugin, PlaygroundPlugin, Route, RouteActions, SiteContent};

/// Error produced during site assembly.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Configuration loading or validation failed.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Site data failed to load.
    #[error("{0}")]
    Data(#[from] DataError),

    /// A documentation page could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The documentation walk failed.
    #[error("{0}")]
    Walk(#[from] ignore::Error),
}

/// Result of preprocessing one document.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Serialized Markdown after all transforms.
    pub markdown: String,
    /// Parser diagnostics collected for the document.
    pub warnings: Vec<ParseWarning>,
}

/// An assembled documentation site.
///
/// Holds the resolved configuration, the loaded data bundle, the page
/// inventory, the route table, and the document transform pipeline. Safe to
/// share across threads.
pub struct Site {
    config: Config,
    data: SiteData,
    docs: Vec<DocPage>,
    routes: Vec<Route>,
    transforms: Vec<Box<dyn Transform>>,
}

impl Site {
    /// The resolved configuration the site was built from.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The loaded data bundle.
    #[must_use]
    pub fn data(&self) -> &SiteData {
        &self.data
    }

    /// The documentation page inventory, sorted by URL.
    #[must_use]
    pub fn docs(&self) -> &[DocPage] {
        &self.docs
    }

    /// Routes registered by plugins, in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Run the document pipeline over one Markdown source.
    ///
    /// Parses the source, applies every transform in order (the variant
    /// filter first), and serializes the result.
    #[must_use]
    pub fn preprocess(&self, source: &str) -> Preprocessed {
        let mut document = vellum_markdown::parse(source);
        for transform in &self.transforms {
            tracing::debug!(transform = transform.name(), "Applying transform");
            transform.apply(&mut document);
        }
        let markdown = document.to_markdown();
        Preprocessed {
            markdown,
            warnings: document.warnings,
        }
    }
}

/// Builds a [`Site`] from a resolved configuration.
///
/// The playground plugin is installed by default; host plugins run after it.
/// The transform pipeline always starts with the variant filter built from
/// the configured labels and render flag, followed by host transforms in
/// registration order.
pub struct SiteBuilder {
    config: Config,
    plugins: Vec<Box<dyn Plugin>>,
    transforms: Vec<Box<dyn Transform>>,
}

impl SiteBuilder {
    /// Create a builder with the default plugin set.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            plugins: vec![Box::new(PlaygroundPlugin)],
            transforms: Vec::new(),
        }
    }

    /// Register an additional lifecycle plugin.
    #[must_use]
    pub fn with_plugin(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Register a transform to run after the variant filter.
    #[must_use]
    pub fn with_transform(mut self, transform: Box<dyn Transform>) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Load data and docs, run plugins, and assemble the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the data bundle fails to load or the
    /// documentation walk fails.
    pub fn build(self) -> Result<Site, SiteError> {
        let data = SiteData::load(&self.config.data_resolved.dir)?;
        let docs = inventory::scan_docs(&self.config.docs_resolved.source_dir)?;
        tracing::debug!(
            docs = docs.len(),
            users = data.users.len(),
            sponsors = data.sponsors.len(),
            "Site content loaded"
        );

        let mut actions = RouteActions::new();
        let content = SiteContent {
            data: &data,
            docs: &docs,
        };
        for plugin in &self.plugins {
            tracing::debug!(plugin = plugin.name(), "Running content_loaded hook");
            plugin.content_loaded(&content, &mut actions);
        }
        let routes = actions.into_routes();

        let labels = VariantLabels::new(
            self.config.variants.next.clone(),
            self.config.variants.current.clone(),
        );
        let mut transforms: Vec<Box<dyn Transform>> = vec![Box::new(VariantFilter::new(
            labels,
            self.config.render_next,
        ))];
        transforms.extend(self.transforms);

        Ok(Site {
            config: self.config,
            data,
            docs,
            routes,
            transforms,
        })
    }
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::Site: Send, Sync);

    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use pretty_assertions::assert_eq;
    use vellum_config::CliSettings;
    use vellum_markdown::{Block, Document};

    use super::*;

    fn write_site_fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("vellum.toml"),
            "[site]\ntitle = \"Vellum\"\nurl = \"https://vellum.example\"\n",
        )
        .unwrap();

        let data = dir.path().join("data");
        fs::create_dir_all(data.join("tools/webpack")).unwrap();
        fs::write(
            data.join("users.yml"),
            "- name: Acme\n  url: https://acme.example\n  logo: acme.svg\n  pinned: true\n",
        )
        .unwrap();
        fs::write(data.join("sponsors.yml"), "").unwrap();
        fs::write(data.join("sponsors.json"), "[]").unwrap();
        fs::write(
            data.join("team.yml"),
            "core:\n  - name: Ada\n    github: ada\n",
        )
        .unwrap();
        fs::write(data.join("videos.yml"), "- title: Intro\n  youtube: abc123\n").unwrap();
        fs::write(
            data.join("tools.yml"),
            "- category: Bundlers\n  items:\n    - name: webpack\n      slug: webpack\n",
        )
        .unwrap();
        fs::write(data.join("tools/webpack/install.md"), "npm install\n").unwrap();
        fs::write(data.join("tools/webpack/usage.md"), "Use the loader.\n").unwrap();
        fs::write(data.join("tools/setup.md"), "Pick your tool below.\n").unwrap();

        let docs = dir.path().join("docs");
        fs::create_dir_all(docs.join("usage")).unwrap();
        fs::write(docs.join("index.md"), "# Home\n").unwrap();
        fs::write(
            docs.join("usage/options.md"),
            "---\ntitle: Options\n---\n\nBody.\n",
        )
        .unwrap();

        dir
    }

    fn load_fixture_config(dir: &Path, render_next: Option<bool>) -> Config {
        let settings = CliSettings {
            render_next,
            ..CliSettings::default()
        };
        Config::load(Some(&dir.join("vellum.toml")), Some(&settings)).unwrap()
    }

    #[test]
    fn test_build_loads_data_docs_and_routes() {
        let dir = write_site_fixture();
        let config = load_fixture_config(dir.path(), Some(false));
        let site = SiteBuilder::new(config).build().unwrap();

        let urls: Vec<_> = site.docs().iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["", "usage/options"]);
        assert_eq!(site.docs()[0].title, "Home");
        assert_eq!(site.docs()[1].title, "Options");

        assert_eq!(site.data().users.len(), 1);
        assert_eq!(site.data().tool_guides.len(), 1);
        assert_eq!(site.data().setup, "Pick your tool below.\n");

        assert_eq!(site.routes().len(), 1);
        assert_eq!(site.routes()[0].path, "/playground/");
        assert_eq!(site.routes()[0].component, "pages/playground");
    }

    #[test]
    fn test_preprocess_keeps_next_sections() {
        let dir = write_site_fixture();
        let config = load_fixture_config(dir.path(), Some(true));
        let site = SiteBuilder::new(config).build().unwrap();

        let result = site.preprocess(":::v2\nNew way.\n:::\n\n:::v1\nOld way.\n:::\n");
        assert_eq!(result.markdown, "New way.\n");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_preprocess_keeps_current_sections() {
        let dir = write_site_fixture();
        let config = load_fixture_config(dir.path(), Some(false));
        let site = SiteBuilder::new(config).build().unwrap();

        let result = site.preprocess(":::v2\nNew way.\n:::\n\n:::v1\nOld way.\n:::\n");
        assert_eq!(result.markdown, "Old way.\n");
    }

    #[test]
    fn test_preprocess_surfaces_parse_warnings() {
        let dir = write_site_fixture();
        let config = load_fixture_config(dir.path(), Some(false));
        let site = SiteBuilder::new(config).build().unwrap();

        let result = site.preprocess(":::v1\nUnclosed.\n");
        assert_eq!(result.markdown, "Unclosed.\n");
        assert_eq!(result.warnings.len(), 1);
    }

    /// Records whether any next-variant directive was still present when
    /// this transform ran.
    struct NextDirectiveProbe {
        saw_next: Arc<AtomicBool>,
    }

    impl Transform for NextDirectiveProbe {
        fn name(&self) -> &str {
            "next-directive-probe"
        }

        fn apply(&self, document: &mut Document) {
            let saw = document
                .blocks
                .iter()
                .any(|block| matches!(block, Block::Directive(d) if d.name == "v2"));
            self.saw_next.store(saw, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_host_transforms_run_after_variant_filter() {
        let dir = write_site_fixture();
        let config = load_fixture_config(dir.path(), Some(true));

        let saw_next = Arc::new(AtomicBool::new(true));
        let probe = NextDirectiveProbe {
            saw_next: Arc::clone(&saw_next),
        };
        let site = SiteBuilder::new(config)
            .with_transform(Box::new(probe))
            .build()
            .unwrap();

        site.preprocess(":::v2\nNew way.\n:::\n");
        assert!(!saw_next.load(Ordering::Relaxed));
    }

    struct RivalPlaygroundPlugin;

    impl Plugin for RivalPlaygroundPlugin {
        fn name(&self) -> &str {
            "rival-playground"
        }

        fn content_loaded(&self, _content: &SiteContent<'_>, actions: &mut RouteActions) {
            actions.add_route(Route {
                path: "/playground/".to_owned(),
                component: "pages/rival".to_owned(),
            });
        }
    }

    #[test]
    fn test_first_route_registration_wins() {
        let dir = write_site_fixture();
        let config = load_fixture_config(dir.path(), Some(false));
        let site = SiteBuilder::new(config)
            .with_plugin(Box::new(RivalPlaygroundPlugin))
            .build()
            .unwrap();

        assert_eq!(site.routes().len(), 1);
        assert_eq!(site.routes()[0].component, "pages/playground");
    }

    struct VideoIndexPlugin;

    impl Plugin for VideoIndexPlugin {
        fn name(&self) -> &str {
            "video-index"
        }

        fn content_loaded(&self, content: &SiteContent<'_>, actions: &mut RouteActions) {
            if !content.data.videos.is_empty() {
                actions.add_route(Route {
                    path: "/videos/".to_owned(),
                    component: "pages/videos".to_owned(),
                });
            }
        }
    }

    #[test]
    fn test_plugins_see_loaded_content() {
        let dir = write_site_fixture();
        let config = load_fixture_config(dir.path(), Some(false));
        let site = SiteBuilder::new(config)
            .with_plugin(Box::new(VideoIndexPlugin))
            .build()
            .unwrap();

        assert!(site.routes().iter().any(|r| r.path == "/videos/"));
    }

    #[test]
    fn test_build_fails_without_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("vellum.toml"),
            "[site]\ntitle = \"Vellum\"\nurl = \"https://vellum.example\"\n",
        )
        .unwrap();

        let config = load_fixture_config(dir.path(), Some(false));
        let result = SiteBuilder::new(config).build();
        assert!(matches!(result, Err(SiteError::Data(_))));
    }
}
