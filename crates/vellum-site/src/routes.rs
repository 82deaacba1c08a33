//! Route registration through lifecycle plugins.
//!
//! Plugins run once site content is loaded and may contribute routes to the
//! site's route table. Each route pairs an absolute URL path with the
//! component identifier the host framework resolves when rendering it.

use vellum_data::SiteData;

use crate::inventory::DocPage;

/// A registered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Absolute URL path (e.g., `/playground/`).
    pub path: String,
    /// Component identifier resolved by the host framework.
    pub component: String,
}

/// Loaded site content, as presented to plugins.
#[derive(Debug, Clone, Copy)]
pub struct SiteContent<'a> {
    /// The site data bundle.
    pub data: &'a SiteData,
    /// The documentation page inventory, sorted by URL.
    pub docs: &'a [DocPage],
}

/// Collects routes registered by plugins.
#[derive(Debug, Default)]
pub struct RouteActions {
    routes: Vec<Route>,
}

impl RouteActions {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    ///
    /// Registration is first-wins: a route whose path is already taken is
    /// dropped with a warning.
    pub fn add_route(&mut self, route: Route) {
        if let Some(existing) = self.routes.iter().find(|r| r.path == route.path) {
            tracing::warn!(
                path = %route.path,
                kept = %existing.component,
                dropped = %route.component,
                "Duplicate route path, keeping first registration"
            );
            return;
        }
        self.routes.push(route);
    }

    pub(crate) fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

/// A site lifecycle plugin.
///
/// Plugins are invoked during site assembly, after configuration, data, and
/// the doc inventory have loaded.
pub trait Plugin: Send + Sync {
    /// Stable name, used in logs.
    fn name(&self) -> &str;

    /// Called once all site content is loaded. Routes registered through
    /// `actions` end up in the site's route table.
    fn content_loaded(&self, content: &SiteContent<'_>, actions: &mut RouteActions);
}

/// Path of the playground route.
const PLAYGROUND_PATH: &str = "/playground/";
/// Component rendering the playground page.
const PLAYGROUND_COMPONENT: &str = "pages/playground";

/// Registers the interactive playground page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaygroundPlugin;

impl Plugin for PlaygroundPlugin {
    fn name(&self) -> &str {
        "playground"
    }

    fn content_loaded(&self, _content: &SiteContent<'_>, actions: &mut RouteActions) {
        actions.add_route(Route {
            path: PLAYGROUND_PATH.to_owned(),
            component: PLAYGROUND_COMPONENT.to_owned(),
        });
    }
}
