//! Site assembly for vellum.
//!
//! This crate ties the other vellum crates together:
//! - [`SiteBuilder`] loads configuration, the site data bundle, and the
//!   documentation inventory
//! - lifecycle [`Plugin`]s register routes into the site's route table
//! - [`Site::preprocess`] runs the per-document transform pipeline, with the
//!   variant section filter always in front
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use vellum_config::Config;
//! use vellum_site::SiteBuilder;
//!
//! let config = Config::load(None, None)?;
//! let site = SiteBuilder::new(config).build()?;
//!
//! let routes = site.routes();
//! let filtered = site.preprocess("# Guide\n\n:::v2\nNext-generation docs.\n:::\n");
//! # let _ = (routes, filtered);
//! # Ok(())
//! # }
//! ```

pub(crate) mod inventory;
pub(crate) mod routes;
pub(crate) mod site;

pub use inventory::{DocPage, scan_docs};
pub use routes::{Plugin, PlaygroundPlugin, Route, RouteActions, SiteContent};
pub use site::{Preprocessed, Site, SiteBuilder, SiteError};
