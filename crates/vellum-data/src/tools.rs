//! Tool setup catalog and per-tool markdown guides.
//!
//! `tools.yml` lists the tool categories shown on the setup page. Each
//! subdirectory of `tools/` is one tool's guide, holding `install.md` and
//! `usage.md` snippets; `tools/setup.md` is the shared configuration
//! snippet rendered after the per-tool steps.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::DataError;

const CATALOG_FILE: &str = "tools.yml";
const TOOLS_DIR: &str = "tools";
const SETUP_FILE: &str = "setup.md";
const INSTALL_FILE: &str = "install.md";
const USAGE_FILE: &str = "usage.md";

/// One category of the setup page tool picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCategory {
    /// Category heading.
    pub category: String,
    /// Tools in the category.
    #[serde(default)]
    pub items: Vec<ToolItem>,
}

/// One selectable tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolItem {
    /// Display name.
    pub name: String,
    /// Guide directory name under `tools/`.
    pub slug: String,
}

/// Markdown guide snippets for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolGuide {
    /// Directory name, shown as the guide title.
    pub name: String,
    /// Guide directory under `tools/`.
    pub dir: PathBuf,
    /// Contents of `install.md`.
    pub install: String,
    /// Contents of `usage.md`.
    pub usage: String,
}

/// Load the tool categories from `<data_dir>/tools.yml`.
///
/// # Errors
///
/// Returns an error if the file is missing or not valid YAML.
pub fn load_tool_catalog(data_dir: &Path) -> Result<Vec<ToolCategory>, DataError> {
    crate::load_yaml(&data_dir.join(CATALOG_FILE))
}

/// Load the shared setup snippet from `<data_dir>/tools/setup.md`.
///
/// # Errors
///
/// Returns an error if the file is missing.
pub fn load_setup_snippet(data_dir: &Path) -> Result<String, DataError> {
    crate::read_file(&data_dir.join(TOOLS_DIR).join(SETUP_FILE))
}

/// Load one guide per subdirectory of `<data_dir>/tools/`, sorted by name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or a guide is missing
/// its `install.md` or `usage.md`.
pub fn load_tool_guides(data_dir: &Path) -> Result<Vec<ToolGuide>, DataError> {
    let tools_dir = data_dir.join(TOOLS_DIR);
    let entries = std::fs::read_dir(&tools_dir).map_err(|source| DataError::Io {
        path: tools_dir.clone(),
        source,
    })?;

    let mut guides = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DataError::Io {
            path: tools_dir.clone(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            tracing::warn!(path = %path.display(), "Skipping tool directory with non-UTF-8 name");
            continue;
        };
        guides.push(ToolGuide {
            name: name.to_owned(),
            install: crate::read_file(&path.join(INSTALL_FILE))?,
            usage: crate::read_file(&path.join(USAGE_FILE))?,
            dir: path,
        });
    }

    // Directory iteration order is platform-dependent
    guides.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(guides)
}
