//! The full data bundle a site build consumes.

use serde::Serialize;
use std::path::Path;

use crate::{DataError, ShowcaseUser, Sponsor, Team, ToolCategory, ToolGuide, Video};

/// Everything loaded from the data directory, in one place.
///
/// Page templates receive this bundle; the `data` CLI command serializes
/// it for inspection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteData {
    /// Showcase users.
    pub users: Vec<ShowcaseUser>,
    /// Merged sponsor list, exported entries first.
    pub sponsors: Vec<Sponsor>,
    /// Team roster.
    pub team: Team,
    /// Talk videos.
    pub videos: Vec<Video>,
    /// Setup page tool categories.
    pub tools: Vec<ToolCategory>,
    /// Per-tool markdown guides.
    pub tool_guides: Vec<ToolGuide>,
    /// Shared setup snippet appended after per-tool steps.
    pub setup: String,
}

impl SiteData {
    /// Load the complete bundle from a data directory.
    ///
    /// # Errors
    ///
    /// Returns the first loader error; the bundle is all-or-nothing.
    pub fn load(data_dir: &Path) -> Result<Self, DataError> {
        Ok(Self {
            users: crate::load_users(data_dir)?,
            sponsors: crate::load_sponsors(data_dir)?,
            team: crate::load_team(data_dir)?,
            videos: crate::load_videos(data_dir)?,
            tools: crate::load_tool_catalog(data_dir)?,
            tool_guides: crate::load_tool_guides(data_dir)?,
            setup: crate::load_setup_snippet(data_dir)?,
        })
    }
}
