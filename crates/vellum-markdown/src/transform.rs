//! Document transform trait.

use crate::block::Document;

/// A named, in-place document transformation.
///
/// Transforms run in a fixed order per document and hold no per-document
/// state; implementations must be `Send + Sync` so the host can process
/// documents concurrently.
pub trait Transform: Send + Sync {
    /// Stable name, used in logs.
    fn name(&self) -> &str;

    /// Rewrite the document in place.
    fn apply(&self, document: &mut Document);
}
