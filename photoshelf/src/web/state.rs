//! State shared across request handlers.

use std::sync::Arc;

use uuid::Uuid;

use crate::artifact::ArtifactCache;
use crate::vfs::VfsRoot;

pub(super) type SharedState = Arc<AppState>;

/// Everything a handler needs: the served tree, the artifact cache,
/// and a per-process cache-buster token.
pub struct AppState {
    pub(super) vfs: VfsRoot,
    pub(super) artifacts: ArtifactCache,
    /// Appended to image URLs so browsers re-fetch after a restart
    /// despite the long cache age on image responses.
    pub(super) cache_buster: String,
}

impl AppState {
    pub fn new(vfs: VfsRoot, artifacts: ArtifactCache) -> Self {
        Self {
            vfs,
            artifacts,
            cache_buster: Uuid::new_v4().simple().to_string(),
        }
    }
}
