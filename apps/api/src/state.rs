use std::sync::Arc;

use crate::config::Config;
use crate::skills::tagger::EntityTagger;
use crate::store::ResultStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Everything here is read-only after startup; requests share
/// nothing mutable.
#[derive(Clone)]
pub struct AppState {
    /// Append-only analysis log behind the narrow store interface.
    pub store: Arc<dyn ResultStore>,
    /// Entity-tagger capability. `None` means the skill extractor runs on
    /// catalog matching alone.
    pub tagger: Option<Arc<dyn EntityTagger>>,
    pub config: Config,
}
