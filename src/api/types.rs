//! Shared types for the metrics API layer.

use std::sync::Arc;

use crate::analysis::{ImageAnalyzer, LaplacianAnalyzer};

/// Shared context for all API routes.
///
/// Holds the analyzer behind an `Arc` so cloning the context per request
/// is cheap and tests can inject a scripted analyzer.
#[derive(Clone)]
pub struct ApiContext {
    pub analyzer: Arc<dyn ImageAnalyzer>,
}

impl ApiContext {
    /// Context wired with the production analyzer.
    pub fn new() -> Self {
        Self {
            analyzer: Arc::new(LaplacianAnalyzer::new()),
        }
    }

    /// Context with an injected analyzer, for tests.
    pub fn with_analyzer(analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl Default for ApiContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_analyzer() {
        let ctx = ApiContext::new();
        let clone = ctx.clone();
        assert!(Arc::ptr_eq(&ctx.analyzer, &clone.analyzer));
    }
}
