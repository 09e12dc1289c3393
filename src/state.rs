use crate::cache::ReportCache;
use crate::config::AnalyzerConfig;
use crate::source::DataSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AnalyzerConfig>,
    pub source: Arc<dyn DataSource>,
    pub cache: ReportCache,
}

impl AppState {
    pub fn new(
        config: AnalyzerConfig,
        source: impl DataSource + 'static,
        cache_capacity: usize,
    ) -> Self {
        Self {
            config: Arc::new(config),
            source: Arc::new(source),
            cache: ReportCache::new(cache_capacity),
        }
    }
}
