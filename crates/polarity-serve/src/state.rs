use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::ServeArgs;
use crate::worker::AnalysisPool;

#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub pool: AnalysisPool,
    pub default_precision: u32,
    pub body_limit_bytes: usize,
}

impl AppState {
    pub fn new(catalog: Catalog, pool: AnalysisPool) -> Self {
        Self {
            catalog: Arc::new(catalog),
            pool,
            default_precision: polarity::DEFAULT_DECIMAL_PRECISION,
            body_limit_bytes: 50 * 1024 * 1024,
        }
    }

    pub fn from_args(args: &ServeArgs) -> Self {
        Self {
            default_precision: args.default_precision,
            body_limit_bytes: args.body_limit_bytes(),
            ..Self::new(
                Catalog::new(args.data_dir.clone()),
                AnalysisPool::new(args.worker_count(), args.timeout()),
            )
        }
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit_bytes = bytes;
        self
    }
}
