//! Bounded pool for blocking analysis work.

use std::sync::Arc;
use std::time::Duration;

use polarity::{Analysis, AnalysisOptions, GraphRequest};
use tokio::sync::Semaphore;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone)]
pub struct AnalysisPool {
    semaphore: Arc<Semaphore>,
    width: usize,
    timeout: Duration,
}

impl AnalysisPool {
    pub fn new(width: usize, timeout: Duration) -> Self {
        let width = width.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(width)),
            width,
            timeout,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs the pipeline on a blocking thread once a permit is free.
    ///
    /// The timeout covers waiting for a permit as well as the analysis. A timed-out analysis keeps
    /// its permit until the blocking thread finishes.
    pub async fn analyze(
        &self,
        request: GraphRequest,
        options: AnalysisOptions,
    ) -> ApiResult<Analysis> {
        let semaphore = self.semaphore.clone();
        let work = async move {
            let permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| ApiError::internal("analysis pool is closed"))?;

            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                polarity::analyze_request(&request, &options)
            });
            match handle.await {
                Ok(result) => result.map_err(ApiError::from),
                Err(err) => Err(ApiError::internal(format!("analysis task failed: {err}"))),
            }
        };

        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "analysis timed out");
                Err(ApiError::from(polarity::Error::decomposition(format!(
                    "analysis timed out after {} ms",
                    self.timeout.as_millis()
                ))))
            }
        }
    }
}
