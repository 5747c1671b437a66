use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use common::config::JanitorConfig;

use crate::{model::GenericError, storage::CartStorage};

/// Drops carts that outlived the retention window.
pub struct CartJanitor {
    storage: Arc<dyn CartStorage>,
    config: JanitorConfig,
}

impl CartJanitor {
    pub fn new(storage: Arc<dyn CartStorage>, config: JanitorConfig) -> Self {
        info!(
            "Initializing cart janitor with {} day retention",
            config.retention_days
        );
        Self { storage, config }
    }

    /// Purges everything older than the retention window once and reports
    /// how many rows went away.
    pub async fn run_once(&self) -> Result<u64, GenericError> {
        let cutoff = Utc::now() - Duration::days(self.config.retention_days);
        debug!("Purging carts created before {}", cutoff);

        let purged = self.storage.purge_older_than(cutoff).await?;
        if purged > 0 {
            info!("Purged {} expired carts", purged);
        }

        Ok(purged)
    }

    pub async fn start(&self) -> Result<(), GenericError> {
        info!(
            "Starting janitor loop, sleeping {}ms between runs",
            self.config.sleep_ms
        );

        loop {
            if let Err(e) = self.run_once().await {
                warn!("Cart purge failed: {}", e);
            }
            tokio::time::sleep(StdDuration::from_millis(self.config.sleep_ms)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::DateTime;

    use super::*;
    use crate::storage::CartRow;

    struct StubStorage {
        cutoffs: Mutex<Vec<DateTime<Utc>>>,
        purged: u64,
    }

    #[async_trait]
    impl CartStorage for StubStorage {
        async fn fetch(&self, _token: &str) -> Result<Option<CartRow>, GenericError> {
            Ok(None)
        }

        async fn upsert(&self, _row: &CartRow) -> Result<(), GenericError> {
            Ok(())
        }

        async fn delete(&self, _token: &str) -> Result<(), GenericError> {
            Ok(())
        }

        async fn replace_token(
            &self,
            _old_token: &str,
            _new_token: &str,
        ) -> Result<(), GenericError> {
            Ok(())
        }

        async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, GenericError> {
            self.cutoffs.lock().unwrap().push(cutoff);
            Ok(self.purged)
        }
    }

    #[tokio::test]
    async fn run_once_purges_with_the_retention_cutoff() {
        let storage = Arc::new(StubStorage {
            cutoffs: Mutex::new(Vec::new()),
            purged: 3,
        });
        let janitor = CartJanitor::new(
            storage.clone(),
            JanitorConfig {
                sleep_ms: 10,
                retention_days: 30,
                log_level: "info".to_string(),
            },
        );

        let purged = janitor.run_once().await.expect("purge must succeed");

        assert_eq!(3, purged);
        let cutoffs = storage.cutoffs.lock().unwrap();
        assert_eq!(1, cutoffs.len());
        // The cutoff sits a full retention window in the past.
        assert!(cutoffs[0] <= Utc::now() - Duration::days(30));
    }
}
