//! Reference option lists with cache-and-revalidate
//!
//! A fresh entry is served as-is. A stale entry is still served while a
//! background task refetches it. With nothing cached the fetch happens
//! inline, and if that fails the bundled defaults are returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;

use shared::models::ReferenceOptions;

use crate::external::{UpstreamError, YieldApi};

const OPTIONS_KEY: &str = "reference:options";

#[derive(Clone)]
struct CachedOptions {
    options: Arc<ReferenceOptions>,
    fetched_at: Instant,
}

/// Shared reference provider; clones share one cache
#[derive(Clone)]
pub struct ReferenceService {
    api: Arc<dyn YieldApi>,
    cache: Cache<&'static str, CachedOptions>,
    freshness: Duration,
    revalidating: Arc<AtomicBool>,
}

impl ReferenceService {
    pub fn new(api: Arc<dyn YieldApi>, freshness: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).build();
        Self {
            api,
            cache,
            freshness,
            revalidating: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current option set; never fails
    pub async fn options(&self) -> ReferenceOptions {
        if let Some(cached) = self.cache.get(&OPTIONS_KEY).await {
            if cached.fetched_at.elapsed() < self.freshness {
                tracing::debug!("Reference options cache hit");
            } else {
                tracing::debug!("Reference options stale, revalidating in background");
                self.spawn_revalidation();
            }
            return cached.options.as_ref().clone();
        }

        match self.revalidate().await {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!(error = %e, "Reference options unavailable, using bundled defaults");
                ReferenceOptions::default()
            }
        }
    }

    /// Fetch from the backend and replace the cached entry
    pub async fn revalidate(&self) -> Result<ReferenceOptions, UpstreamError> {
        let options = self.api.reference_options().await?;
        self.cache
            .insert(
                OPTIONS_KEY,
                CachedOptions {
                    options: Arc::new(options.clone()),
                    fetched_at: Instant::now(),
                },
            )
            .await;
        tracing::debug!(
            crops = options.crops.len(),
            soils = options.soils.len(),
            "Reference options cached"
        );
        Ok(options)
    }

    fn spawn_revalidation(&self) {
        // One refresh in flight at a time
        if self.revalidating.swap(true, Ordering::AcqRel) {
            return;
        }

        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.revalidate().await {
                tracing::warn!(error = %e, "Background revalidation failed, keeping last-known options");
            }
            service.revalidating.store(false, Ordering::Release);
        });
    }
}
