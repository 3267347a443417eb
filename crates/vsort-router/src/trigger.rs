//! Polling trigger adapter over the source prefix.
//!
//! Stands in for the hosting runtime's storage-event trigger: lists the
//! source prefix on an interval and invokes the handler once per newly
//! observed object. Redelivery of failed invocations happens here, never
//! inside the handler.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::sync::{watch, Semaphore};
use tracing::{error, info, warn};
use vsort_models::Artifact;

use crate::config::RouterConfig;
use crate::error::{RouterError, RouterResult};
use crate::handler::ClassificationRouter;
use crate::metrics::record_poll_cycle;
use crate::ports::{Classifier, ObjectStore};

/// Polls the source location and dispatches artifacts to the handler.
pub struct SourcePoller<C, S> {
    router: Arc<ClassificationRouter<C, S>>,
    store: S,
    config: RouterConfig,
    semaphore: Arc<Semaphore>,
    // Keys with an invocation currently in flight (per-key serialization).
    in_flight: Arc<Mutex<HashSet<String>>>,
    // Keys routed successfully during this process lifetime.
    processed: Arc<Mutex<HashSet<String>>>,
}

impl<C, S> SourcePoller<C, S>
where
    C: Classifier + 'static,
    S: ObjectStore + Clone + 'static,
{
    pub fn new(router: ClassificationRouter<C, S>, store: S, config: RouterConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent));
        Self {
            router: Arc::new(router),
            store,
            config,
            semaphore,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            processed: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Poll until the shutdown signal flips.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> RouterResult<()> {
        info!(
            "Starting source poller on prefix '{}' ({} max concurrent)",
            self.config.source_prefix, self.config.max_concurrent
        );

        let mut interval = tokio::time::interval(self.config.poll_interval);

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Shutdown signal received, stopping poller");
                        break;
                    }
                }
                _ = interval.tick() => {
                    record_poll_cycle();
                    if let Err(e) = self.poll_once().await {
                        warn!("Poll cycle failed: {}", e);
                    }
                }
            }
        }

        Ok(())
    }

    /// Run one poll cycle; returns how many artifacts were dispatched.
    pub async fn poll_once(&self) -> RouterResult<usize> {
        let objects = self.store.list(&self.config.source_prefix).await?;
        let mut dispatched = 0;

        for object in objects {
            let name = match logical_name(&object.key, &self.config.source_prefix) {
                Some(name) => name,
                None => continue,
            };

            if self.processed.lock().unwrap().contains(&object.key) {
                continue;
            }

            if self.config.serialize_per_key
                && !self.in_flight.lock().unwrap().insert(object.key.clone())
            {
                continue;
            }

            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| RouterError::config_error("worker semaphore closed"))?;

            let router = Arc::clone(&self.router);
            let store = self.store.clone();
            let in_flight = Arc::clone(&self.in_flight);
            let processed = Arc::clone(&self.processed);
            let serialize = self.config.serialize_per_key;
            let key = object.key.clone();

            tokio::spawn(async move {
                let _permit = permit;
                let outcome = match store.get(&key).await {
                    Ok(bytes) => router.handle(Artifact::new(&name, bytes)).await,
                    Err(e) => Err(e.into()),
                };

                match outcome {
                    Ok(_) => {
                        processed.lock().unwrap().insert(key.clone());
                    }
                    // Leave the key unprocessed so a later poll redelivers.
                    Err(e) => error!(artifact = %name, "Invocation failed: {}", e),
                }

                if serialize {
                    in_flight.lock().unwrap().remove(&key);
                }
            });

            dispatched += 1;
        }

        Ok(dispatched)
    }
}

/// Logical artifact name relative to the source prefix.
///
/// Returns `None` for the prefix placeholder itself or keys outside the
/// prefix.
fn logical_name(key: &str, prefix: &str) -> Option<String> {
    let rest = key.strip_prefix(prefix)?.trim_start_matches('/');
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}
