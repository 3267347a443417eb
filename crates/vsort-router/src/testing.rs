//! In-memory fakes for the port traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use vsort_models::Tag;
use vsort_storage::{ObjectInfo, StorageError, StorageResult};
use vsort_vision::{VisionError, VisionResult};

use crate::ports::{Classifier, ObjectStore};

/// Classifier returning a fixed tag set, optionally after a delay.
#[derive(Clone)]
pub struct StaticClassifier {
    tags: Vec<Tag>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl StaticClassifier {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self {
            tags,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Classifier for StaticClassifier {
    async fn classify(&self, _image: &[u8]) -> VisionResult<Vec<Tag>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.tags.clone())
    }
}

/// Classifier that always fails with an API error.
#[derive(Clone)]
pub struct FailingClassifier;

#[async_trait]
impl Classifier for FailingClassifier {
    async fn classify(&self, _image: &[u8]) -> VisionResult<Vec<Tag>> {
        Err(VisionError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}

/// In-memory object store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_put_prefix: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    /// Seed an object, e.g. a source artifact for the poller.
    pub fn insert(&self, key: &str, bytes: Vec<u8>) {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Make every put whose key starts with `prefix` fail.
    pub fn fail_puts_matching(&self, prefix: &str) {
        *self.fail_put_prefix.lock().unwrap() = Some(prefix.to_string());
    }

    /// Let puts succeed again.
    pub fn clear_put_failures(&self) {
        *self.fail_put_prefix.lock().unwrap() = None;
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, data: &[u8], _content_type: &str) -> StorageResult<()> {
        if let Some(prefix) = self.fail_put_prefix.lock().unwrap().as_deref() {
            if key.starts_with(prefix) {
                return Err(StorageError::upload_failed(format!(
                    "injected failure for {}",
                    key
                )));
            }
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectInfo>> {
        let objects = self.objects.lock().unwrap();
        let mut infos: Vec<ObjectInfo> = objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, bytes)| ObjectInfo {
                key: key.clone(),
                size: bytes.len() as u64,
            })
            .collect();
        infos.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(infos)
    }
}
