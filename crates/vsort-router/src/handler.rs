//! The classify-then-decide handler core.
//!
//! One invocation per observed artifact: buffer the bytes, call the remote
//! classifier under a deadline, apply the target-tag rule, and write the
//! original bytes to exactly one of the accepted/rejected/error destinations.

use tracing::{error, info, warn};
use uuid::Uuid;
use vsort_models::{contains_target, Artifact, Disposition};
use vsort_vision::VisionError;

use crate::config::RouterConfig;
use crate::error::{RouterError, RouterResult};
use crate::metrics::{record_classify_failure, record_disposition};
use crate::ports::{Classifier, ObjectStore};

/// Routes artifacts to one of three destinations based on classification.
///
/// Stateless across invocations apart from the immutable configuration; safe
/// to share behind an `Arc` between concurrent invocations.
pub struct ClassificationRouter<C, S> {
    classifier: C,
    store: S,
    config: RouterConfig,
}

impl<C: Classifier, S: ObjectStore> ClassificationRouter<C, S> {
    pub fn new(classifier: C, store: S, config: RouterConfig) -> Self {
        Self {
            classifier,
            store,
            config,
        }
    }

    /// Process one artifact end to end.
    ///
    /// Always writes the original bytes to exactly one destination. Returns
    /// the final disposition; returns `Err` only when the write recording the
    /// disposition itself failed, in which case the trigger should redeliver.
    pub async fn handle(&self, artifact: Artifact) -> RouterResult<Disposition> {
        let invocation_id = Uuid::new_v4();

        if !self.config.process_delay.is_zero() {
            tokio::time::sleep(self.config.process_delay).await;
        }

        let decided = self.classify_and_decide(&artifact).await;
        let (mut disposition, mut cause) = match decided {
            Ok(disposition) => (disposition, None),
            Err(e) => {
                record_classify_failure();
                (Disposition::Error, Some(e))
            }
        };

        let content_type = artifact.content_type();
        let mut destination = disposition.key(&artifact.name);

        if let Err(e) = self
            .store
            .put(&destination, &artifact.bytes, content_type)
            .await
        {
            if disposition.is_error() {
                // The error-path write is the last resort; surface the
                // failure so the hosting trigger can redeliver.
                return Err(e.into());
            }
            warn!(
                invocation_id = %invocation_id,
                artifact = %artifact.name,
                destination = %destination,
                "Destination write failed, rerouting to error destination: {}", e
            );
            disposition = Disposition::Error;
            cause = Some(e.into());
            destination = disposition.key(&artifact.name);
            self.store
                .put(&destination, &artifact.bytes, content_type)
                .await?;
        }

        record_disposition(disposition);

        // Exactly one disposition line per invocation.
        match &cause {
            None => info!(
                invocation_id = %invocation_id,
                artifact = %artifact.name,
                size = artifact.size(),
                disposition = %disposition,
                destination = %destination,
                write_status = "ok",
                "Artifact routed"
            ),
            Some(e) => error!(
                invocation_id = %invocation_id,
                artifact = %artifact.name,
                size = artifact.size(),
                disposition = %disposition,
                destination = %destination,
                write_status = "ok",
                cause = %e,
                "Artifact routed to error destination"
            ),
        }

        Ok(disposition)
    }

    /// Classify the bytes and decide between the two success dispositions.
    ///
    /// Any failure here (unreadable input, transport, API status, parse,
    /// deadline) is absorbed by the caller into the error destination.
    async fn classify_and_decide(&self, artifact: &Artifact) -> RouterResult<Disposition> {
        if artifact.is_empty() {
            return Err(RouterError::read("source artifact is empty"));
        }

        let tags = tokio::time::timeout(
            self.config.classify_timeout,
            self.classifier.classify(&artifact.bytes),
        )
        .await
        .map_err(|_| {
            VisionError::timeout(format!(
                "no response within {:?}",
                self.config.classify_timeout
            ))
        })??;

        if contains_target(&tags, &self.config.target_tags, self.config.confidence_threshold) {
            Ok(Disposition::Accepted)
        } else {
            Ok(Disposition::Rejected)
        }
    }
}
