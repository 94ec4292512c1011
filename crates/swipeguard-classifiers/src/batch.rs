//! Concurrent batch scoring
//!
//! Each conversation is scored on the runtime's blocking pool and the batch
//! is joined once every task finishes. Conversations are independent, so the
//! result map is the same as scoring them one by one.

use crate::timewaster::{log_verdict, ScoreResult, TimewasterClassifier};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use swipeguard_core::{Conversation, Error, Result};
use tracing::{debug, info};

/// Scores batches of conversations in parallel
#[derive(Debug, Clone)]
pub struct BatchFilter {
    classifier: Arc<TimewasterClassifier>,
}

impl BatchFilter {
    pub fn new(classifier: Arc<TimewasterClassifier>) -> Self {
        Self { classifier }
    }

    /// Score every conversation, keyed by match name.
    ///
    /// Fails if any conversation carries timestamps on only some messages.
    pub async fn filter(
        &self,
        conversations: BTreeMap<String, Conversation>,
    ) -> Result<BTreeMap<String, ScoreResult>> {
        let start = Instant::now();
        let count = conversations.len();

        let tasks = conversations.into_iter().map(|(name, conversation)| {
            let classifier = Arc::clone(&self.classifier);
            tokio::task::spawn_blocking(move || {
                info!("Analyzing conversation with {}", name);
                let result = classifier.analyze_conversation(&conversation)?;
                log_verdict(&name, &result);
                Ok::<_, Error>((name, result))
            })
        });

        let mut results = BTreeMap::new();
        for joined in join_all(tasks).await {
            let (name, result) = joined
                .map_err(|e| Error::internal(format!("Scoring task failed: {e}")))??;
            results.insert(name, result);
        }

        let elapsed_us = start.elapsed().as_micros() as u64;
        metrics::histogram!("swipeguard_batch_latency_us").record(elapsed_us as f64);
        debug!(conversations = count, elapsed_us, "batch scored");

        Ok(results)
    }
}
