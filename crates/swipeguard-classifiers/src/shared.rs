//! Shared classifier handle with runtime reconfiguration

use crate::config::FilterConfig;
use crate::timewaster::TimewasterClassifier;
use parking_lot::RwLock;
use std::sync::Arc;
use swipeguard_core::Result;
use tracing::{info, warn};

/// Cloneable handle to the active classifier.
///
/// Readers take a snapshot with [`SharedClassifier::current`]; a scoring call
/// in flight keeps its snapshot even if the classifier is swapped meanwhile.
#[derive(Clone)]
pub struct SharedClassifier {
    inner: Arc<RwLock<Arc<TimewasterClassifier>>>,
}

impl SharedClassifier {
    /// Build the initial classifier from `config`
    pub fn new(config: FilterConfig) -> Result<Self> {
        Ok(Self::from_classifier(TimewasterClassifier::new(config)?))
    }

    pub fn from_classifier(classifier: TimewasterClassifier) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(classifier))),
        }
    }

    /// Snapshot of the active classifier
    pub fn current(&self) -> Arc<TimewasterClassifier> {
        Arc::clone(&self.inner.read())
    }

    /// Configuration of the active classifier
    pub fn config(&self) -> FilterConfig {
        self.inner.read().config().clone()
    }

    /// Build a classifier from `config` and make it active.
    ///
    /// On error the previous classifier stays active.
    pub fn reconfigure(&self, config: FilterConfig) -> Result<()> {
        match TimewasterClassifier::new(config) {
            Ok(classifier) => {
                *self.inner.write() = Arc::new(classifier);
                info!("Timewaster classifier reconfigured");
                Ok(())
            }
            Err(e) => {
                warn!("Rejected classifier configuration: {}", e);
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for SharedClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedClassifier")
            .field("config", &self.config())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconfigure_swaps_instance() {
        let shared = SharedClassifier::new(FilterConfig::default()).unwrap();
        let before = shared.current();

        shared
            .reconfigure(FilterConfig {
                min_engagement_score: 0.9,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(shared.config().min_engagement_score, 0.9);
        // old snapshot is unchanged
        assert_eq!(before.config().min_engagement_score, 0.5);
    }

    #[test]
    fn test_rejected_config_keeps_previous() {
        let shared = SharedClassifier::new(FilterConfig::default()).unwrap();

        let result = shared.reconfigure(FilterConfig {
            min_question_ratio: 1.5,
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(shared.config(), FilterConfig::default());
    }

    #[test]
    fn test_clones_share_state() {
        let shared = SharedClassifier::new(FilterConfig::default()).unwrap();
        let other = shared.clone();

        other
            .reconfigure(FilterConfig {
                min_engagement_score: 0.7,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(shared.config().min_engagement_score, 0.7);
    }
}
