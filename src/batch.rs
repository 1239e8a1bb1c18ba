use slotmap::{new_key_type, SlotMap};
use tracing::{debug, warn};

use crate::config::LiftParams;
use crate::error::{BatchError, LofterError, Result};
use crate::feature::{Feature, LiftedFeature};
use crate::sample::Sample;

new_key_type! {
    /// Handle to a feature within a [`FeatureBatch`].
    pub struct FeatureId;
}

/// Policy for features that never accepted a sample when the batch is lifted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LiftPolicy {
    /// Log and skip unsampled features; they stay in the sampling phase and
    /// are absent from the lifted output.
    #[default]
    SkipEmpty,
    /// Abort the batch on the first unsampled feature.
    FailOnEmpty,
}

#[derive(Debug)]
enum FeatureState {
    Sampling(Feature),
    Lifted(LiftedFeature),
}

/// Arena owning every feature of one batch run through its lifecycle.
///
/// Features are inserted during footprint loading, samples are routed by id
/// during the scan phase, and `lift_all` finalizes the batch once the scan
/// completes. Lifted features are then handed to the formatters.
#[derive(Debug, Default)]
pub struct FeatureBatch {
    features: SlotMap<FeatureId, FeatureState>,
}

impl FeatureBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a feature and returns its handle.
    pub fn insert(&mut self, feature: Feature) -> FeatureId {
        self.features.insert(FeatureState::Sampling(feature))
    }

    /// Number of features in the batch, lifted or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the batch holds no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Returns a feature still in its sampling phase.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::FeatureNotFound`] for an unknown handle and
    /// [`BatchError::AlreadyLifted`] for a finalized feature.
    pub fn feature(&self, id: FeatureId) -> std::result::Result<&Feature, BatchError> {
        match self.features.get(id) {
            Some(FeatureState::Sampling(feature)) => Ok(feature),
            Some(FeatureState::Lifted(_)) => Err(BatchError::AlreadyLifted),
            None => Err(BatchError::FeatureNotFound),
        }
    }

    /// Routes one elevation sample to a feature; returns whether the sample
    /// was accepted.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::FeatureNotFound`] for an unknown handle and
    /// [`BatchError::AlreadyLifted`] if the feature's buffer is frozen.
    pub fn add_elevation_point(&mut self, id: FeatureId, sample: &Sample) -> Result<bool> {
        match self.features.get_mut(id) {
            Some(FeatureState::Sampling(feature)) => Ok(feature.add_elevation_point(sample)),
            Some(FeatureState::Lifted(_)) => Err(BatchError::AlreadyLifted.into()),
            None => Err(BatchError::FeatureNotFound.into()),
        }
    }

    /// Lifts every feature still in its sampling phase.
    ///
    /// Features with an empty buffer are skipped or abort the batch
    /// according to `policy`. Skipped features remain in the sampling phase,
    /// so they may receive more samples and a later `lift_all` picks them up.
    ///
    /// # Errors
    ///
    /// Under [`LiftPolicy::FailOnEmpty`], returns the first
    /// [`crate::error::LiftError::NoSamples`]. Mesh construction failures
    /// propagate under either policy.
    pub fn lift_all(&mut self, params: &LiftParams, policy: LiftPolicy) -> Result<()> {
        let ids: Vec<FeatureId> = self.features.keys().collect();
        for id in ids {
            let Some(FeatureState::Sampling(feature)) = self.features.get(id) else {
                continue;
            };
            match feature.lift(params) {
                Ok(lifted) => {
                    debug!(id = lifted.id(), height = lifted.height(), "feature lifted");
                    if let Some(slot) = self.features.get_mut(id) {
                        *slot = FeatureState::Lifted(lifted);
                    }
                }
                Err(LofterError::Lift(err)) => match policy {
                    LiftPolicy::SkipEmpty => {
                        warn!(id = feature.id(), "skipping feature with no accepted samples");
                    }
                    LiftPolicy::FailOnEmpty => return Err(err.into()),
                },
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// Returns a lifted feature, or `None` if the handle is unknown or the
    /// feature was never lifted.
    #[must_use]
    pub fn lifted(&self, id: FeatureId) -> Option<&LiftedFeature> {
        match self.features.get(id) {
            Some(FeatureState::Lifted(lifted)) => Some(lifted),
            _ => None,
        }
    }

    /// Iterates all lifted features in insertion order.
    pub fn lifted_features(&self) -> impl Iterator<Item = (FeatureId, &LiftedFeature)> + '_ {
        self.features.iter().filter_map(|(id, state)| match state {
            FeatureState::Lifted(lifted) => Some((id, lifted)),
            FeatureState::Sampling(_) => None,
        })
    }

    /// Number of lifted features.
    #[must_use]
    pub fn lifted_count(&self) -> usize {
        self.lifted_features().count()
    }
}
