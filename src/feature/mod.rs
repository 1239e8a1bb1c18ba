mod kind;

pub use kind::FeatureKind;

use std::collections::HashMap;

use crate::config::LiftParams;
use crate::error::{LiftError, Result};
use crate::estimator::ElevationEstimator;
use crate::footprint::Footprint;
use crate::mesh::{BuildRoof, BuildWalls, TriangleMesh};
use crate::sample::Sample;

/// A feature in its sampling phase: footprint and attributes fixed at
/// construction, elevation buffer still growing.
///
/// Lifting produces an immutable [`LiftedFeature`]. A failed lift leaves the
/// feature untouched, so more samples can be added and the lift retried; a
/// second lift after a successful one is unrepresentable because queries
/// live only on the lifted type.
#[derive(Debug, Clone)]
pub struct Feature {
    id: String,
    kind: FeatureKind,
    footprint: Footprint,
    attributes: HashMap<String, String>,
    estimator: ElevationEstimator,
}

impl Feature {
    /// Creates a feature from upstream footprint-loading output.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: FeatureKind,
        footprint: Footprint,
        attributes: HashMap<String, String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            footprint,
            attributes,
            estimator: ElevationEstimator::new(),
        }
    }

    /// Offers one elevation sample; returns whether it was accepted.
    ///
    /// Samples failing the kind's admission rule are discarded silently,
    /// with no error and no side effect.
    pub fn add_elevation_point(&mut self, sample: &Sample) -> bool {
        if self.kind.admits(sample) {
            self.estimator.record(sample.elevation);
            true
        } else {
            false
        }
    }

    /// Number of accepted samples so far.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.estimator.len()
    }

    /// The feature's opaque identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    #[must_use]
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Resolves the percentile height and builds the shell, finalizing the
    /// feature.
    ///
    /// # Errors
    ///
    /// Returns [`LiftError::NoSamples`] if no sample was accepted; the
    /// feature is left unchanged and the lift may be retried once more
    /// samples have arrived. The height is never defaulted.
    pub fn lift(&self, params: &LiftParams) -> Result<LiftedFeature> {
        let height = self
            .estimator
            .resolve(params.height_percentile)
            .ok_or_else(|| LiftError::NoSamples {
                id: self.id.clone(),
            })?;

        let roof = BuildRoof::new(&self.footprint, height).execute()?;
        let walls =
            BuildWalls::new(&self.footprint, height, self.kind.base_elevation(params)).execute()?;

        Ok(LiftedFeature {
            id: self.id.clone(),
            kind: self.kind,
            attributes: self.attributes.clone(),
            height,
            roof,
            walls,
        })
    }
}

/// A finalized feature: resolved height and cached shell, immutable for the
/// rest of the feature's lifetime.
///
/// This is the read-only query surface handed to output formatters; queries
/// are idempotent and never recompute.
#[derive(Debug, Clone)]
pub struct LiftedFeature {
    id: String,
    kind: FeatureKind,
    attributes: HashMap<String, String>,
    height: f64,
    roof: TriangleMesh,
    walls: TriangleMesh,
}

impl LiftedFeature {
    /// The feature's opaque identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// Whether this is a hard (always-occluding) feature kind.
    #[must_use]
    pub fn is_hard(&self) -> bool {
        self.kind.is_hard()
    }

    /// The resolved representative height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The horizontal roof cap at the resolved height.
    #[must_use]
    pub fn roof(&self) -> &TriangleMesh {
        &self.roof
    }

    /// The vertical wall faces, one quad per footprint edge.
    #[must_use]
    pub fn walls(&self) -> &TriangleMesh {
        &self.walls
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LofterError;
    use crate::math::{Point2, TOLERANCE};
    use crate::sample::PointClass;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn unit_square() -> Footprint {
        Footprint::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap()
    }

    fn sample(elevation: f64, classification: PointClass, last_return: bool) -> Sample {
        Sample {
            position: p(0.5, 0.5),
            elevation,
            radius: 1.0,
            classification,
            last_return,
        }
    }

    fn separation(id: &str) -> Feature {
        Feature::new(id, FeatureKind::Separation, unit_square(), HashMap::new())
    }

    #[test]
    fn buffer_holds_only_admitted_samples() {
        let mut feature = separation("f1");
        assert!(feature.add_elevation_point(&sample(10.0, PointClass::Ground, true)));
        assert!(!feature.add_elevation_point(&sample(5.0, PointClass::Ground, false)));
        assert!(!feature.add_elevation_point(&sample(20.0, PointClass::Building, true)));
        assert_eq!(feature.sample_count(), 1);
    }

    #[test]
    fn lift_without_samples_fails_and_is_retryable() {
        let mut feature = separation("f2");
        let err = feature.lift(&LiftParams::default()).unwrap_err();
        assert!(matches!(
            err,
            LofterError::Lift(LiftError::NoSamples { ref id }) if id == "f2"
        ));

        // The feature is untouched; sampling and a second lift still work.
        feature.add_elevation_point(&sample(7.0, PointClass::Ground, true));
        let lifted = feature.lift(&LiftParams::default()).unwrap();
        assert_relative_eq!(lifted.height(), 7.0);
    }

    #[test]
    fn lifted_queries_are_idempotent() {
        let mut feature = separation("f3");
        for z in [10.0, 12.0, 11.0] {
            feature.add_elevation_point(&sample(z, PointClass::Ground, true));
        }
        let lifted = feature.lift(&LiftParams::default()).unwrap();
        let first_height = lifted.height();
        let first_roof = lifted.roof().clone();
        assert_relative_eq!(lifted.height(), first_height);
        assert_eq!(lifted.roof(), &first_roof);
        assert_eq!(lifted.walls(), lifted.walls());
    }

    #[test]
    fn attributes_are_readable_post_lift() {
        let mut attributes = HashMap::new();
        attributes.insert("bgt-type".to_owned(), "muur".to_owned());
        let mut feature = Feature::new(
            "f4",
            FeatureKind::Separation,
            unit_square(),
            attributes,
        );
        feature.add_elevation_point(&sample(3.0, PointClass::Ground, true));
        let lifted = feature.lift(&LiftParams::default()).unwrap();
        assert_eq!(lifted.attribute("bgt-type"), Some("muur"));
        assert_eq!(lifted.attribute("plus-type"), None);
        assert_eq!(lifted.id(), "f4");
        assert!(lifted.is_hard());
    }

    #[test]
    fn end_to_end_unit_square_scenario() {
        let mut feature = separation("sep-1");
        feature.add_elevation_point(&sample(10.0, PointClass::Ground, true));
        feature.add_elevation_point(&sample(12.0, PointClass::Ground, true));
        feature.add_elevation_point(&sample(5.0, PointClass::Ground, false));
        feature.add_elevation_point(&sample(20.0, PointClass::Building, true));
        assert_eq!(feature.sample_count(), 2);

        let lifted = feature.lift(&LiftParams::default()).unwrap();
        // buffer [10, 12], rank 0.8 → 10 + 0.8 * 2
        assert_relative_eq!(lifted.height(), 11.6);

        assert_eq!(lifted.roof().vertices.len(), 4);
        for v in &lifted.roof().vertices {
            assert!((v.z - 11.6).abs() < TOLERANCE);
        }

        assert_eq!(lifted.walls().triangle_count(), 8);
        for v in &lifted.walls().vertices {
            assert!(
                (v.z - 11.6).abs() < TOLERANCE || v.z.abs() < TOLERANCE,
                "wall vertex at unexpected elevation {}",
                v.z
            );
        }
    }

    #[test]
    fn base_elevation_reaches_the_walls() {
        let mut feature = separation("f5");
        feature.add_elevation_point(&sample(9.0, PointClass::Ground, true));
        let params = LiftParams {
            base_elevation: 1.5,
            ..LiftParams::default()
        };
        let lifted = feature.lift(&params).unwrap();
        let bases = lifted
            .walls()
            .vertices
            .iter()
            .filter(|v| (v.z - 1.5).abs() < TOLERANCE)
            .count();
        assert_eq!(bases, 2 * 4);
    }

    #[test]
    fn custom_percentile_threshold() {
        let mut feature = separation("f6");
        for z in [1.0, 2.0, 3.0, 4.0, 5.0] {
            feature.add_elevation_point(&sample(z, PointClass::Ground, true));
        }
        let params = LiftParams {
            height_percentile: 0.5,
            ..LiftParams::default()
        };
        assert_relative_eq!(feature.lift(&params).unwrap().height(), 3.0);
    }
}
