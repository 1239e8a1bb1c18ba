use crate::error::FootprintError;
use crate::math::{polygon_2d, Point2};

/// The validated 2D outline of a mapped feature.
///
/// An ordered exterior ring with at least three distinct vertices; holes are
/// out of scope for the feature kinds handled here. The ring is stored
/// without the explicit closing vertex and normalized to counter-clockwise
/// orientation so wall winding downstream is deterministic. Immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    ring: Vec<Point2>,
}

impl Footprint {
    /// Builds a footprint from an ordered ring of points.
    ///
    /// Consecutive duplicate vertices and an explicit closing vertex are
    /// dropped before validation.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintError::TooFewVertices`] if fewer than three
    /// distinct vertices remain.
    pub fn new(points: Vec<Point2>) -> Result<Self, FootprintError> {
        let mut ring = polygon_2d::dedup_ring(&points);
        if ring.len() < 3 {
            return Err(FootprintError::TooFewVertices { count: ring.len() });
        }
        if polygon_2d::signed_area(&ring) < 0.0 {
            ring.reverse();
        }
        Ok(Self { ring })
    }

    /// The counter-clockwise ring, without the closing vertex.
    #[must_use]
    pub fn ring(&self) -> &[Point2] {
        &self.ring
    }

    /// Number of distinct vertices (= number of edges).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.ring.len()
    }

    /// Iterates consecutive vertex pairs, including the closing edge back to
    /// the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (&Point2, &Point2)> + '_ {
        self.ring
            .iter()
            .zip(self.ring.iter().cycle().skip(1))
            .take(self.ring.len())
    }

    /// Enclosed area of the ring.
    #[must_use]
    pub fn area(&self) -> f64 {
        polygon_2d::signed_area(&self.ring)
    }
}
