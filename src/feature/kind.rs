use crate::config::LiftParams;
use crate::sample::{PointClass, Sample};

/// The closed set of reconstructable feature kinds.
///
/// Each kind supplies its own sample-admission rule, base-elevation policy
/// and occlusion class; the percentile and shell algorithms are shared.
/// Sibling kinds slot in as additional variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Thin wall-like separation structures between mapped land-use parcels:
    /// fences, barriers, retaining walls.
    Separation,
}

impl FeatureKind {
    /// Decides whether a sample contributes to this kind's height.
    ///
    /// Separation structures keep only last returns not classified as
    /// building or water: returns off adjacent tall structures bias the
    /// height upward, and water returns give spurious flat readings.
    #[must_use]
    pub fn admits(self, sample: &Sample) -> bool {
        match self {
            Self::Separation => {
                sample.last_return
                    && sample.classification != PointClass::Building
                    && sample.classification != PointClass::Water
            }
        }
    }

    /// Base elevation of this kind's wall faces.
    #[must_use]
    pub fn base_elevation(self, params: &LiftParams) -> f64 {
        match self {
            Self::Separation => params.base_elevation,
        }
    }

    /// Whether the kind is a hard (impermeable, always-occluding) surface.
    ///
    /// Consumed by overlap-precedence logic in the surrounding pipeline.
    #[must_use]
    pub fn is_hard(self) -> bool {
        match self {
            Self::Separation => true,
        }
    }
}
