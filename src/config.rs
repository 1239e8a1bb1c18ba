/// Parameters controlling how a feature's height and shell are resolved.
///
/// Passed explicitly at lift time; a batch run shares one immutable value, so
/// lifting many features in parallel with different parameter sets is safe.
#[derive(Debug, Clone, Copy)]
pub struct LiftParams {
    /// Percentile fraction used to reduce the elevation buffer to a single
    /// representative height.
    pub height_percentile: f64,
    /// Elevation of the bottom edge of the wall faces, supplied by the
    /// surrounding pipeline (ground reference).
    pub base_elevation: f64,
}

impl Default for LiftParams {
    fn default() -> Self {
        Self {
            height_percentile: 0.8,
            base_elevation: 0.0,
        }
    }
}
