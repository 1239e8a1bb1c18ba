use crate::math::Point2;

/// Source classification of an elevation sample, following the ASPRS LAS
/// point classes used by aerial lidar products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClass {
    Unclassified,
    Ground,
    LowVegetation,
    MediumVegetation,
    HighVegetation,
    Building,
    Water,
    BridgeDeck,
}

impl PointClass {
    /// Maps a raw LAS classification code to a point class.
    ///
    /// Codes without a dedicated variant fall back to `Unclassified`.
    #[must_use]
    pub fn from_las_code(code: u8) -> Self {
        match code {
            2 => Self::Ground,
            3 => Self::LowVegetation,
            4 => Self::MediumVegetation,
            5 => Self::HighVegetation,
            6 => Self::Building,
            9 => Self::Water,
            17 => Self::BridgeDeck,
            _ => Self::Unclassified,
        }
    }
}

/// One candidate elevation measurement offered to a feature during the scan
/// phase. Not retained beyond filtering; only accepted elevations survive.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Horizontal position of the return.
    pub position: Point2,
    /// Measured elevation.
    pub elevation: f64,
    /// Horizontal radius the sample was gathered with.
    pub radius: f64,
    /// Source classification from the point-cloud product.
    pub classification: PointClass,
    /// Whether this return is the last along its pulse path.
    pub last_return: bool,
}
