use thiserror::Error;

/// Top-level error type for the lofter reconstruction core.
#[derive(Debug, Error)]
pub enum LofterError {
    #[error(transparent)]
    Footprint(#[from] FootprintError),

    #[error(transparent)]
    Lift(#[from] LiftError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// Errors related to footprint validation.
#[derive(Debug, Error)]
pub enum FootprintError {
    #[error("footprint needs at least 3 distinct vertices, got {count}")]
    TooFewVertices { count: usize },
}

/// Errors related to height resolution.
#[derive(Debug, Error)]
pub enum LiftError {
    #[error("no accepted elevation samples for feature {id}")]
    NoSamples { id: String },
}

/// Errors related to shell construction.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("ring edge {index} has zero length")]
    DegenerateEdge { index: usize },

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

/// Errors related to the batch feature store.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("feature not found in batch")]
    FeatureNotFound,

    #[error("feature is already lifted; its elevation buffer is frozen")]
    AlreadyLifted,
}

/// Convenience type alias for results using [`LofterError`].
pub type Result<T> = std::result::Result<T, LofterError>;
