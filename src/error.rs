use thiserror::Error;

use crate::mask::ShapeHandle;

/// Top-level error type for the bodymask engine.
#[derive(Debug, Error)]
pub enum BodymaskError {
    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error(transparent)]
    Mask(#[from] MaskError),
}

/// Errors related to containment bodies.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("no containment body for shape type {0}")]
    NoContainmentBody(&'static str),

    #[error("degenerate body: {0}")]
    Degenerate(String),
}

/// Errors related to point-cloud buffers.
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("point step {point_step} cannot hold a 4-byte field at offset {offset}")]
    FieldOutOfStep { point_step: usize, offset: usize },

    #[error("buffer length {len} is not a multiple of point step {point_step}")]
    TruncatedBuffer { len: usize, point_step: usize },
}

/// Errors related to the shape registry.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("shape handle {0} is not registered")]
    UnknownHandle(ShapeHandle),

    #[error("shape handle {0} is already registered")]
    DuplicateHandle(ShapeHandle),
}

/// Convenience type alias for results using [`BodymaskError`].
pub type Result<T> = std::result::Result<T, BodymaskError>;
