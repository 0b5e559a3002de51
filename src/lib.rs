pub mod body;
pub mod cloud;
pub mod error;
pub mod mask;
pub mod math;

pub use error::{BodymaskError, Result};
pub use mask::{Containment, PoseResolver, ShapeHandle, ShapeMask};
