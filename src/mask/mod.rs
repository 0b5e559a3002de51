mod registry;
mod shape_mask;

pub use shape_mask::ShapeMask;

use std::fmt;

use crate::math::Isometry3;

/// Opaque identifier for a registered shape.
///
/// Handles are strictly positive and unique among currently-registered
/// shapes; freed handles are reused by later registrations, so uniqueness
/// does not hold over the registry's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeHandle(u32);

impl ShapeHandle {
    pub(crate) fn new(value: u32) -> Self {
        debug_assert!(value > 0, "shape handles are strictly positive");
        Self(value)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ShapeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a single cloud point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Containment {
    /// The point lies outside every registered body.
    Outside = 0,
    /// The point lies inside at least one registered body.
    Inside = 1,
    /// The point lies outside the configured sensor range. Clipping takes
    /// precedence over containment.
    Clip = 2,
}

/// Callback resolving the current pose of a registered shape.
///
/// Returns `None` when no pose is available; the shape then sits out the
/// current masking round. The callback is invoked while the mask's lock is
/// held and must not call back into the [`ShapeMask`] that invoked it.
pub type PoseResolver = Box<dyn Fn(ShapeHandle) -> Option<Isometry3> + Send + Sync>;
