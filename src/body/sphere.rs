use crate::error::{BodyError, Result};
use crate::math::{Isometry3, Point3, TOLERANCE};

use super::{Body, BoundingSphere};

/// A solid sphere.
///
/// The effective radius is `radius * scale + padding`. The center follows
/// the pose translation; orientation is irrelevant.
#[derive(Debug, Clone)]
pub struct SphereBody {
    radius: f64,
    pose: Isometry3,
    center: Point3,
}

impl SphereBody {
    /// Creates a sphere body from the raw shape radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the effective radius is non-positive.
    pub fn new(radius: f64, scale: f64, padding: f64) -> Result<Self> {
        let radius = radius * scale + padding;
        if radius < TOLERANCE {
            return Err(
                BodyError::Degenerate("sphere radius must be positive".into()).into(),
            );
        }
        Ok(Self {
            radius,
            pose: Isometry3::identity(),
            center: Point3::origin(),
        })
    }

    /// Returns the effective (scaled and padded) radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Body for SphereBody {
    fn body_type(&self) -> &'static str {
        "sphere"
    }

    fn set_pose(&mut self, pose: &Isometry3) {
        self.pose = *pose;
        self.center = Point3::from(pose.translation.vector);
    }

    fn pose(&self) -> &Isometry3 {
        &self.pose
    }

    fn volume(&self) -> f64 {
        4.0 / 3.0 * std::f64::consts::PI * self.radius.powi(3)
    }

    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere {
            center: self.center,
            radius: self.radius,
        }
    }

    fn contains(&self, point: &Point3) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }
}
