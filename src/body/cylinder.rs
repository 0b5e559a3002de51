use crate::error::{BodyError, Result};
use crate::math::{Isometry3, Point3, TOLERANCE};

use super::{Body, BoundingSphere};

/// A solid cylinder aligned with its local z axis.
///
/// The effective radius is `radius * scale + padding` and the effective
/// half-length is `length / 2 * scale + padding`.
#[derive(Debug, Clone)]
pub struct CylinderBody {
    radius: f64,
    half_length: f64,
    pose: Isometry3,
    inv_pose: Isometry3,
}

impl CylinderBody {
    /// Creates a cylinder body from the raw radius and full length.
    ///
    /// # Errors
    ///
    /// Returns an error if the effective radius or half-length is
    /// non-positive.
    pub fn new(radius: f64, length: f64, scale: f64, padding: f64) -> Result<Self> {
        let radius = radius * scale + padding;
        let half_length = length / 2.0 * scale + padding;
        if radius < TOLERANCE || half_length < TOLERANCE {
            return Err(
                BodyError::Degenerate("cylinder dimensions must be positive".into()).into(),
            );
        }
        Ok(Self {
            radius,
            half_length,
            pose: Isometry3::identity(),
            inv_pose: Isometry3::identity(),
        })
    }

    /// Returns the effective (scaled and padded) radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the effective (scaled and padded) half-length.
    #[must_use]
    pub fn half_length(&self) -> f64 {
        self.half_length
    }
}

impl Body for CylinderBody {
    fn body_type(&self) -> &'static str {
        "cylinder"
    }

    fn set_pose(&mut self, pose: &Isometry3) {
        self.pose = *pose;
        self.inv_pose = pose.inverse();
    }

    fn pose(&self) -> &Isometry3 {
        &self.pose
    }

    fn volume(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius * 2.0 * self.half_length
    }

    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere {
            center: Point3::from(self.pose.translation.vector),
            radius: self.radius.hypot(self.half_length),
        }
    }

    fn contains(&self, point: &Point3) -> bool {
        let local = self.inv_pose.transform_point(point);
        local.z.abs() <= self.half_length
            && local.x * local.x + local.y * local.y <= self.radius * self.radius
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Vector3;

    #[test]
    fn contains_points_within_radius_and_length() {
        let body = CylinderBody::new(1.0, 2.0, 1.0, 0.0).unwrap();
        assert!(body.contains(&Point3::origin()));
        assert!(body.contains(&Point3::new(0.9, 0.0, 0.9)));
        assert!(!body.contains(&Point3::new(0.0, 0.0, 1.1)));
        assert!(!body.contains(&Point3::new(0.8, 0.8, 0.0)));
    }

    #[test]
    fn volume_matches_the_closed_form() {
        let body = CylinderBody::new(0.5, 2.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(body.volume(), std::f64::consts::PI * 0.25 * 2.0);
    }

    #[test]
    fn lying_cylinder_contains_along_its_axis() {
        use std::f64::consts::FRAC_PI_2;

        let mut body = CylinderBody::new(0.1, 2.0, 1.0, 0.0).unwrap();
        // Rotate the local z axis onto the world x axis.
        body.set_pose(&Isometry3::rotation(Vector3::y() * FRAC_PI_2));
        assert!(body.contains(&Point3::new(0.9, 0.0, 0.0)));
        assert!(!body.contains(&Point3::new(0.0, 0.0, 0.9)));
    }

    #[test]
    fn bounding_sphere_covers_the_rim() {
        let body = CylinderBody::new(1.0, 2.0, 1.0, 0.0).unwrap();
        let bs = body.bounding_sphere();
        let rim = Point3::new(1.0, 0.0, 1.0);
        assert!((rim - bs.center).norm() <= bs.radius + TOLERANCE);
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        assert!(CylinderBody::new(0.0, 1.0, 1.0, 0.0).is_err());
        assert!(CylinderBody::new(1.0, 0.0, 1.0, 0.0).is_err());
    }
}
