use crate::error::{BodyError, Result};
use crate::math::{Isometry3, Point3, Vector3, TOLERANCE};

use super::{Body, BoundingSphere};

/// A solid rectangular box.
///
/// `size` holds the full edge lengths along the local x, y and z axes.
/// Each half-extent is `size / 2 * scale + padding`. Containment tests
/// transform the query point into the box frame.
#[derive(Debug, Clone)]
pub struct BoxBody {
    half_extents: Vector3,
    pose: Isometry3,
    inv_pose: Isometry3,
}

impl BoxBody {
    /// Creates a box body from the raw full edge lengths.
    ///
    /// # Errors
    ///
    /// Returns an error if any effective half-extent is non-positive.
    pub fn new(size: &Vector3, scale: f64, padding: f64) -> Result<Self> {
        let half_extents = size * (scale / 2.0) + Vector3::repeat(padding);
        if half_extents.x < TOLERANCE || half_extents.y < TOLERANCE || half_extents.z < TOLERANCE
        {
            return Err(
                BodyError::Degenerate("box extents must be positive".into()).into(),
            );
        }
        Ok(Self {
            half_extents,
            pose: Isometry3::identity(),
            inv_pose: Isometry3::identity(),
        })
    }

    /// Returns the effective (scaled and padded) half-extents.
    #[must_use]
    pub fn half_extents(&self) -> &Vector3 {
        &self.half_extents
    }
}

impl Body for BoxBody {
    fn body_type(&self) -> &'static str {
        "box"
    }

    fn set_pose(&mut self, pose: &Isometry3) {
        self.pose = *pose;
        self.inv_pose = pose.inverse();
    }

    fn pose(&self) -> &Isometry3 {
        &self.pose
    }

    fn volume(&self) -> f64 {
        8.0 * self.half_extents.x * self.half_extents.y * self.half_extents.z
    }

    fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere {
            center: Point3::from(self.pose.translation.vector),
            radius: self.half_extents.norm(),
        }
    }

    fn contains(&self, point: &Point3) -> bool {
        let local = self.inv_pose.transform_point(point);
        local.x.abs() <= self.half_extents.x
            && local.y.abs() <= self.half_extents.y
            && local.z.abs() <= self.half_extents.z
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn unit_cube() -> BoxBody {
        BoxBody::new(&Vector3::new(1.0, 1.0, 1.0), 1.0, 0.0).unwrap()
    }

    #[test]
    fn contains_center_and_corners() {
        let body = unit_cube();
        assert!(body.contains(&Point3::origin()));
        assert!(body.contains(&Point3::new(0.5, 0.5, 0.5)));
        assert!(!body.contains(&Point3::new(0.6, 0.0, 0.0)));
    }

    #[test]
    fn volume_of_unit_cube() {
        assert_relative_eq!(unit_cube().volume(), 1.0);
    }

    #[test]
    fn rotated_box_contains_in_its_own_frame() {
        use std::f64::consts::FRAC_PI_4;

        let mut body = BoxBody::new(&Vector3::new(2.0, 0.2, 0.2), 1.0, 0.0).unwrap();
        let pose = Isometry3::rotation(Vector3::z() * FRAC_PI_4);
        body.set_pose(&pose);
        // The long axis now points along (1, 1, 0) / sqrt(2).
        let along = Point3::new(0.6, 0.6, 0.0);
        let across = Point3::new(0.6, -0.6, 0.0);
        assert!(body.contains(&along));
        assert!(!body.contains(&across));
    }

    #[test]
    fn translated_box_moves_with_its_pose() {
        let mut body = unit_cube();
        body.set_pose(&Isometry3::translation(10.0, 0.0, 0.0));
        assert!(!body.contains(&Point3::origin()));
        assert!(body.contains(&Point3::new(10.2, 0.3, -0.4)));
    }

    #[test]
    fn padding_grows_every_side() {
        let body = BoxBody::new(&Vector3::new(1.0, 1.0, 1.0), 1.0, 0.1).unwrap();
        assert!(body.contains(&Point3::new(0.55, 0.0, 0.0)));
        assert!(!body.contains(&Point3::new(0.65, 0.0, 0.0)));
    }

    #[test]
    fn bounding_sphere_covers_the_corners() {
        let body = unit_cube();
        let bs = body.bounding_sphere();
        let corner = Point3::new(0.5, 0.5, 0.5);
        assert!((corner - bs.center).norm() <= bs.radius + TOLERANCE);
    }

    #[test]
    fn degenerate_extent_is_rejected() {
        assert!(BoxBody::new(&Vector3::new(1.0, 0.0, 1.0), 1.0, 0.0).is_err());
    }
}
