mod cuboid;
mod cylinder;
mod sphere;

pub use cuboid::BoxBody;
pub use cylinder::CylinderBody;
pub use sphere::SphereBody;

use std::fmt;

use crate::error::{BodyError, Result};
use crate::math::{Isometry3, Point3, Vector3};

/// Geometric description of a shape to register.
///
/// Dimensions are the raw shape dimensions; scale and padding are applied
/// when the containment body is constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A sphere with the given radius.
    Sphere { radius: f64 },
    /// An axis-aligned box with the given full edge lengths.
    Box { size: Vector3 },
    /// A cylinder aligned with its local z axis.
    Cylinder { radius: f64, length: f64 },
    /// An unbounded plane `normal . p = offset`.
    Plane { normal: Vector3, offset: f64 },
}

impl Shape {
    /// Short name of the shape type, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Sphere { .. } => "sphere",
            Shape::Box { .. } => "box",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Plane { .. } => "plane",
        }
    }
}

/// A solid volume supporting the containment queries the masking engine
/// needs: a fixed volume, a pose, a bounding sphere, and a point test.
///
/// Bodies are constructed with [`construct`] and owned exclusively by the
/// registry entry that created them.
pub trait Body: fmt::Debug + Send + Sync {
    /// Short name of the concrete body type, used in diagnostics.
    fn body_type(&self) -> &'static str;

    /// Places the body at the given pose.
    fn set_pose(&mut self, pose: &Isometry3);

    /// Returns the current pose.
    fn pose(&self) -> &Isometry3;

    /// Computes the enclosed volume.
    ///
    /// Scale and padding are already folded into the dimensions, so the
    /// volume is constant over the body's lifetime.
    fn volume(&self) -> f64;

    /// Computes a sphere fully enclosing the body at its current pose.
    fn bounding_sphere(&self) -> BoundingSphere;

    /// Tests whether a point lies inside the body at its current pose.
    fn contains(&self, point: &Point3) -> bool;
}

/// Builds a containment body from a shape description.
///
/// Every linear dimension becomes `dimension * scale + padding`. The body
/// starts at the identity pose.
///
/// # Errors
///
/// Returns an error if the shape type has no containment body (planes are
/// unbounded) or if the scaled dimensions are degenerate.
pub fn construct(shape: &Shape, scale: f64, padding: f64) -> Result<Box<dyn Body>> {
    match *shape {
        Shape::Sphere { radius } => Ok(Box::new(SphereBody::new(radius, scale, padding)?)),
        Shape::Box { size } => Ok(Box::new(BoxBody::new(&size, scale, padding)?)),
        Shape::Cylinder { radius, length } => {
            Ok(Box::new(CylinderBody::new(radius, length, scale, padding)?))
        }
        Shape::Plane { .. } => Err(BodyError::NoContainmentBody(shape.type_name()).into()),
    }
}

/// A sphere guaranteed to fully enclose a body, or a union of bodies when
/// merged. Used as a cheap pre-filter before exact containment tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center of the sphere.
    pub center: Point3,
    /// Radius of the sphere.
    pub radius: f64,
}

impl BoundingSphere {
    /// The degenerate sphere at the origin.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            center: Point3::origin(),
            radius: 0.0,
        }
    }

    /// Merges this sphere with another one, in place.
    ///
    /// The result encloses both input spheres. When one sphere already
    /// contains the other, the larger one is kept unchanged.
    pub fn merge(&mut self, other: &BoundingSphere) {
        let diff = other.center - self.center;
        let dist = diff.norm();
        if dist + other.radius <= self.radius {
            return;
        }
        if dist + self.radius <= other.radius {
            *self = *other;
            return;
        }
        // Neither contains the other, so dist > 0 and the merged sphere
        // spans the two far poles.
        let radius = (dist + self.radius + other.radius) / 2.0;
        let center = self.center + diff * ((radius - self.radius) / dist);
        *self = Self { center, radius };
    }
}

/// Computes a single sphere enclosing all input spheres.
///
/// An empty input yields the zero sphere at the origin.
#[must_use]
pub fn merge_bounding_spheres(spheres: &[BoundingSphere]) -> BoundingSphere {
    let Some((first, rest)) = spheres.split_first() else {
        return BoundingSphere::zero();
    };
    let mut merged = *first;
    for sphere in rest {
        merged.merge(sphere);
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sphere_at(x: f64, y: f64, z: f64, radius: f64) -> BoundingSphere {
        BoundingSphere {
            center: Point3::new(x, y, z),
            radius,
        }
    }

    #[test]
    fn merge_of_empty_is_zero_sphere() {
        let merged = merge_bounding_spheres(&[]);
        assert_eq!(merged, BoundingSphere::zero());
    }

    #[test]
    fn merge_of_single_sphere_is_identity() {
        let s = sphere_at(1.0, 2.0, 3.0, 0.5);
        assert_eq!(merge_bounding_spheres(&[s]), s);
    }

    #[test]
    fn merge_keeps_containing_sphere() {
        let big = sphere_at(0.0, 0.0, 0.0, 5.0);
        let small = sphere_at(1.0, 0.0, 0.0, 1.0);
        assert_eq!(merge_bounding_spheres(&[big, small]), big);
        assert_eq!(merge_bounding_spheres(&[small, big]), big);
    }

    #[test]
    fn merge_of_disjoint_spheres_spans_both() {
        let a = sphere_at(-2.0, 0.0, 0.0, 1.0);
        let b = sphere_at(2.0, 0.0, 0.0, 1.0);
        let merged = merge_bounding_spheres(&[a, b]);
        assert!((merged.radius - 3.0).abs() < 1e-12);
        assert!((merged.center - Point3::origin()).norm() < 1e-12);
    }

    #[test]
    fn merged_sphere_encloses_inputs() {
        let spheres = [
            sphere_at(0.0, 0.0, 0.0, 1.0),
            sphere_at(3.0, 1.0, -2.0, 0.5),
            sphere_at(-1.0, 4.0, 0.5, 2.0),
        ];
        let merged = merge_bounding_spheres(&spheres);
        for s in &spheres {
            let dist = (s.center - merged.center).norm();
            assert!(dist + s.radius <= merged.radius + 1e-12);
        }
    }

    #[test]
    fn construct_rejects_planes() {
        let shape = Shape::Plane {
            normal: Vector3::z(),
            offset: 0.0,
        };
        assert!(construct(&shape, 1.0, 0.0).is_err());
    }

    #[test]
    fn construct_builds_each_solid_type() {
        let shapes = [
            Shape::Sphere { radius: 1.0 },
            Shape::Box {
                size: Vector3::new(1.0, 2.0, 3.0),
            },
            Shape::Cylinder {
                radius: 0.5,
                length: 2.0,
            },
        ];
        for shape in &shapes {
            let body = construct(shape, 1.0, 0.0).unwrap();
            assert_eq!(body.body_type(), shape.type_name());
            assert!(body.volume() > 0.0);
        }
    }
}
