use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rayon::prelude::*;
use tracing::error;

use crate::body::{self, merge_bounding_spheres, Body, Shape};
use crate::cloud::PointSource;
use crate::error::Result;
use crate::math::Point3;

use super::registry::BodySet;
use super::{Containment, PoseResolver, ShapeHandle};

/// Minimum number of points handed to one worker during the parallel scan;
/// keeps small clouds from being split into pointlessly small chunks.
const MIN_POINTS_PER_TASK: usize = 1024;

/// Registry of containment bodies and the masking engine over them.
///
/// Every operation takes one exclusive lock over the registered bodies for
/// its full duration, so registrations, removals and masking calls
/// serialize; masking mutates body poses in place before scanning. The pose
/// resolver runs while that lock is held and must not re-enter the mask.
pub struct ShapeMask {
    state: Mutex<MaskState>,
}

struct MaskState {
    bodies: BodySet,
    resolver: PoseResolver,
}

impl ShapeMask {
    /// Creates an empty mask with the given pose resolver.
    #[must_use]
    pub fn new(resolver: PoseResolver) -> Self {
        Self {
            state: Mutex::new(MaskState {
                bodies: BodySet::new(),
                resolver,
            }),
        }
    }

    /// Replaces the pose resolver used by subsequent masking calls.
    pub fn set_pose_resolver(&self, resolver: PoseResolver) {
        self.lock().resolver = resolver;
    }

    /// Registers a shape and returns its handle.
    ///
    /// The body is scaled and padded at construction; its volume is fixed
    /// for the lifetime of the registration. Handles of removed shapes are
    /// reused, smallest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape type has no containment body, its
    /// dimensions are degenerate, or the handle bookkeeping is found
    /// inconsistent (in which case nothing is registered).
    pub fn add_shape(&self, shape: &Shape, scale: f64, padding: f64) -> Result<ShapeHandle> {
        let new_body = body::construct(shape, scale, padding)?;
        let mut state = self.lock();
        state.bodies.insert(new_body).map_err(|err| {
            error!(error = %err, "internal error in body bookkeeping");
            err.into()
        })
    }

    /// Removes a registered shape and drops its body.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not registered; the registry is
    /// left unchanged.
    pub fn remove_shape(&self, handle: ShapeHandle) -> Result<()> {
        let mut state = self.lock();
        match state.bodies.remove(handle) {
            Ok(_body) => Ok(()),
            Err(err) => {
                error!(handle = %handle, "unable to remove shape");
                Err(err.into())
            }
        }
    }

    /// Number of registered shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().bodies.len()
    }

    /// Returns `true` if no shapes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().bodies.is_empty()
    }

    /// Classifies every point of `cloud` against the union of registered
    /// bodies, returning one [`Containment`] per point in input order.
    ///
    /// The pose resolver is invoked once per registered body; bodies
    /// without a current pose are logged and sit out this round entirely.
    /// Points closer to the cloud origin than `min_sensor_dist` or farther
    /// than `max_sensor_dist` are clipped before any containment test. The
    /// remaining points are rejected against a bounding sphere of all
    /// posed bodies, then tested body by body in ascending volume order,
    /// stopping at the first hit.
    ///
    /// `sensor_origin` is accepted for interface symmetry with range-based
    /// filters and is currently unused.
    pub fn mask_containment<S>(
        &self,
        cloud: &S,
        _sensor_origin: &Point3,
        min_sensor_dist: f64,
        max_sensor_dist: f64,
    ) -> Vec<Containment>
    where
        S: PointSource + ?Sized,
    {
        let mut state = self.lock();
        let np = cloud.len();
        if state.bodies.is_empty() {
            return vec![Containment::Outside; np];
        }

        // Pose phase: every body's pose is resolved and applied before any
        // point is looked at.
        let state = &mut *state;
        let resolver = &state.resolver;
        let mut spheres = Vec::with_capacity(state.bodies.len());
        let mut posed = HashSet::with_capacity(state.bodies.len());
        for (key, entry) in state.bodies.iter_mut() {
            if let Some(pose) = resolver(key.handle) {
                entry.set_pose(&pose);
                spheres.push(entry.bounding_sphere());
                posed.insert(key.handle);
            } else {
                error!(
                    handle = %key.handle,
                    body = entry.body_type(),
                    "missing pose for shape"
                );
            }
        }

        let bound = merge_bounding_spheres(&spheres);
        let radius_squared = bound.radius * bound.radius;
        let active: Vec<&dyn Body> = state
            .bodies
            .iter()
            .filter(|(key, _)| posed.contains(&key.handle))
            .map(|(_, entry)| entry)
            .collect();

        // Scan phase: read-only over body state, parallel across points.
        (0..np)
            .into_par_iter()
            .with_min_len(MIN_POINTS_PER_TASK)
            .map(|i| {
                let point = cloud.point(i);
                let dist = point.coords.norm();
                if dist < min_sensor_dist || dist > max_sensor_dist {
                    Containment::Clip
                } else if (bound.center - point).norm_squared() >= radius_squared {
                    Containment::Outside
                } else if active.iter().any(|entry| entry.contains(&point)) {
                    Containment::Inside
                } else {
                    Containment::Outside
                }
            })
            .collect()
    }

    /// Classifies a single point against all registered bodies.
    ///
    /// No range clipping and no bounding-sphere prefilter are applied;
    /// bodies keep whatever pose they last received. Intended for
    /// occasional point-wise queries, not bulk throughput.
    #[must_use]
    pub fn classify_point(&self, point: &Point3) -> Containment {
        let state = self.lock();
        if state.bodies.iter().any(|(_, entry)| entry.contains(point)) {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }

    fn lock(&self) -> MutexGuard<'_, MaskState> {
        // A poisoned lock means another caller panicked mid-operation; the
        // registry itself is still structurally valid.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
