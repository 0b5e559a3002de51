use crate::error::{CloudError, Result};
use crate::math::Point3;

/// An ordered, finite, read-only sequence of 3D points.
///
/// Implementations provide random access by index so a scan can be
/// partitioned across threads.
pub trait PointSource: Sync {
    /// Number of points in the sequence.
    fn len(&self) -> usize;

    /// Returns the point at `index`.
    ///
    /// # Panics
    ///
    /// May panic if `index >= self.len()`.
    fn point(&self, index: usize) -> Point3;

    /// Returns `true` if the sequence holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointSource for [Point3] {
    fn len(&self) -> usize {
        <[Point3]>::len(self)
    }

    fn point(&self, index: usize) -> Point3 {
        self[index]
    }
}

/// Borrowed view over a packed point buffer with little-endian `f32`
/// coordinate fields, the layout produced by depth-sensor drivers.
///
/// Each point occupies `point_step` bytes; the `x`, `y` and `z` fields sit
/// at fixed byte offsets within that step. Extra fields (intensity, ring,
/// timestamps) are skipped over.
#[derive(Debug, Clone, Copy)]
pub struct CloudView<'a> {
    data: &'a [u8],
    point_step: usize,
    x_offset: usize,
    y_offset: usize,
    z_offset: usize,
}

impl<'a> CloudView<'a> {
    /// Creates a view over `data` with `point_step` bytes per point and the
    /// given byte offsets of the three coordinate fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate field does not fit within the point
    /// step, or if the buffer length is not a multiple of the step.
    pub fn new(
        data: &'a [u8],
        point_step: usize,
        x_offset: usize,
        y_offset: usize,
        z_offset: usize,
    ) -> Result<Self> {
        for offset in [x_offset, y_offset, z_offset] {
            if offset + 4 > point_step {
                return Err(CloudError::FieldOutOfStep { point_step, offset }.into());
            }
        }
        if data.len() % point_step != 0 {
            return Err(CloudError::TruncatedBuffer {
                len: data.len(),
                point_step,
            }
            .into());
        }
        Ok(Self {
            data,
            point_step,
            x_offset,
            y_offset,
            z_offset,
        })
    }

    fn field(&self, base: usize, offset: usize) -> f64 {
        let start = base + offset;
        let b = &self.data[start..start + 4];
        f64::from(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

impl PointSource for CloudView<'_> {
    fn len(&self) -> usize {
        self.data.len() / self.point_step
    }

    fn point(&self, index: usize) -> Point3 {
        let base = index * self.point_step;
        Point3::new(
            self.field(base, self.x_offset),
            self.field(base, self.y_offset),
            self.field(base, self.z_offset),
        )
    }
}
