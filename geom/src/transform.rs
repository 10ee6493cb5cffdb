use nalgebra::{Isometry3, Matrix4, Point3, Vector3};

/// A rigid transform in 3D: a rotation followed by a translation.
///
/// Composition reads left to right, so `a.then(&b)` applies `a` first. This
/// matches how placements are described: rotate the payload around its
/// local origin, then move it into place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3 {
    inner: Isometry3<f64>,
}

impl Transform3 {
    pub fn identity() -> Self {
        Self {
            inner: Isometry3::identity(),
        }
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            inner: Isometry3::translation(x, y, z),
        }
    }

    /// Rotation by `angle` radians around the Z axis, counter-clockwise when
    /// looking down from +Z.
    pub fn z_rotation(angle: f64) -> Self {
        Self {
            inner: Isometry3::rotation(Vector3::z() * angle),
        }
    }

    /// Returns a transform that applies `self` and then `next`.
    pub fn then(&self, next: &Transform3) -> Self {
        Self {
            inner: next.inner * self.inner,
        }
    }

    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.inner.transform_point(point)
    }

    /// The equivalent homogeneous matrix, for column vectors.
    pub fn to_matrix(&self) -> Matrix4<f64> {
        self.inner.to_homogeneous()
    }
}

impl Default for Transform3 {
    fn default() -> Self {
        Self::identity()
    }
}
