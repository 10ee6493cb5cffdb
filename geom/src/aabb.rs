use nalgebra::{Point, SVector};

/// An axis-aligned box in `D` dimensions, stored as its minimum and maximum
/// corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<const D: usize> {
    min: Point<f64, D>,
    max: Point<f64, D>,
}

pub type BoundingBox = Aabb<3>;
pub type BoundingBox2d = Aabb<2>;

impl<const D: usize> Aabb<D> {
    /// Builds a box spanning two opposite corners, given in any order.
    pub fn from_corners(a: Point<f64, D>, b: Point<f64, D>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    #[inline]
    pub fn from_position_and_size(position: Point<f64, D>, size: SVector<f64, D>) -> Self {
        Self::from_corners(position, position + size)
    }

    #[inline]
    pub fn min(&self) -> Point<f64, D> {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point<f64, D> {
        self.max
    }

    #[inline]
    pub fn size(&self) -> SVector<f64, D> {
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        self.size().iter().product()
    }

    /// Tells whether `other` lies entirely inside this box. Shared faces are
    /// allowed.
    pub fn contains(&self, other: &Aabb<D>) -> bool {
        (0..D).all(|axis| self.min[axis] <= other.min[axis] && other.max[axis] <= self.max[axis])
    }

    /// Tells whether the interiors of the two boxes overlap.
    ///
    /// Boxes that only share a face, edge, or corner do not intersect.
    pub fn intersects(&self, other: &Aabb<D>) -> bool {
        (0..D).all(|axis| self.min[axis] < other.max[axis] && other.min[axis] < self.max[axis])
    }
}
