//! The two packing variants, volumetric boxes and flat envelopes, differ only
//! in how many axes they search, which orientations they try, and which kind
//! of bounding box collisions are tested with. `Space` captures exactly that,
//! so that items, bins, and packers can share one implementation.

use std::fmt;

use binpack_geom::{BoundingBox, BoundingBox2d, Point3, Vector3};

use crate::types::{Axis, RotationType};

pub trait Space: fmt::Debug + Clone + Copy + PartialEq + 'static {
    /// Bounding box type used for collision tests.
    type Bounds: fmt::Debug + Clone + Copy + PartialEq;

    /// Human-readable name of this variant, used in errors.
    const NAME: &'static str;

    /// What the product of an item's dimensions is called in this space.
    const MEASURE: &'static str;

    /// Axes that extreme points are generated along, in search order.
    const AXES: &'static [Axis];

    /// Orientations placement attempts try, in order.
    const ROTATIONS: &'static [RotationType];

    fn bounds(position: Point3<f64>, dimension: Vector3<f64>) -> Self::Bounds;

    fn intersects(a: &Self::Bounds, b: &Self::Bounds) -> bool;

    fn allows_rotation(rotation: RotationType) -> bool {
        Self::ROTATIONS.contains(&rotation)
    }

    fn searches_axis(axis: Axis) -> bool {
        Self::AXES.contains(&axis)
    }
}

/// Three dimensional boxes holding three dimensional items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Volumetric;

impl Space for Volumetric {
    type Bounds = BoundingBox;

    const NAME: &'static str = "volumetric";
    const MEASURE: &'static str = "vol";
    const AXES: &'static [Axis] = &[Axis::Width, Axis::Height, Axis::Depth];
    const ROTATIONS: &'static [RotationType] = &RotationType::ALL;

    fn bounds(position: Point3<f64>, dimension: Vector3<f64>) -> BoundingBox {
        BoundingBox::from_position_and_size(position, dimension)
    }

    fn intersects(a: &BoundingBox, b: &BoundingBox) -> bool {
        a.intersects(b)
    }
}

/// Flat envelopes holding flat items. Depth is fixed to one unit and only
/// the width and height of items may be swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flat;

impl Space for Flat {
    type Bounds = BoundingBox2d;

    const NAME: &'static str = "flat";
    const MEASURE: &'static str = "area";
    const AXES: &'static [Axis] = &[Axis::Width, Axis::Height];
    const ROTATIONS: &'static [RotationType] = &[RotationType::Whd, RotationType::Hwd];

    fn bounds(position: Point3<f64>, dimension: Vector3<f64>) -> BoundingBox2d {
        BoundingBox2d::from_position_and_size(position.xy(), dimension.xy())
    }

    fn intersects(a: &BoundingBox2d, b: &BoundingBox2d) -> bool {
        a.intersects(b)
    }
}

/// Depth given to flat items and envelopes.
pub const FLAT_DEPTH: f64 = 1.0;
