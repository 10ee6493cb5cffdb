use std::{f64::consts::FRAC_PI_2, fmt, sync::Arc};

use binpack_geom::{Point3, Transform3, Vector3};

use crate::{
    error::{Error, Result},
    id::ItemId,
    space::{Flat, Space, Volumetric, FLAT_DEPTH},
    types::{Axis, RotationType},
};

/// A packable unit: intrinsic dimensions, a weight, and an opaque payload the
/// packer carries around without looking at.
///
/// The bounding box always spans `position` to `position + dimension()` and is
/// recomputed whenever the rotation or position changes.
///
/// Cloning an item copies its geometry but shares the payload.
#[derive(Debug)]
pub struct Item<P, S: Space = Volumetric> {
    id: ItemId,
    payload: Arc<P>,
    width: f64,
    height: f64,
    depth: f64,
    weight: f64,
    rotation: RotationType,
    position: Point3<f64>,
    bbox: S::Bounds,
}

/// An item packed into flat envelopes.
pub type FlatItem<P> = Item<P, Flat>;

impl<P> Item<P, Volumetric> {
    pub fn new(payload: P, width: f64, height: f64, depth: f64) -> Self {
        Self::build(Arc::new(payload), width, height, depth)
    }
}

impl<P> Item<P, Flat> {
    /// Creates an item for flat packing, one unit deep.
    pub fn flat(payload: P, width: f64, height: f64) -> Self {
        Self::build(Arc::new(payload), width, height, FLAT_DEPTH)
    }
}

impl<P, S: Space> Item<P, S> {
    fn build(payload: Arc<P>, width: f64, height: f64, depth: f64) -> Self {
        let rotation = RotationType::default();
        let position = Point3::origin();

        Self {
            id: ItemId::new(),
            payload,
            width,
            height,
            depth,
            weight: 0.0,
            rotation,
            position,
            bbox: S::bounds(position, rotation.permute(width, height, depth)),
        }
    }

    /// Sets the weight this item contributes towards a bin's capacity.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Gives this item an id of its own, detaching it from the item it was
    /// cloned from.
    pub(crate) fn reissue_id(&mut self) {
        self.id = ItemId::new();
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    #[inline]
    pub fn shared_payload(&self) -> &Arc<P> {
        &self.payload
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    pub fn rotation(&self) -> RotationType {
        self.rotation
    }

    /// The minimum corner of the item.
    #[inline]
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    #[inline]
    pub fn bbox(&self) -> &S::Bounds {
        &self.bbox
    }

    /// Volume for volumetric items, area for flat ones. Doesn't depend on
    /// rotation.
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    /// The item's extent along each bin axis under its current rotation.
    pub fn dimension(&self) -> Vector3<f64> {
        self.rotation.permute(self.width, self.height, self.depth)
    }

    pub fn set_rotation(&mut self, rotation: RotationType) -> Result<()> {
        if !S::allows_rotation(rotation) {
            return Err(Error::InvalidRotation {
                rotation,
                space: S::NAME,
            });
        }

        self.rotation = rotation;
        self.update_bbox();
        Ok(())
    }

    pub fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
        self.update_bbox();
    }

    /// Moves and turns the item in one step. `rotation` must already be known
    /// to be valid for this space.
    pub(crate) fn place(&mut self, position: Point3<f64>, rotation: RotationType) {
        self.position = position;
        self.rotation = rotation;
        self.update_bbox();
    }

    fn update_bbox(&mut self) {
        self.bbox = S::bounds(self.position, self.dimension());
    }

    /// The anchor just past this item's far face along `axis`, with the other
    /// coordinates of its own anchor left unchanged.
    pub fn extreme_point(&self, axis: Axis) -> Result<Point3<f64>> {
        if !S::searches_axis(axis) {
            return Err(Error::InvalidAxis {
                axis,
                space: S::NAME,
            });
        }

        let mut point = self.position;
        point[axis.index()] += self.dimension()[axis.index()];
        Ok(point)
    }

    /// Returns the transform that moves a payload whose bounding box has its
    /// minimum corner at the origin into this item's placed location and
    /// orientation.
    ///
    /// Only the identity orientation and the quarter turn around the vertical
    /// axis are supported.
    pub fn transformation(&self) -> Result<Transform3> {
        let p = self.position;
        let (x, y, z) = (p.x, p.y, p.z);

        match self.rotation {
            RotationType::Whd => Ok(Transform3::translation(x, y, z)),
            RotationType::Hwd => Ok(Transform3::z_rotation(FRAC_PI_2)
                .then(&Transform3::translation(x + self.height, y, z))),
            other => Err(Error::UnsupportedRotation(other)),
        }
    }
}

impl<P, S: Space> Clone for Item<P, S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            payload: Arc::clone(&self.payload),
            width: self.width,
            height: self.height,
            depth: self.depth,
            weight: self.weight,
            rotation: self.rotation,
            position: self.position,
            bbox: self.bbox,
        }
    }
}

impl<P: fmt::Display, S: Space> fmt::Display for Item<P, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}(", self.payload)?;

        if S::AXES.len() == 3 {
            write!(formatter, "{}x{}x{}", self.width, self.height, self.depth)?;
        } else {
            write!(formatter, "{}x{}", self.width, self.height)?;
        }

        let p = self.position;
        write!(
            formatter,
            ", weight: {}) pos({}, {}, {}) rt({}) {}({})",
            self.weight,
            p.x,
            p.y,
            p.z,
            self.rotation,
            S::MEASURE,
            self.volume()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use binpack_geom::{BoundingBox, BoundingBox2d, Point2};

    fn near(a: Point3<f64>, b: Point3<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn new_item_sits_at_origin() {
        let item = Item::new("a", 2.0, 3.0, 4.0);

        assert_eq!(item.rotation(), RotationType::Whd);
        assert_eq!(item.position(), Point3::origin());
        assert_eq!(item.weight(), 0.0);
        assert_eq!(
            *item.bbox(),
            BoundingBox::from_corners(Point3::origin(), Point3::new(2.0, 3.0, 4.0))
        );
    }

    #[test]
    fn bbox_follows_rotation_and_position() {
        let mut item = Item::new("a", 2.0, 3.0, 4.0);

        item.set_rotation(RotationType::Dwh).unwrap();
        assert_eq!(item.dimension(), Vector3::new(4.0, 2.0, 3.0));
        assert_eq!(item.bbox().max(), Point3::new(4.0, 2.0, 3.0));

        item.set_position(Point3::new(1.0, 1.0, 1.0));
        assert_eq!(item.bbox().min(), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(item.bbox().max(), Point3::new(5.0, 3.0, 4.0));
    }

    #[test]
    fn volume_ignores_rotation() {
        let mut item = Item::new("a", 2.0, 3.0, 4.0);

        for rotation in RotationType::ALL.iter() {
            item.set_rotation(*rotation).unwrap();
            assert_eq!(item.volume(), 24.0);
            assert_eq!(item.bbox().volume(), 24.0);
        }
    }

    #[test]
    fn flat_items() {
        let mut item = FlatItem::flat("a", 4.0, 6.0).with_weight(2.0);

        assert_eq!(item.depth(), 1.0);
        assert_eq!(item.volume(), 24.0);
        assert_eq!(
            *item.bbox(),
            BoundingBox2d::from_corners(Point2::origin(), Point2::new(4.0, 6.0))
        );

        item.set_rotation(RotationType::Hwd).unwrap();
        assert_eq!(item.bbox().max(), Point2::new(6.0, 4.0));

        let err = item.set_rotation(RotationType::Hdw).unwrap_err();
        assert!(matches!(err, Error::InvalidRotation { .. }));
        assert_eq!(item.rotation(), RotationType::Hwd);
    }

    #[test]
    fn extreme_points() {
        let mut item = Item::new("a", 2.0, 3.0, 4.0);
        item.set_position(Point3::new(1.0, 1.0, 1.0));

        assert_eq!(item.extreme_point(Axis::Width).unwrap(), Point3::new(3.0, 1.0, 1.0));
        assert_eq!(item.extreme_point(Axis::Height).unwrap(), Point3::new(1.0, 4.0, 1.0));
        assert_eq!(item.extreme_point(Axis::Depth).unwrap(), Point3::new(1.0, 1.0, 5.0));

        let flat = FlatItem::flat("b", 2.0, 3.0);
        assert!(matches!(
            flat.extreme_point(Axis::Depth),
            Err(Error::InvalidAxis { .. })
        ));
    }

    #[test]
    fn clones_share_payload() {
        let item = Item::new(String::from("block"), 1.0, 1.0, 1.0);
        let mut copy = item.clone();
        copy.set_position(Point3::new(5.0, 5.0, 5.0));

        assert!(Arc::ptr_eq(item.shared_payload(), copy.shared_payload()));
        assert_eq!(item.id(), copy.id());
        assert_eq!(item.position(), Point3::origin());
    }

    #[test]
    fn identity_transformation() {
        let mut item = Item::new("a", 2.0, 3.0, 4.0);
        item.set_position(Point3::new(1.0, 2.0, 3.0));

        let t = item.transformation().unwrap();
        assert!(near(t.transform_point(&Point3::origin()), Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn quarter_turn_transformation() {
        let mut item = Item::new("a", 2.0, 3.0, 4.0);
        item.place(Point3::new(10.0, 0.0, 1.0), RotationType::Hwd);

        // The payload's local box [0,2]x[0,3]x[0,4] must land on the item's
        // placed box [10,13]x[0,2]x[1,5].
        let t = item.transformation().unwrap();
        let a = t.transform_point(&Point3::new(0.0, 0.0, 0.0));
        let b = t.transform_point(&Point3::new(2.0, 3.0, 4.0));
        let placed = BoundingBox::from_corners(a, b);

        assert!(near(placed.min(), item.bbox().min()));
        assert!(near(placed.max(), item.bbox().max()));
    }

    #[test]
    fn other_transformations_are_unsupported() {
        let mut item = Item::new("a", 2.0, 3.0, 4.0);

        for rotation in &RotationType::ALL[2..] {
            item.set_rotation(*rotation).unwrap();
            assert!(matches!(
                item.transformation(),
                Err(Error::UnsupportedRotation(r)) if r == *rotation
            ));
        }
    }

    #[test]
    fn display() {
        let mut item = Item::new("bolt", 4.0, 4.0, 4.0).with_weight(1.0);
        item.set_position(Point3::new(0.0, 4.0, 0.0));
        insta::assert_snapshot!(item.to_string(), @"bolt(4x4x4, weight: 1) pos(0, 4, 0) rt(WHD) vol(64)");

        let flat = FlatItem::flat("label", 4.0, 6.5);
        insta::assert_snapshot!(flat.to_string(), @"label(4x6.5, weight: 0) pos(0, 0, 0) rt(WHD) area(26)");
    }
}
