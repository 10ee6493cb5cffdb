use std::fmt;

use binpack_geom::{Point3, Vector3};

use crate::{
    error::Result,
    id::ItemId,
    item::Item,
    space::{Flat, Space, Volumetric, FLAT_DEPTH},
};

/// Weight capacity of bins that weren't given one.
pub const UNLIMITED_WEIGHT: f64 = 1e99;

/// A container with fixed extents and a weight capacity.
///
/// `items` holds what was placed, in placement order; `unfitted_items` holds
/// what was offered to this bin and didn't fit anywhere in it.
#[derive(Debug)]
pub struct Bin<P, S: Space = Volumetric> {
    name: String,
    width: f64,
    height: f64,
    depth: f64,
    max_weight: f64,
    items: Vec<Item<P, S>>,
    unfitted_items: Vec<Item<P, S>>,
}

/// A volumetric bin.
pub type BoxBin<P> = Bin<P, Volumetric>;

/// A flat bin.
pub type Envelope<P> = Bin<P, Flat>;

impl<P> Bin<P, Volumetric> {
    pub fn new<N: Into<String>>(name: N, width: f64, height: f64, depth: f64) -> Self {
        Self::build(name.into(), width, height, depth)
    }
}

impl<P> Bin<P, Flat> {
    pub fn envelope<N: Into<String>>(name: N, width: f64, height: f64) -> Self {
        Self::build(name.into(), width, height, FLAT_DEPTH)
    }
}

impl<P, S: Space> Bin<P, S> {
    fn build(name: String, width: f64, height: f64, depth: f64) -> Self {
        Self {
            name,
            width,
            height,
            depth,
            max_weight: UNLIMITED_WEIGHT,
            items: Vec::new(),
            unfitted_items: Vec::new(),
        }
    }

    pub fn with_max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = max_weight;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
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
    pub fn extents(&self) -> Vector3<f64> {
        Vector3::new(self.width, self.height, self.depth)
    }

    #[inline]
    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn has_weight_limit(&self) -> bool {
        self.max_weight < UNLIMITED_WEIGHT
    }

    #[inline]
    pub fn items(&self) -> &[Item<P, S>] {
        &self.items
    }

    #[inline]
    pub fn unfitted_items(&self) -> &[Item<P, S>] {
        &self.unfitted_items
    }

    /// Volume (or area, for envelopes) available for packing.
    pub fn capacity(&self) -> f64 {
        self.width * self.height * self.depth
    }

    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(Item::weight).sum()
    }

    pub fn total_volume(&self) -> f64 {
        self.items.iter().map(Item::volume).sum()
    }

    pub fn fill_ratio(&self) -> f64 {
        self.total_volume() / self.capacity()
    }

    /// Tries to place `item` with its minimum corner at `anchor`, trying each
    /// rotation this bin allows in order.
    ///
    /// On success the item keeps the winning rotation and position and a copy
    /// of it is appended to `items`. On failure the item gets its previous
    /// rotation and position back and the bin is left untouched.
    pub fn put_item(&mut self, item: &mut Item<P, S>, anchor: Point3<f64>) -> bool {
        let previous = (item.position(), item.rotation());

        if anchor.iter().any(|coordinate| *coordinate < 0.0) {
            log::trace!(
                "Rejected {} in bin {:?}, anchor {:?} is outside the bin",
                item.id(),
                self.name,
                anchor
            );
            return false;
        }

        let extents = self.extents();
        let total_weight = self.total_weight();

        for &rotation in S::ROTATIONS {
            item.place(anchor, rotation);
            let dimension = item.dimension();

            if (0..3).any(|axis| extents[axis] < anchor[axis] + dimension[axis]) {
                continue;
            }

            let collides = self
                .items
                .iter()
                .any(|placed| S::intersects(item.bbox(), placed.bbox()));

            if !collides && total_weight + item.weight() <= self.max_weight {
                log::trace!(
                    "Placed {} in bin {:?} at {:?} with rotation {}",
                    item.id(),
                    self.name,
                    anchor,
                    rotation
                );

                self.items.push(item.clone());
                return true;
            }
        }

        item.place(previous.0, previous.1);
        false
    }

    /// Searches for a spot for `item` in this bin.
    ///
    /// An empty bin only offers its origin. Otherwise every placed item, in
    /// placement order, offers the point past its far face along each axis,
    /// with all width anchors tried before any height anchor and so on. The
    /// first anchor that accepts the item wins. If none does, the item is
    /// recorded in `unfitted_items`.
    ///
    /// The item given is left as it was; the bin stores its own copy.
    pub fn pack_item(&mut self, item: &Item<P, S>) -> Result<bool> {
        let mut candidate = item.clone();

        if self.items.is_empty() {
            if self.put_item(&mut candidate, Point3::origin()) {
                return Ok(true);
            }

            log::trace!("{} does not fit into empty bin {:?}", item.id(), self.name);
            self.unfitted_items.push(candidate);
            return Ok(false);
        }

        for &axis in S::AXES {
            // Placing an item ends the search, so the list doesn't grow while
            // it's being walked.
            for index in 0..self.items.len() {
                let anchor = self.items[index].extreme_point(axis)?;

                log::trace!("Trying {} at {:?} along {}", item.id(), anchor, axis);

                if self.put_item(&mut candidate, anchor) {
                    return Ok(true);
                }
            }
        }

        log::trace!("{} does not fit into bin {:?}", item.id(), self.name);
        self.unfitted_items.push(candidate);
        Ok(false)
    }

    /// Tells whether an item with the given id was placed in this bin.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }
}

impl<P, S: Space> Clone for Bin<P, S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            depth: self.depth,
            max_weight: self.max_weight,
            items: self.items.clone(),
            unfitted_items: self.unfitted_items.clone(),
        }
    }
}

impl<P, S: Space> fmt::Display for Bin<P, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}(", self.name)?;

        if S::AXES.len() == 3 {
            write!(
                formatter,
                "{:.3}x{:.3}x{:.3}",
                self.width, self.height, self.depth
            )?;
        } else {
            write!(formatter, "{:.3}x{:.3}", self.width, self.height)?;
        }

        if self.has_weight_limit() {
            write!(formatter, ", max_weight: {}", self.max_weight)?;
        } else {
            write!(formatter, ", max_weight: unlimited")?;
        }

        write!(formatter, ") {}({:.3})", S::MEASURE, self.capacity())
    }
}
