use std::{collections::HashSet, fmt};

use rand::{seq::SliceRandom, Rng};

use crate::{
    bin::Bin,
    error::{Error, Result},
    id::ItemId,
    item::Item,
    space::{Flat, Space, Volumetric},
    types::PickStrategy,
};

/// Packers start out accepting bins and items and switch to `Packed`, for
/// good, once `pack` is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackerState {
    Configurable,
    Packed,
}

/// Owns a set of bins and a set of items to distribute between them.
///
/// ## Example
/// ```
/// use binpack::{Packer, PickStrategy};
///
/// let mut packer = Packer::new();
/// packer.add_box("small", 10.0, 10.0, 10.0)?;
/// packer.add_item("bolt", 4.0, 4.0, 4.0, 1.0)?;
/// packer.pack(PickStrategy::BiggerFirst, false)?;
///
/// assert_eq!(packer.bins()[0].items().len(), 1);
/// # Ok::<(), binpack::Error>(())
/// ```
#[derive(Debug)]
pub struct Packer<P, S: Space = Volumetric> {
    bins: Vec<Bin<P, S>>,
    items: Vec<Item<P, S>>,
    unfit_items: Vec<Item<P, S>>,
    state: PackerState,
}

/// A packer for flat items and envelopes.
pub type FlatPacker<P> = Packer<P, Flat>;

impl<P> Packer<P, Volumetric> {
    pub fn new() -> Self {
        Self::empty()
    }

    /// Registers a box with unlimited weight capacity and returns it.
    pub fn add_box<N: Into<String>>(
        &mut self,
        name: N,
        width: f64,
        height: f64,
        depth: f64,
    ) -> Result<&Bin<P, Volumetric>> {
        self.append_bin(Bin::new(name, width, height, depth))
    }

    pub fn add_item(
        &mut self,
        payload: P,
        width: f64,
        height: f64,
        depth: f64,
        weight: f64,
    ) -> Result<ItemId> {
        self.append_item(Item::new(payload, width, height, depth).with_weight(weight))
    }
}

impl<P> Packer<P, Flat> {
    pub fn flat() -> Self {
        Self::empty()
    }

    /// Registers an envelope with unlimited weight capacity and returns it.
    pub fn add_envelope<N: Into<String>>(
        &mut self,
        name: N,
        width: f64,
        height: f64,
    ) -> Result<&Bin<P, Flat>> {
        self.append_bin(Bin::envelope(name, width, height))
    }

    pub fn add_item(&mut self, payload: P, width: f64, height: f64, weight: f64) -> Result<ItemId> {
        self.append_item(Item::flat(payload, width, height).with_weight(weight))
    }
}

impl<P, S: Space> Packer<P, S> {
    fn empty() -> Self {
        Self {
            bins: Vec::new(),
            items: Vec::new(),
            unfit_items: Vec::new(),
            state: PackerState::Configurable,
        }
    }

    #[inline]
    pub fn state(&self) -> PackerState {
        self.state
    }

    #[inline]
    pub fn is_packed(&self) -> bool {
        self.state == PackerState::Packed
    }

    #[inline]
    pub fn bins(&self) -> &[Bin<P, S>] {
        &self.bins
    }

    /// Items still waiting to be packed. With `distribute_items`, items that
    /// were placed are removed from this list as packing goes on.
    #[inline]
    pub fn items(&self) -> &[Item<P, S>] {
        &self.items
    }

    /// Items that didn't end up in any bin. Only filled in by `pack`.
    #[inline]
    pub fn unfit_items(&self) -> &[Item<P, S>] {
        &self.unfit_items
    }

    pub fn bin(&self, name: &str) -> Option<&Bin<P, S>> {
        self.bins.iter().find(|bin| bin.name() == name)
    }

    /// Finds every bin the item with the given id was placed into.
    pub fn bins_holding(&self, id: ItemId) -> impl Iterator<Item = &Bin<P, S>> {
        self.bins.iter().filter(move |bin| bin.contains(id))
    }

    fn ensure_configurable(&self) -> Result<()> {
        match self.state {
            PackerState::Configurable => Ok(()),
            PackerState::Packed => Err(Error::AlreadyPacked),
        }
    }

    pub fn append_bin(&mut self, bin: Bin<P, S>) -> Result<&Bin<P, S>> {
        self.ensure_configurable()?;

        let label = |axis: &str| format!("{} of bin {:?}", axis, bin.name());
        check_dimension(label("width"), bin.width())?;
        check_dimension(label("height"), bin.height())?;
        check_dimension(label("depth"), bin.depth())?;
        check_weight(label("max weight"), bin.max_weight())?;

        log::trace!("Registered bin {:?}", bin.name());

        self.bins.push(bin);
        let index = self.bins.len() - 1;
        Ok(&self.bins[index])
    }

    pub fn append_item(&mut self, mut item: Item<P, S>) -> Result<ItemId> {
        self.ensure_configurable()?;

        // Registering a clone of an already registered item adds a second
        // item, which needs its own id to be tracked through `pack`.
        if self.items.iter().any(|registered| registered.id() == item.id()) {
            item.reissue_id();
        }

        let label = |axis: &str| format!("{} of item {}", axis, item.id());
        check_dimension(label("width"), item.width())?;
        check_dimension(label("height"), item.height())?;
        check_dimension(label("depth"), item.depth())?;
        check_weight(label("weight"), item.weight())?;

        let id = item.id();
        self.items.push(item);
        Ok(id)
    }

    /// Creates an independent packer with the same bins and items, so that
    /// several strategies can be tried on one configuration. Payloads are
    /// shared with the original.
    ///
    /// Fails once this packer has been packed.
    pub fn copy(&self) -> Result<Self> {
        self.ensure_configurable()?;

        Ok(Self {
            bins: self.bins.clone(),
            items: self.items.clone(),
            unfit_items: self.unfit_items.clone(),
            state: PackerState::Configurable,
        })
    }

    /// Packs the registered items into the registered bins. `Shuffle` draws
    /// from the thread-local random number generator.
    ///
    /// When `distribute_items` is set, every item ends up in at most one bin.
    /// Otherwise each bin is offered the full list of items independently,
    /// which is useful for comparing candidate bins against each other.
    ///
    /// Items that don't fit anywhere are not an error; they are listed in each
    /// bin's `unfitted_items` and in the packer's `unfit_items`.
    pub fn pack(&mut self, pick_strategy: PickStrategy, distribute_items: bool) -> Result<()> {
        self.pack_with_rng(pick_strategy, distribute_items, &mut rand::thread_rng())
    }

    /// Same as `pack`, drawing `Shuffle` orderings from `rng`.
    pub fn pack_with_rng<R: Rng + ?Sized>(
        &mut self,
        pick_strategy: PickStrategy,
        distribute_items: bool,
        rng: &mut R,
    ) -> Result<()> {
        self.ensure_configurable()?;
        self.state = PackerState::Packed;

        log::debug!(
            "Packing {} items into {} bins ({}, distribute: {})",
            self.items.len(),
            self.bins.len(),
            pick_strategy,
            distribute_items
        );

        self.order(pick_strategy, rng);

        for bin in self.bins.iter_mut() {
            for item in &self.items {
                bin.pack_item(item)?;
            }

            log::debug!(
                "Bin {:?} holds {} items, {} did not fit, fill ratio {:.3}",
                bin.name(),
                bin.items().len(),
                bin.unfitted_items().len(),
                bin.fill_ratio()
            );

            if distribute_items {
                let placed: HashSet<ItemId> = bin.items().iter().map(Item::id).collect();
                self.items.retain(|item| !placed.contains(&item.id()));
            }
        }

        let bins = &self.bins;
        self.unfit_items = self
            .items
            .iter()
            .filter(|item| !bins.iter().any(|bin| bin.contains(item.id())))
            .cloned()
            .collect();

        log::debug!(
            "Finished packing, {} items did not fit into any bin",
            self.unfit_items.len()
        );

        Ok(())
    }

    /// Orders bins and items in place. Sorting is stable, so equally sized
    /// entries keep their registration order.
    fn order<R: Rng + ?Sized>(&mut self, pick_strategy: PickStrategy, rng: &mut R) {
        match pick_strategy {
            PickStrategy::SmallerFirst => {
                self.bins
                    .sort_by(|a, b| a.capacity().total_cmp(&b.capacity()));
                self.items.sort_by(|a, b| a.volume().total_cmp(&b.volume()));
            }
            PickStrategy::BiggerFirst => {
                self.bins
                    .sort_by(|a, b| b.capacity().total_cmp(&a.capacity()));
                self.items.sort_by(|a, b| b.volume().total_cmp(&a.volume()));
            }
            PickStrategy::Shuffle => {
                self.bins.shuffle(rng);
                self.items.shuffle(rng);
            }
        }
    }
}

impl<P> Default for Packer<P, Volumetric> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, S: Space> fmt::Display for Packer<P, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let kind = if S::AXES.len() == 3 {
            "Packer"
        } else {
            "FlatPacker"
        };

        write!(formatter, "{} with {} bins", kind, self.bins.len())
    }
}

fn check_dimension(what: String, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDimension { what, value })
    }
}

fn check_weight(what: String, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidWeight { what, value })
    }
}
