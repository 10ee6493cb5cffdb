//! binpack is a heuristic packer for rectangular items. Given a set of bins
//! (volumetric boxes or flat envelopes) and a set of items with dimensions and
//! weights, it assigns items to bins at non-overlapping positions and
//! orthogonal rotations, respecting each bin's extents and weight capacity.
//!
//! Items carry an opaque payload that binpack never looks at. It's expected
//! that consumers use payloads to associate packing results back to their own
//! objects.
//!
//! Placement uses a greedy extreme-point search: an empty bin only offers its
//! origin, and every placed item offers the points just past its far faces.
//! This isn't an optimal solver; an item may be reported as unfit even though
//! some other position would have held it.
//!
//! ## Example
//! ```
//! use binpack::{FlatPacker, PickStrategy};
//!
//! // First, register bins and items with a packer.
//! let mut packer = FlatPacker::flat();
//! packer.add_envelope("sheet", 10.0, 10.0)?;
//! packer.add_item("tall", 4.0, 6.0, 0.0)?;
//! packer.add_item("wide", 6.0, 4.0, 0.0)?;
//!
//! // Then pack them. A packer can only be packed once; use `Packer::copy`
//! // beforehand to try several strategies on the same configuration.
//! packer.pack(PickStrategy::BiggerFirst, true)?;
//!
//! let sheet = &packer.bins()[0];
//! assert_eq!(sheet.items().len(), 2);
//! assert!(packer.unfit_items().is_empty());
//! # Ok::<(), binpack::Error>(())
//! ```

mod bin;
mod config;
mod error;
mod export;
mod id;
mod item;
mod manifest;
mod packer;
mod space;
mod types;

pub use bin::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use id::*;
pub use item::*;
pub use manifest::*;
pub use packer::*;
pub use space::*;
pub use types::*;

pub use binpack_geom as geom;
