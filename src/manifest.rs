use std::{fmt, path::Path};

use binpack_geom::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    bin::Bin,
    error::Result,
    item::Item,
    packer::Packer,
    space::Space,
    types::RotationType,
};

/// A snapshot of a packed `Packer`: where every item went and what didn't fit.
///
/// Payloads are recorded by their `Display` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PackManifest {
    /// Either "volumetric" or "flat".
    pub space: String,

    /// Items that didn't end up in any bin.
    #[serde(default)]
    pub unfit: Vec<String>,

    #[serde(default)]
    pub bins: Vec<BinManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BinManifest {
    pub name: String,

    /// Width, height, and (for volumetric bins) depth.
    pub extents: Vec<f64>,

    /// Absent for bins without a weight limit.
    pub max_weight: Option<f64>,

    pub capacity: f64,
    pub total_weight: f64,
    pub total_volume: f64,
    pub fill_ratio: f64,

    /// Items this bin was offered but couldn't hold.
    #[serde(default)]
    pub unfitted: Vec<String>,

    /// Placed items, in placement order.
    #[serde(default)]
    pub placements: Vec<PlacementManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PlacementManifest {
    pub payload: String,

    /// Minimum corner of the placed item.
    pub position: Vec<f64>,

    /// Extent along each bin axis after rotation.
    pub dimension: Vec<f64>,

    pub rotation: RotationType,
    pub weight: f64,

    /// Column-major 4x4 matrix moving the payload into place, when the
    /// rotation has a known transform.
    pub transform: Option<Vec<f64>>,
}

impl PackManifest {
    pub(crate) fn from_packer<P: fmt::Display, S: Space>(packer: &Packer<P, S>) -> Self {
        Self {
            space: S::NAME.to_owned(),
            unfit: labels(packer.unfit_items()),
            bins: packer.bins().iter().map(BinManifest::from_bin).collect(),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs_err::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs_err::write(path, self.to_toml_string()?)?;

        log::trace!("Saved pack manifest to {}", path.display());

        Ok(())
    }

    /// Number of items placed across all bins.
    pub fn placed_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.placements.len()).sum()
    }
}

impl BinManifest {
    fn from_bin<P: fmt::Display, S: Space>(bin: &Bin<P, S>) -> Self {
        Self {
            name: bin.name().to_owned(),
            extents: along_axes::<S>(&bin.extents()),
            max_weight: if bin.has_weight_limit() {
                Some(bin.max_weight())
            } else {
                None
            },
            capacity: bin.capacity(),
            total_weight: bin.total_weight(),
            total_volume: bin.total_volume(),
            fill_ratio: bin.fill_ratio(),
            unfitted: labels(bin.unfitted_items()),
            placements: bin.items().iter().map(PlacementManifest::from_item).collect(),
        }
    }
}

impl PlacementManifest {
    fn from_item<P: fmt::Display, S: Space>(item: &Item<P, S>) -> Self {
        Self {
            payload: item.payload().to_string(),
            position: along_axes::<S>(&item.position().coords),
            dimension: along_axes::<S>(&item.dimension()),
            rotation: item.rotation(),
            weight: item.weight(),
            transform: item
                .transformation()
                .ok()
                .map(|transform| transform.to_matrix().as_slice().to_vec()),
        }
    }
}

fn labels<P: fmt::Display, S: Space>(items: &[Item<P, S>]) -> Vec<String> {
    items.iter().map(|item| item.payload().to_string()).collect()
}

fn along_axes<S: Space>(vector: &Vector3<f64>) -> Vec<f64> {
    S::AXES.iter().map(|axis| vector[axis.index()]).collect()
}
