use std::{path::Path, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    bin::Bin,
    error::{Error, Result},
    export::{LayoutExporter, ManifestExporter},
    item::Item,
    manifest::PackManifest,
    packer::{FlatPacker, Packer},
    types::PickStrategy,
};

/// A packing job described in TOML: the bins, the items, and how to pack
/// them.
///
/// ```toml
/// name = "drawing-blocks"
/// space = "flat"
/// pick-strategy = "smaller-first"
/// distribute-items = true
///
/// [[bins]]
/// name = "a4"
/// width = 297
/// height = 210
///
/// [[items]]
/// name = "title-block"
/// width = 180
/// height = 56
/// count = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PackJob {
    /// The name of the job, currently only used in logging.
    pub name: String,

    #[serde(default)]
    pub space: SpaceKind,

    #[serde(default)]
    pub pick_strategy: PickStrategy,

    /// Whether each item should go into at most one bin. When off, every bin
    /// is packed from the full list of items independently.
    #[serde(default)]
    pub distribute_items: bool,

    #[serde(default)]
    pub bins: Vec<BinConfig>,

    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

/// Which kind of packer a job builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpaceKind {
    Volumetric,
    Flat,
}

impl Default for SpaceKind {
    fn default() -> Self {
        SpaceKind::Volumetric
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct BinConfig {
    pub name: String,
    pub width: f64,
    pub height: f64,

    /// Required for volumetric jobs, not allowed for flat ones.
    #[serde(default)]
    pub depth: Option<f64>,

    /// Unlimited if not given.
    #[serde(default)]
    pub max_weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ItemConfig {
    pub name: String,
    pub width: f64,
    pub height: f64,

    /// Required for volumetric jobs, not allowed for flat ones.
    #[serde(default)]
    pub depth: Option<f64>,

    #[serde(default)]
    pub weight: f64,

    /// How many identical copies of this item to pack. Copies are named
    /// `name-1`, `name-2` and so on.
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl ItemConfig {
    fn payloads(&self) -> Vec<String> {
        if self.count == 1 {
            vec![self.name.clone()]
        } else {
            (1..=self.count)
                .map(|index| format!("{}-{}", self.name, index))
                .collect()
        }
    }
}

impl FromStr for PackJob {
    type Err = Error;

    fn from_str(contents: &str) -> Result<Self> {
        Self::from_toml_str(contents)
    }
}

impl PackJob {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs_err::read_to_string(path)?;
        let job = Self::from_toml_str(&contents)?;

        log::trace!("Read pack job {:?} from {}", job.name, path.display());

        Ok(job)
    }

    /// Builds a volumetric packer with the job's bins and items registered.
    /// Payloads are item names.
    pub fn volumetric_packer(&self) -> Result<Packer<String>> {
        let mut packer = Packer::new();

        for bin in &self.bins {
            let depth = bin.depth.ok_or_else(|| Error::MissingDepth {
                what: format!("bin {:?}", bin.name),
            })?;

            let mut built = Bin::new(bin.name.as_str(), bin.width, bin.height, depth);
            if let Some(max_weight) = bin.max_weight {
                built = built.with_max_weight(max_weight);
            }
            packer.append_bin(built)?;
        }

        for item in &self.items {
            let depth = item.depth.ok_or_else(|| Error::MissingDepth {
                what: format!("item {:?}", item.name),
            })?;

            for payload in item.payloads() {
                packer.append_item(
                    Item::new(payload, item.width, item.height, depth).with_weight(item.weight),
                )?;
            }
        }

        Ok(packer)
    }

    /// Builds a flat packer with the job's envelopes and items registered.
    /// Payloads are item names.
    pub fn flat_packer(&self) -> Result<FlatPacker<String>> {
        let mut packer = FlatPacker::flat();

        for bin in &self.bins {
            if bin.depth.is_some() {
                return Err(Error::UnexpectedDepth {
                    what: format!("bin {:?}", bin.name),
                });
            }

            let mut built = Bin::envelope(bin.name.as_str(), bin.width, bin.height);
            if let Some(max_weight) = bin.max_weight {
                built = built.with_max_weight(max_weight);
            }
            packer.append_bin(built)?;
        }

        for item in &self.items {
            if item.depth.is_some() {
                return Err(Error::UnexpectedDepth {
                    what: format!("item {:?}", item.name),
                });
            }

            for payload in item.payloads() {
                packer.append_item(
                    Item::flat(payload, item.width, item.height).with_weight(item.weight),
                )?;
            }
        }

        Ok(packer)
    }

    /// Packs the job and describes the result.
    pub fn run(&self) -> Result<PackManifest> {
        self.run_with_rng(&mut rand::thread_rng())
    }

    /// Same as `run`, drawing `shuffle` orderings from `rng`.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PackManifest> {
        log::debug!(
            "Running pack job {:?}: {} bins, {} item entries",
            self.name,
            self.bins.len(),
            self.items.len()
        );

        match self.space {
            SpaceKind::Volumetric => {
                let mut packer = self.volumetric_packer()?;
                packer.pack_with_rng(self.pick_strategy, self.distribute_items, rng)?;
                ManifestExporter.export(&packer)
            }
            SpaceKind::Flat => {
                let mut packer = self.flat_packer()?;
                packer.pack_with_rng(self.pick_strategy, self.distribute_items, rng)?;
                ManifestExporter.export(&packer)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rand::{rngs::StdRng, SeedableRng};

    static CRATES: &str = r#"
        name = "crates"
        distribute-items = true

        [[bins]]
        name = "small"
        width = 5
        height = 5
        depth = 5

        [[bins]]
        name = "large"
        width = 10
        height = 10
        depth = 10
        max-weight = 4.5

        [[items]]
        name = "cube"
        width = 5
        height = 5
        depth = 5
        weight = 1.5
        count = 4
    "#;

    #[test]
    fn defaults() {
        let job: PackJob = "name = \"empty\"".parse().unwrap();

        assert_eq!(job.space, SpaceKind::Volumetric);
        assert_eq!(job.pick_strategy, PickStrategy::BiggerFirst);
        assert!(!job.distribute_items);
        assert!(job.bins.is_empty());
        assert!(job.items.is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = "name = \"x\"\nstrategy = \"shuffle\"".parse::<PackJob>().unwrap_err();
        assert!(matches!(err, Error::TomlDe { .. }));

        let err = "name = \"x\"\npick-strategy = \"random\"".parse::<PackJob>().unwrap_err();
        assert!(matches!(err, Error::TomlDe { .. }));
    }

    #[test]
    fn volumetric_job() {
        let job = PackJob::from_toml_str(CRATES).unwrap();
        let manifest = job.run().unwrap();

        // The large crate comes first and hits its weight limit after three
        // cubes, leaving the last one for the small crate.
        assert_eq!(manifest.bins[0].name, "large");
        assert_eq!(manifest.bins[0].placements.len(), 3);
        assert_eq!(manifest.bins[0].total_weight, 4.5);
        assert_eq!(manifest.bins[1].name, "small");
        assert_eq!(manifest.bins[1].placements[0].payload, "cube-4");
        assert!(manifest.unfit.is_empty());
    }

    #[test]
    fn flat_job() {
        let job: PackJob = r#"
            name = "sheets"
            space = "flat"
            pick-strategy = "smaller-first"

            [[bins]]
            name = "sheet"
            width = 10
            height = 10

            [[items]]
            name = "tall"
            width = 4
            height = 6

            [[items]]
            name = "wide"
            width = 6
            height = 4
        "#
        .parse()
        .unwrap();

        let manifest = job.run().unwrap();
        let placements = &manifest.bins[0].placements;

        assert_eq!(manifest.space, "flat");
        assert_eq!(placements[0].payload, "tall");
        assert_eq!(placements[1].payload, "wide");
        assert_eq!(placements[1].position, vec![4.0, 0.0]);
    }

    #[test]
    fn depth_must_match_space() {
        let mut job: PackJob = CRATES.parse().unwrap();
        job.space = SpaceKind::Flat;
        assert!(matches!(job.run(), Err(Error::UnexpectedDepth { .. })));

        job.space = SpaceKind::Volumetric;
        job.bins[0].depth = None;
        assert!(matches!(job.run(), Err(Error::MissingDepth { .. })));
    }

    #[test]
    fn invalid_sizes_surface_as_errors() {
        let mut job: PackJob = CRATES.parse().unwrap();
        job.items[0].width = -5.0;

        assert!(matches!(job.run(), Err(Error::InvalidDimension { .. })));
    }

    #[test]
    fn seeded_shuffle_jobs_are_reproducible() {
        let mut job: PackJob = CRATES.parse().unwrap();
        job.pick_strategy = PickStrategy::Shuffle;

        let first = job.run_with_rng(&mut StdRng::seed_from_u64(3)).unwrap();
        let second = job.run_with_rng(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.toml");
        fs_err::write(&path, CRATES).unwrap();

        let job = PackJob::read_from_file(&path).unwrap();
        assert_eq!(job.name, "crates");
        assert_eq!(job.items[0].payloads().len(), 4);
    }
}
