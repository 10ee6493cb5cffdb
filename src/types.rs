//! The closed selector sets the packer is configured with.

use std::{fmt, str::FromStr};

use binpack_geom::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An orthogonal orientation of an item, named after which of its intrinsic
/// dimensions ends up along the bin's width, height, and depth axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RotationType {
    Whd,
    Hwd,
    Hdw,
    Dhw,
    Dwh,
    Wdh,
}

impl RotationType {
    /// Every orientation, in the order placement attempts try them.
    pub const ALL: [RotationType; 6] = [
        RotationType::Whd,
        RotationType::Hwd,
        RotationType::Hdw,
        RotationType::Dhw,
        RotationType::Dwh,
        RotationType::Wdh,
    ];

    /// Maps intrinsic `(width, height, depth)` onto the bin axes.
    pub fn permute(self, width: f64, height: f64, depth: f64) -> Vector3<f64> {
        match self {
            RotationType::Whd => Vector3::new(width, height, depth),
            RotationType::Hwd => Vector3::new(height, width, depth),
            RotationType::Hdw => Vector3::new(height, depth, width),
            RotationType::Dhw => Vector3::new(depth, height, width),
            RotationType::Dwh => Vector3::new(depth, width, height),
            RotationType::Wdh => Vector3::new(width, depth, height),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RotationType::Whd => "WHD",
            RotationType::Hwd => "HWD",
            RotationType::Hdw => "HDW",
            RotationType::Dhw => "DHW",
            RotationType::Dwh => "DWH",
            RotationType::Wdh => "WDH",
        }
    }
}

impl Default for RotationType {
    fn default() -> Self {
        RotationType::Whd
    }
}

impl fmt::Display for RotationType {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for RotationType {
    type Err = Error;

    fn from_str(value: &str) -> Result<RotationType, Self::Err> {
        RotationType::ALL
            .iter()
            .copied()
            .find(|rotation| rotation.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| Error::InvalidSelector {
                kind: "rotation",
                value: value.to_owned(),
            })
    }
}

/// One of the bin axes that extreme points are generated along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    Width,
    Height,
    Depth,
}

impl Axis {
    /// Index of this axis into a point or vector.
    pub fn index(self) -> usize {
        match self {
            Axis::Width => 0,
            Axis::Height => 1,
            Axis::Depth => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
            Axis::Depth => "depth",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(value: &str) -> Result<Axis, Self::Err> {
        match value {
            "width" => Ok(Axis::Width),
            "height" => Ok(Axis::Height),
            "depth" => Ok(Axis::Depth),

            _ => Err(Error::InvalidSelector {
                kind: "axis",
                value: value.to_owned(),
            }),
        }
    }
}

/// How bins and items are ordered before packing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickStrategy {
    /// Bins by ascending capacity, items by ascending volume.
    SmallerFirst,

    /// Bins by descending capacity, items by descending volume.
    BiggerFirst,

    /// Bins and items each in a random order.
    Shuffle,
}

impl Default for PickStrategy {
    fn default() -> Self {
        PickStrategy::BiggerFirst
    }
}

impl PickStrategy {
    pub fn name(self) -> &'static str {
        match self {
            PickStrategy::SmallerFirst => "smaller-first",
            PickStrategy::BiggerFirst => "bigger-first",
            PickStrategy::Shuffle => "shuffle",
        }
    }
}

impl fmt::Display for PickStrategy {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for PickStrategy {
    type Err = Error;

    fn from_str(value: &str) -> Result<PickStrategy, Self::Err> {
        match value {
            "smaller-first" => Ok(PickStrategy::SmallerFirst),
            "bigger-first" => Ok(PickStrategy::BiggerFirst),
            "shuffle" => Ok(PickStrategy::Shuffle),

            _ => Err(Error::InvalidSelector {
                kind: "pick strategy",
                value: value.to_owned(),
            }),
        }
    }
}
