use std::io;

use thiserror::Error;

use crate::types::{Axis, RotationType};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Only the identity and the quarter turn around the vertical axis have a
    /// known placement transform.
    #[error("No placement transform is known for rotation {0} yet")]
    UnsupportedRotation(RotationType),

    #[error("Rotation {rotation} is not allowed for {space} items")]
    InvalidRotation {
        rotation: RotationType,
        space: &'static str,
    },

    #[error("Axis {axis} is not searched when packing {space} bins")]
    InvalidAxis { axis: Axis, space: &'static str },

    #[error("'{value}' is not a valid {kind}")]
    InvalidSelector { kind: &'static str, value: String },

    #[error("The packer has already been packed")]
    AlreadyPacked,

    #[error("The packer has not been packed yet")]
    NotPacked,

    #[error("{what} must be a finite number greater than zero, got {value}")]
    InvalidDimension { what: String, value: f64 },

    #[error("{what} must be a finite number of at least zero, got {value}")]
    InvalidWeight { what: String, value: f64 },

    #[error("{what} needs a depth when packing volumetric bins")]
    MissingDepth { what: String },

    #[error("{what} can't have a depth when packing flat envelopes")]
    UnexpectedDepth { what: String },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },

    #[error(transparent)]
    TomlDe {
        #[from]
        source: toml::de::Error,
    },

    #[error(transparent)]
    TomlSer {
        #[from]
        source: toml::ser::Error,
    },

    #[error(transparent)]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Tells whether this error comes from using a packer in the wrong
    /// lifecycle state.
    pub fn is_state_error(&self) -> bool {
        matches!(self, Error::AlreadyPacked | Error::NotPacked)
    }
}
