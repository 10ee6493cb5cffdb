//! Turning packed state into something other programs can consume.
//!
//! Converting a packing into a drawing or any other document format is up to
//! implementors of `LayoutExporter`. The crate only ships the
//! `ManifestExporter`, which produces a serializable `PackManifest`.

use std::fmt;

use crate::{
    error::{Error, Result},
    manifest::PackManifest,
    packer::Packer,
    space::Space,
};

pub trait LayoutExporter<P, S: Space> {
    type Output;

    /// Converts the final state of a packed `packer`. Implementations should
    /// refuse packers that haven't been packed yet.
    fn export(&self, packer: &Packer<P, S>) -> Result<Self::Output>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestExporter;

impl<P: fmt::Display, S: Space> LayoutExporter<P, S> for ManifestExporter {
    type Output = PackManifest;

    fn export(&self, packer: &Packer<P, S>) -> Result<PackManifest> {
        if !packer.is_packed() {
            return Err(Error::NotPacked);
        }

        Ok(PackManifest::from_packer(packer))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::types::PickStrategy;

    #[test]
    fn refuses_unpacked_packers() {
        let mut packer = Packer::new();
        packer.add_box("box", 1.0, 1.0, 1.0).unwrap();
        packer.add_item("a", 1.0, 1.0, 1.0, 0.0).unwrap();

        let err = ManifestExporter.export(&packer).unwrap_err();
        assert!(matches!(err, Error::NotPacked));
        assert!(err.is_state_error());
    }

    #[test]
    fn exports_packed_packers() {
        let mut packer = Packer::new();
        packer.add_box("box", 1.0, 1.0, 1.0).unwrap();
        packer.add_item("a", 1.0, 1.0, 1.0, 0.0).unwrap();
        packer.add_item("b", 1.0, 1.0, 1.0, 0.0).unwrap();
        packer.pack(PickStrategy::BiggerFirst, true).unwrap();

        let manifest = ManifestExporter.export(&packer).unwrap();
        assert_eq!(manifest.placed_count(), 1);
        assert_eq!(manifest.unfit, vec!["b"]);
    }

    struct CountingExporter;

    impl<P, S: Space> LayoutExporter<P, S> for CountingExporter {
        type Output = usize;

        fn export(&self, packer: &Packer<P, S>) -> Result<usize> {
            Ok(packer.bins().iter().map(|bin| bin.items().len()).sum())
        }
    }

    #[test]
    fn custom_exporters() {
        let mut packer = Packer::new();
        packer.add_box("one", 2.0, 1.0, 1.0).unwrap();
        packer.add_item(1, 1.0, 1.0, 1.0, 0.0).unwrap();
        packer.add_item(2, 1.0, 1.0, 1.0, 0.0).unwrap();
        packer.pack(PickStrategy::BiggerFirst, false).unwrap();

        assert_eq!(CountingExporter.export(&packer).unwrap(), 2);
    }
}
