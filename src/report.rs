use std::fmt;

use indexmap::IndexMap;
use ome_ngff::{Error, Ref, Tree};
use serde::Serialize;

/// The ids and references of a tree whose local references all resolve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report<'a> {
    ids: Vec<&'a str>,
    refs: Vec<&'a Ref>,
}

impl<'a> Report<'a> {
    /// Validates the references of `tree` and collects its ids and distinct references.
    pub fn new(tree: &Tree<'a>) -> Result<Self, Error> {
        tree.validate_references()
            .map_err(Error::UnresolvedReferences)?;
        let ids = tree.collect_ids().keys().copied().collect::<Vec<_>>();
        let mut refs = IndexMap::new();
        for reference in tree.collect_refs() {
            refs.insert(reference.reference.as_str(), reference);
        }
        log::debug!(
            "`{}`: {} ids, {} distinct references",
            tree.root().id(),
            ids.len(),
            refs.len()
        );
        Ok(Self {
            ids,
            refs: refs.into_values().collect(),
        })
    }

    pub fn ids(&self) -> &[&'a str] {
        &self.ids
    }

    pub fn refs(&self) -> &[&'a Ref] {
        &self.refs
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Collected IDs:")?;
        for id in &self.ids {
            writeln!(f, " - {}", id)?;
        }
        writeln!(f, "Collected Refs:")?;
        for reference in &self.refs {
            match &reference.path {
                Some(path) => writeln!(f, " - {} ({})", reference.reference, path)?,
                None => writeln!(f, " - {}", reference.reference)?,
            }
        }
        Ok(())
    }
}
