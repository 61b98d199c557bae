use serde::{Deserialize, Serialize};

use crate::error::{Error, UnknownReference};
use crate::path::PathRef;
use crate::walk::{Element, ElementKind, IdIndex};

/// A symbolic pointer to the id of a node or coordinate system.
///
/// Without a `path` the target lives in the same tree. With a `path` the target is the document
/// stored at that location, whose own id has to match `reference`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ref {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathRef>,

    #[serde(rename = "ref")]
    pub reference: String,
}

impl Ref {
    pub fn local(reference: impl Into<String>) -> Self {
        Self {
            path: None,
            reference: reference.into(),
        }
    }

    pub fn external(reference: impl Into<String>, path: PathRef) -> Self {
        Self {
            path: Some(path),
            reference: reference.into(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.path.is_none()
    }

    /// Looks the target up among the ids of an in-memory tree.
    pub fn resolve_local<'a>(&self, ids: &IdIndex<'a>) -> Result<Element<'a>, UnknownReference> {
        ids.get(self.reference.as_str())
            .copied()
            .ok_or_else(|| UnknownReference {
                reference: self.reference.clone(),
            })
    }

    /// Like [`Ref::resolve_local`], but also requires the target to be of the given kind.
    pub fn resolve_local_as<'a>(
        &self,
        ids: &IdIndex<'a>,
        expected: ElementKind,
    ) -> Result<Element<'a>, Error> {
        let element = self.resolve_local(ids)?;
        if element.kind() != expected {
            return Err(Error::KindMismatch {
                id: self.reference.clone(),
                expected,
                found: element.kind(),
            });
        }
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attributes;
    use crate::coordinate_system::CoordinateSystem;
    use crate::node::SingleScale;
    use crate::walk::Tree;
    use serde_json::{from_str, to_string, Value};

    fn single_scale() -> SingleScale {
        SingleScale {
            id: "s0".to_string(),
            attributes: Attributes {
                coordinate_systems: vec![CoordinateSystem::with_id("w0", "world", vec![])],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn serialize_local() {
        assert_eq!(to_string(&Ref::local("w0")).unwrap(), r#"{"ref":"w0"}"#);
    }

    #[test]
    fn serialize_external() {
        assert_eq!(
            from_str::<Value>(&to_string(&Ref::external("w0", PathRef::store("./0"))).unwrap()).unwrap(),
            from_str::<Value>(r#"{"ref": "w0", "path": {"type": "zarr", "path": "./0"}}"#).unwrap()
        );
    }

    #[test]
    fn resolve_local_finds_node_and_coordinate_system() {
        let scale = single_scale();
        let tree = Tree::new(&scale);
        let ids = tree.collect_ids();
        assert_eq!(Ref::local("s0").resolve_local(&ids).unwrap().kind(), ElementKind::SingleScale);
        assert_eq!(
            Ref::local("w0").resolve_local(&ids).unwrap().kind(),
            ElementKind::CoordinateSystem
        );
    }

    #[test]
    fn resolve_local_unknown() {
        let scale = single_scale();
        let tree = Tree::new(&scale);
        assert_eq!(
            Ref::local("w1").resolve_local(&tree.collect_ids()),
            Err(UnknownReference { reference: "w1".to_string() })
        );
    }

    #[test]
    fn resolve_local_as_checks_kind() {
        let scale = single_scale();
        let tree = Tree::new(&scale);
        let ids = tree.collect_ids();
        assert!(Ref::local("w0").resolve_local_as(&ids, ElementKind::CoordinateSystem).is_ok());
        assert_eq!(
            Ref::local("s0").resolve_local_as(&ids, ElementKind::CoordinateSystem),
            Err(Error::KindMismatch {
                id: "s0".to_string(),
                expected: ElementKind::CoordinateSystem,
                found: ElementKind::SingleScale,
            })
        );
    }
}
