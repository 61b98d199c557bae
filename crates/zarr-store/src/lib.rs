//! A filesystem-backed Zarr v2 hierarchy.
//! https://zarr-specs.readthedocs.io/en/latest/v2/v2.0.html
//!
//! Groups and arrays are directories holding a `.zgroup` or `.zarray` key, user attributes live
//! under `.zattrs`. Only metadata and attributes are handled, chunk data is out of scope.

use std::path::Path;

pub mod array;
pub mod attributes;
pub mod data_type;
pub mod error;
pub mod group;
pub mod metadata;
pub mod persistence_mode;

pub use array::Array;
pub use attributes::Attributes;
pub use data_type::DataType;
pub use error::{Error, Result};
pub use group::Group;
pub use metadata::{ArrayMetadata, GroupMetadata};
pub use persistence_mode::PersistenceMode;

/// A handle to any node in the hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Group(Group),
    Array(Array),
}

impl Node {
    pub fn path(&self) -> &Path {
        match self {
            Node::Group(group) => group.path(),
            Node::Array(array) => array.path(),
        }
    }

    pub fn attributes(&self) -> Result<Attributes> {
        match self {
            Node::Group(group) => group.attributes(),
            Node::Array(array) => array.attributes(),
        }
    }

    pub fn update_attributes(&self, attributes: Attributes) -> Result<()> {
        match self {
            Node::Group(group) => group.update_attributes(attributes),
            Node::Array(array) => array.update_attributes(attributes),
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            Node::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(array) => Some(array),
            Node::Group(_) => None,
        }
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<Array> for Node {
    fn from(array: Array) -> Self {
        Node::Array(array)
    }
}

/// Opens whatever is stored at `path`. If nothing is stored there and `mode` allows creation,
/// a new group is created.
pub fn open(path: impl AsRef<Path>, mode: PersistenceMode) -> Result<Node> {
    let path = path.as_ref();
    match node_kind_at(path) {
        Some(NodeKind::Array) if mode != PersistenceMode::Create => {
            Array::open(path, mode).map(Node::Array)
        }
        _ => Group::open(path, mode).map(Node::Group),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Group,
    Array,
}

pub(crate) fn node_kind_at(path: &Path) -> Option<NodeKind> {
    if path.join(metadata::ARRAY_METADATA_KEY).is_file() {
        Some(NodeKind::Array)
    } else if path.join(metadata::GROUP_METADATA_KEY).is_file() {
        Some(NodeKind::Group)
    } else {
        None
    }
}
