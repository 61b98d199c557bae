use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of context a [`PathRef`] has to be resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextKind {
    Filesystem,
    Store,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContextKind::Filesystem => f.write_str("filesystem"),
            ContextKind::Store => f.write_str("store"),
        }
    }
}

/// A standalone JSON document on the local filesystem.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileLocation {
    pub path: String,
}

/// A group or array inside a Zarr hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreLocation {
    pub path: String,
}

/// Where a node's own document lives, relative to the document that mentions it.
///
/// The two variants are never interchangeable: a file location can only be resolved against a
/// filesystem context and a store location only against a store context.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PathRef {
    #[serde(rename = "json")]
    File(FileLocation),

    #[serde(rename = "zarr")]
    Store(StoreLocation),
}

impl PathRef {
    pub fn file(path: impl Into<String>) -> Self {
        PathRef::File(FileLocation { path: path.into() })
    }

    pub fn store(path: impl Into<String>) -> Self {
        PathRef::Store(StoreLocation { path: path.into() })
    }

    pub fn path(&self) -> &str {
        match self {
            PathRef::File(location) => &location.path,
            PathRef::Store(location) => &location.path,
        }
    }

    pub fn context_kind(&self) -> ContextKind {
        match self {
            PathRef::File(_) => ContextKind::Filesystem,
            PathRef::Store(_) => ContextKind::Store,
        }
    }
}

impl fmt::Display for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathRef::File(location) => write!(f, "json:{}", location.path),
            PathRef::Store(location) => write!(f, "zarr:{}", location.path),
        }
    }
}
