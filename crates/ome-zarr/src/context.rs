use std::path::{Path, PathBuf};

use ome_ngff::ContextKind;
use zarr_store::{Array, Group};

/// Where the document holding a path reference was read from. Relative references are resolved
/// against it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Context {
    /// The document came from memory. Only absolute file paths and store roots can be resolved.
    #[default]
    Unbound,

    /// The path of a standalone JSON document.
    Filesystem(PathBuf),

    /// The group or array whose attributes hold the document.
    Store(zarr_store::Node),
}

impl Context {
    pub fn kind(&self) -> Option<ContextKind> {
        match self {
            Context::Unbound => None,
            Context::Filesystem(_) => Some(ContextKind::Filesystem),
            Context::Store(_) => Some(ContextKind::Store),
        }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        Context::Filesystem(path.as_ref().to_path_buf())
    }
}

impl From<zarr_store::Node> for Context {
    fn from(node: zarr_store::Node) -> Self {
        Context::Store(node)
    }
}

impl From<Group> for Context {
    fn from(group: Group) -> Self {
        Context::Store(group.into())
    }
}

impl From<Array> for Context {
    fn from(array: Array) -> Self {
        Context::Store(array.into())
    }
}

/// The target of a resolved path reference.
#[derive(Clone, Debug, PartialEq)]
pub enum Located {
    /// An absolute path to an existing file.
    File(PathBuf),

    Store(zarr_store::Node),
}

impl Located {
    /// The context documents read from this location are resolved against.
    pub fn into_context(self) -> Context {
        match self {
            Located::File(path) => Context::Filesystem(path),
            Located::Store(node) => Context::Store(node),
        }
    }
}
