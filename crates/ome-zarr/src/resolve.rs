//! Resolution of path references against the context of the document that holds them.

use std::path::Path;

use ome_ngff::{ContextKind, FileLocation, PathRef, StoreLocation};
use zarr_store::PersistenceMode;

use crate::context::{Context, Located};
use crate::error::{Error, Result};

pub trait Resolve {
    /// Finds the file, group or array the reference points to.
    fn resolve(&self, context: &Context) -> Result<Located>;
}

impl Resolve for PathRef {
    fn resolve(&self, context: &Context) -> Result<Located> {
        match self {
            PathRef::File(location) => location.resolve(context),
            PathRef::Store(location) => location.resolve(context),
        }
    }
}

impl Resolve for FileLocation {
    fn resolve(&self, context: &Context) -> Result<Located> {
        if let Context::Store(_) = context {
            return Err(Error::ContextMismatch {
                reference: PathRef::File(self.clone()),
                context: ContextKind::Store,
            });
        }
        let relative = relative_path(&self.path)?;
        let path = match context {
            Context::Filesystem(document) => {
                let joined = document.parent().unwrap_or(Path::new("")).join(relative);
                joined
                    .canonicalize()
                    .map_err(|_| Error::NotFound(joined.display().to_string()))?
            }
            _ => {
                let path = Path::new(&self.path);
                if !path.is_absolute() {
                    return Err(Error::Unanchored(self.path.clone()));
                }
                if !path.exists() {
                    return Err(Error::NotFound(self.path.clone()));
                }
                path.to_path_buf()
            }
        };
        log::debug!("resolved file reference `{}` to {}", self.path, path.display());
        Ok(Located::File(path))
    }
}

impl Resolve for StoreLocation {
    fn resolve(&self, context: &Context) -> Result<Located> {
        if let Context::Filesystem(_) = context {
            return Err(Error::ContextMismatch {
                reference: PathRef::Store(self.clone()),
                context: ContextKind::Filesystem,
            });
        }
        let key = relative_path(&self.path)?;
        let node = match context {
            Context::Store(zarr_store::Node::Group(group)) => group
                .get(key)?
                .ok_or_else(|| Error::NotFound(group.path().join(key).display().to_string()))?,
            Context::Store(zarr_store::Node::Array(array)) => {
                return Err(zarr_store::Error::NotAGroup(array.path().to_path_buf()).into())
            }
            _ => match zarr_store::open(&self.path, PersistenceMode::ReadOnly) {
                Ok(node) => node,
                Err(zarr_store::Error::NotFound(path)) => {
                    return Err(Error::NotFound(path.display().to_string()))
                }
                Err(e) => return Err(e.into()),
            },
        };
        log::debug!("resolved store reference `{}` to {}", self.path, node.path().display());
        Ok(Located::Store(node))
    }
}

/// Strips leading `./` segments and rejects any `..` segment, so a reference never leaves the
/// directory or group of its context.
fn relative_path(path: &str) -> Result<&str> {
    let mut stripped = path;
    while let Some(rest) = stripped.strip_prefix("./") {
        stripped = rest.trim_start_matches('/');
    }
    if stripped.split('/').any(|segment| segment == "..") {
        return Err(Error::UnsupportedEscape(path.to_string()));
    }
    Ok(stripped)
}
