use std::io;
use std::path::PathBuf;

use ome_ngff::{ContextKind, PathRef};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("`{reference}` cannot be resolved against a {context} context")]
    ContextMismatch {
        reference: PathRef,
        context: ContextKind,
    },

    #[error("`{0}` points outside of its context")]
    UnsupportedEscape(String),

    #[error("nothing found at `{0}`")]
    NotFound(String),

    #[error("relative path `{0}` cannot be resolved without a context")]
    Unanchored(String),

    #[error("expected a document with id `{expected}`, found `{found}`")]
    IdMismatch { expected: String, found: String },

    #[error("reference `{0}` has no location and can only be resolved within its tree")]
    NotExternal(String),

    #[error("not implemented: {0}")]
    Unimplemented(&'static str),

    #[error(transparent)]
    Model(#[from] ome_ngff::Error),

    #[error(transparent)]
    Store(#[from] zarr_store::Error),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: invalid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn io_error(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
    let path = path.into();
    move |source| Error::Io { path, source }
}

pub(crate) fn json_error(path: impl Into<PathBuf>) -> impl FnOnce(serde_json::Error) -> Error {
    let path = path.into();
    move |source| Error::Json { path, source }
}
