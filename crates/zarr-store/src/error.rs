use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: invalid metadata document: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no group or array found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("a group or array already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("{} was opened read-only", .0.display())]
    ReadOnly(PathBuf),

    #[error("invalid store key `{0}`")]
    InvalidKey(String),

    #[error("{} is an array, not a group", .0.display())]
    NotAGroup(PathBuf),
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
