use std::fs;
use std::path::{Path, PathBuf};

use crate::attributes::{self, Attributes};
use crate::data_type::DataType;
use crate::error::{io_error, Error, Result};
use crate::metadata::{self, ArrayMetadata, ARRAY_METADATA_KEY};
use crate::persistence_mode::PersistenceMode;
use crate::{node_kind_at, NodeKind};

/// A handle to an array, i.e. a directory holding a `.zarray` key.
#[derive(Clone, Debug, PartialEq)]
pub struct Array {
    path: PathBuf,
    mode: PersistenceMode,
    metadata: ArrayMetadata,
}

impl Array {
    /// Creates a standalone array at `path`.
    pub fn create(
        path: impl AsRef<Path>,
        shape: Vec<usize>,
        data_type: DataType,
        overwrite: bool,
    ) -> Result<Array> {
        Array::create_with_metadata(
            path.as_ref().to_path_buf(),
            ArrayMetadata::new(shape, data_type),
            overwrite,
        )
    }

    pub fn create_with_metadata(
        path: PathBuf,
        metadata: ArrayMetadata,
        overwrite: bool,
    ) -> Result<Array> {
        if node_kind_at(&path).is_some() {
            if !overwrite {
                return Err(Error::AlreadyExists(path));
            }
            log::debug!("replacing node at {}", path.display());
            fs::remove_dir_all(&path).map_err(io_error(&path))?;
        }
        fs::create_dir_all(&path).map_err(io_error(&path))?;
        metadata::write(&path.join(ARRAY_METADATA_KEY), &metadata)?;
        Ok(Array {
            path,
            mode: PersistenceMode::ReadWrite,
            metadata,
        })
    }

    /// Opens an existing array. Arrays are never created implicitly, so every mode requires
    /// the array to exist.
    pub fn open(path: impl AsRef<Path>, mode: PersistenceMode) -> Result<Array> {
        let path = path.as_ref().to_path_buf();
        match node_kind_at(&path) {
            Some(NodeKind::Array) => Array::load(path, mode),
            _ => Err(Error::NotFound(path)),
        }
    }

    pub(crate) fn load(path: PathBuf, mode: PersistenceMode) -> Result<Array> {
        let metadata = metadata::read(&path.join(ARRAY_METADATA_KEY))?;
        Ok(Array {
            path,
            mode,
            metadata,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    pub fn metadata(&self) -> &ArrayMetadata {
        &self.metadata
    }

    pub fn shape(&self) -> &[usize] {
        &self.metadata.shape
    }

    pub fn data_type(&self) -> DataType {
        self.metadata.data_type
    }

    pub fn attributes(&self) -> Result<Attributes> {
        attributes::read(&self.path)
    }

    pub fn update_attributes(&self, attributes: Attributes) -> Result<()> {
        if self.mode.is_read_only() {
            return Err(Error::ReadOnly(self.path.clone()));
        }
        attributes::update(&self.path, attributes)
    }
}
