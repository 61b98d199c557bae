use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data_type::DataType;
use crate::error::{io_error, json_error, Result};

pub const GROUP_METADATA_KEY: &str = ".zgroup";
pub const ARRAY_METADATA_KEY: &str = ".zarray";
pub const ATTRIBUTES_KEY: &str = ".zattrs";

const ZARR_FORMAT: u32 = 2;

/// Contents of the `.zgroup` key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupMetadata {
    pub zarr_format: u32,
}

impl Default for GroupMetadata {
    fn default() -> Self {
        Self {
            zarr_format: ZARR_FORMAT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Compressor {
    pub id: String,

    #[serde(flatten)]
    pub meta_data: HashMap<String, Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    /// Row-major, the last dimension varies fastest.
    C,

    /// Column-major, the first dimension varies fastest.
    F,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimensionSeparator {
    #[default]
    #[serde(rename = ".")]
    Dot,

    #[serde(rename = "/")]
    Slash,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub id: String,

    #[serde(flatten)]
    pub meta_data: HashMap<String, Value>,
}

/// Contents of the `.zarray` key.
///
/// Only the metadata is managed here, chunk data is never read or written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayMetadata {
    pub zarr_format: u32,

    pub shape: Vec<usize>,

    /// All chunks of an array have the same shape.
    pub chunks: Vec<usize>,

    #[serde(rename = "dtype")]
    pub data_type: DataType,

    /// `null` if no compressor is used.
    pub compressor: Option<Compressor>,

    /// `null` if uninitialized portions of the array have no default value.
    pub fill_value: Option<Value>,

    pub order: Order,

    pub filters: Option<Vec<Filter>>,

    #[serde(default)]
    pub dimension_separator: DimensionSeparator,
}

impl ArrayMetadata {
    /// Metadata for an uncompressed array stored as a single chunk.
    pub fn new(shape: Vec<usize>, data_type: DataType) -> Self {
        Self {
            zarr_format: ZARR_FORMAT,
            chunks: shape.clone(),
            shape,
            data_type,
            compressor: None,
            fill_value: Some(Value::from(0)),
            order: Order::C,
            filters: None,
            dimension_separator: DimensionSeparator::default(),
        }
    }
}

pub(crate) fn read<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let bytes = fs::read(path).map_err(io_error(path))?;
    serde_json::from_slice(&bytes).map_err(json_error(path))
}

pub(crate) fn write<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize,
{
    let bytes = serde_json::to_vec_pretty(value).map_err(json_error(path))?;
    fs::write(path, bytes).map_err(io_error(path))
}
