use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Element type of an array, stored in `.zarray` using the numpy type string (e.g. `"<u2"`).
///
/// Multi-byte types are written little-endian. Big-endian type strings are accepted on read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl DataType {
    /// The numpy type string stored in array metadata.
    pub fn type_string(self) -> &'static str {
        match self {
            DataType::Bool => "|b1",
            DataType::Int8 => "|i1",
            DataType::Uint8 => "|u1",
            DataType::Int16 => "<i2",
            DataType::Uint16 => "<u2",
            DataType::Int32 => "<i4",
            DataType::Uint32 => "<u4",
            DataType::Int64 => "<i8",
            DataType::Uint64 => "<u8",
            DataType::Float32 => "<f4",
            DataType::Float64 => "<f8",
        }
    }

    fn from_type_string(s: &str) -> Option<DataType> {
        let mut chars = s.chars();
        if !matches!(chars.next()?, '|' | '<' | '>') {
            return None;
        }
        let code = chars.as_str();
        match code {
            "b1" => Some(DataType::Bool),
            "i1" => Some(DataType::Int8),
            "u1" => Some(DataType::Uint8),
            "i2" => Some(DataType::Int16),
            "u2" => Some(DataType::Uint16),
            "i4" => Some(DataType::Int32),
            "u4" => Some(DataType::Uint32),
            "i8" => Some(DataType::Int64),
            "u8" => Some(DataType::Uint64),
            "f4" => Some(DataType::Float32),
            "f8" => Some(DataType::Float64),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.type_string())
    }
}

/// Accepts both numpy names (`"uint16"`) and type strings (`"<u2"`).
impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data_type = match s {
            "bool" => DataType::Bool,
            "int8" => DataType::Int8,
            "int16" => DataType::Int16,
            "int32" => DataType::Int32,
            "int64" => DataType::Int64,
            "uint8" => DataType::Uint8,
            "uint16" => DataType::Uint16,
            "uint32" => DataType::Uint32,
            "uint64" => DataType::Uint64,
            "float32" => DataType::Float32,
            "float64" => DataType::Float64,
            other => {
                return DataType::from_type_string(other)
                    .ok_or_else(|| format!("unsupported data type `{other}`"))
            }
        };
        Ok(data_type)
    }
}

impl Serialize for DataType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.type_string())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
