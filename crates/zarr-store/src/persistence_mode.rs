use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a group or array is opened, using the same single-letter codes as zarr-python.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersistenceMode {
    /// The node must exist and may not be modified.
    #[default]
    #[serde(rename = "r")]
    ReadOnly,

    /// The node must exist.
    #[serde(rename = "r+")]
    ReadWrite,

    /// The node is created if it does not exist.
    #[serde(rename = "a")]
    ReadWriteNonExisting,

    /// The node is created, replacing whatever is stored at its location.
    #[serde(rename = "w")]
    Create,

    /// The node is created and opening fails if something already exists.
    #[serde(rename = "w-")]
    CreateNonExisting,
}

impl PersistenceMode {
    pub fn is_read_only(self) -> bool {
        matches!(self, PersistenceMode::ReadOnly)
    }

    pub fn may_create(self) -> bool {
        matches!(
            self,
            PersistenceMode::ReadWriteNonExisting
                | PersistenceMode::Create
                | PersistenceMode::CreateNonExisting
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PersistenceMode::ReadOnly => "r",
            PersistenceMode::ReadWrite => "r+",
            PersistenceMode::ReadWriteNonExisting => "a",
            PersistenceMode::Create => "w",
            PersistenceMode::CreateNonExisting => "w-",
        }
    }
}

impl fmt::Display for PersistenceMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersistenceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(PersistenceMode::ReadOnly),
            "r+" => Ok(PersistenceMode::ReadWrite),
            "a" => Ok(PersistenceMode::ReadWriteNonExisting),
            "w" => Ok(PersistenceMode::Create),
            "w-" => Ok(PersistenceMode::CreateNonExisting),
            other => Err(format!("unknown persistence mode `{other}`")),
        }
    }
}
