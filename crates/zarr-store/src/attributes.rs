use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::metadata::{self, ATTRIBUTES_KEY};

/// User attributes of a group or array, stored as a JSON object under `.zattrs`.
pub type Attributes = Map<String, Value>;

/// Reads the attributes stored in `dir`. A missing `.zattrs` key is an empty mapping.
pub(crate) fn read(dir: &Path) -> Result<Attributes> {
    let path = dir.join(ATTRIBUTES_KEY);
    if !path.is_file() {
        return Ok(Attributes::new());
    }
    metadata::read(&path)
}

/// Merges `attributes` into the stored ones. Keys already present are overwritten, others are kept.
pub(crate) fn update(dir: &Path, attributes: Attributes) -> Result<()> {
    let mut stored = read(dir)?;
    stored.extend(attributes);
    log::trace!("writing {} attribute key(s) to {}", stored.len(), dir.display());
    metadata::write(&dir.join(ATTRIBUTES_KEY), &stored)
}
