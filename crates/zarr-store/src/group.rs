use std::fs;
use std::path::{Path, PathBuf};

use crate::array::Array;
use crate::attributes::{self, Attributes};
use crate::data_type::DataType;
use crate::error::{io_error, Error, Result};
use crate::metadata::{self, ArrayMetadata, GroupMetadata, GROUP_METADATA_KEY};
use crate::persistence_mode::PersistenceMode;
use crate::{node_kind_at, Node, NodeKind};

/// A handle to a group, i.e. a directory holding a `.zgroup` key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    path: PathBuf,
    mode: PersistenceMode,
}

impl Group {
    /// Opens the group stored at `path`, creating or replacing it as `mode` demands.
    pub fn open(path: impl AsRef<Path>, mode: PersistenceMode) -> Result<Group> {
        let path = path.as_ref().to_path_buf();
        log::debug!("opening group {} (mode {})", path.display(), mode);
        match (mode, node_kind_at(&path)) {
            (PersistenceMode::Create, Some(_)) => {
                fs::remove_dir_all(&path).map_err(io_error(&path))?;
                init_group(&path)?;
            }
            (PersistenceMode::CreateNonExisting, Some(_)) => {
                return Err(Error::AlreadyExists(path));
            }
            (_, Some(NodeKind::Array)) => return Err(Error::NotAGroup(path)),
            (_, Some(NodeKind::Group)) => {}
            (mode, None) if mode.may_create() => init_group(&path)?,
            (_, None) => return Err(Error::NotFound(path)),
        }
        Ok(Group { path, mode })
    }

    pub(crate) fn from_existing(path: PathBuf, mode: PersistenceMode) -> Group {
        Group { path, mode }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    /// Looks up a group or array below this group. `key` is a `/`-separated path relative to
    /// this group, empty and `.` segments are skipped and `..` is rejected.
    pub fn get(&self, key: &str) -> Result<Option<Node>> {
        let path = self.path.join(normalize_key(key)?);
        let node = match node_kind_at(&path) {
            Some(NodeKind::Group) => Some(Node::Group(Group::from_existing(path, self.mode))),
            Some(NodeKind::Array) => Some(Node::Array(Array::load(path, self.mode)?)),
            None => None,
        };
        log::trace!(
            "{}: lookup of `{}` {}",
            self.path.display(),
            key,
            if node.is_some() { "succeeded" } else { "found nothing" }
        );
        Ok(node)
    }

    /// Creates a new group at `key`. Missing intermediate groups are created as well.
    pub fn create_group(&self, key: &str) -> Result<Group> {
        self.ensure_writable()?;
        let relative = normalize_key(key)?;
        let path = self.path.join(&relative);
        if node_kind_at(&path).is_some() {
            return Err(Error::AlreadyExists(path));
        }
        self.require_parents(&relative)?;
        init_group(&path)?;
        Ok(Group::from_existing(path, self.mode))
    }

    /// Creates an array at `key` holding only metadata. With `overwrite`, whatever is stored
    /// at `key` is replaced.
    pub fn create_array(
        &self,
        key: &str,
        shape: Vec<usize>,
        data_type: DataType,
        overwrite: bool,
    ) -> Result<Array> {
        self.ensure_writable()?;
        let relative = normalize_key(key)?;
        if relative.as_os_str().is_empty() {
            return Err(Error::InvalidKey(key.to_string()));
        }
        self.require_parents(&relative)?;
        let path = self.path.join(relative);
        Array::create_with_metadata(path, ArrayMetadata::new(shape, data_type), overwrite)
    }

    pub fn attributes(&self) -> Result<Attributes> {
        attributes::read(&self.path)
    }

    /// Merges `attributes` into the stored ones, keeping keys that are not overwritten.
    pub fn update_attributes(&self, attributes: Attributes) -> Result<()> {
        self.ensure_writable()?;
        attributes::update(&self.path, attributes)
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.mode.is_read_only() {
            Err(Error::ReadOnly(self.path.clone()))
        } else {
            Ok(())
        }
    }

    fn require_parents(&self, relative: &Path) -> Result<()> {
        let mut current = self.path.clone();
        let parents = relative.parent().map(Path::components).into_iter().flatten();
        for component in parents {
            current.push(component);
            match node_kind_at(&current) {
                Some(NodeKind::Group) => {}
                Some(NodeKind::Array) => return Err(Error::NotAGroup(current)),
                None => init_group(&current)?,
            }
        }
        Ok(())
    }
}

fn init_group(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(io_error(path))?;
    let metadata_path = path.join(GROUP_METADATA_KEY);
    if !metadata_path.is_file() {
        metadata::write(&metadata_path, &GroupMetadata::default())?;
    }
    Ok(())
}

pub(crate) fn normalize_key(key: &str) -> Result<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in key.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(Error::InvalidKey(key.to_string())),
            segment => relative.push(segment),
        }
    }
    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn store() -> (TempDir, Group) {
        let dir = TempDir::new().unwrap();
        let group = Group::open(dir.path().join("root.zarr"), PersistenceMode::ReadWriteNonExisting)
            .unwrap();
        (dir, group)
    }

    #[test]
    fn open_creates_group_metadata() {
        let (_dir, group) = store();
        assert!(group.path().join(".zgroup").is_file());
    }

    #[test]
    fn open_read_only_requires_existing_group() {
        let dir = TempDir::new().unwrap();
        let err = Group::open(dir.path().join("missing.zarr"), PersistenceMode::ReadOnly).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn open_create_non_existing_fails_on_existing_group() {
        let (_dir, group) = store();
        let err = Group::open(group.path(), PersistenceMode::CreateNonExisting).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }

    #[test]
    fn open_create_replaces_existing_group() {
        let (_dir, group) = store();
        group.create_group("child").unwrap();
        let group = Group::open(group.path(), PersistenceMode::Create).unwrap();
        assert!(group.get("child").unwrap().is_none());
    }

    #[test]
    fn get_nested_nodes() {
        let (_dir, group) = store();
        group.create_group("multiscale_1").unwrap();
        group
            .create_array("multiscale_1/0", vec![64, 64, 64], DataType::Uint8, false)
            .unwrap();

        assert!(matches!(group.get("multiscale_1").unwrap(), Some(Node::Group(_))));
        assert!(matches!(group.get("./multiscale_1/0").unwrap(), Some(Node::Array(_))));
        assert!(group.get("multiscale_1/1").unwrap().is_none());
        assert!(matches!(group.get(""), Ok(Some(Node::Group(_)))));
    }

    #[test]
    fn get_rejects_parent_segments() {
        let (_dir, group) = store();
        assert!(matches!(group.get("../other"), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn create_array_creates_intermediate_groups() {
        let (_dir, group) = store();
        let array = group
            .create_array("a/b/0", vec![4, 4], DataType::Uint16, false)
            .unwrap();
        assert!(group.path().join("a/.zgroup").is_file());
        assert!(group.path().join("a/b/.zgroup").is_file());
        assert_eq!(array.shape(), &[4, 4]);
    }

    #[test]
    fn create_array_without_overwrite_fails_on_existing_array() {
        let (_dir, group) = store();
        group.create_array("0", vec![4], DataType::Uint8, false).unwrap();
        let err = group.create_array("0", vec![4], DataType::Uint8, false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
        group.create_array("0", vec![8], DataType::Uint8, true).unwrap();
    }

    #[test]
    fn update_attributes_keeps_unrelated_keys() {
        let (_dir, group) = store();
        group
            .update_attributes(json!({"foo": 1, "ome": {"id": "a"}}).as_object().unwrap().clone())
            .unwrap();
        group
            .update_attributes(json!({"ome": {"id": "b"}}).as_object().unwrap().clone())
            .unwrap();
        assert_eq!(
            Value::Object(group.attributes().unwrap()),
            json!({"foo": 1, "ome": {"id": "b"}})
        );
    }

    #[test]
    fn read_only_group_rejects_writes() {
        let (_dir, group) = store();
        let group = Group::open(group.path(), PersistenceMode::ReadOnly).unwrap();
        assert!(matches!(
            group.update_attributes(Attributes::new()),
            Err(Error::ReadOnly(_))
        ));
        assert!(matches!(group.create_group("x"), Err(Error::ReadOnly(_))));
    }

    #[test]
    fn missing_attributes_are_empty() {
        let (_dir, group) = store();
        assert!(group.attributes().unwrap().is_empty());
    }
}
