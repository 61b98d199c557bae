//! Reading and writing root documents from and to Zarr attributes and JSON files.

use std::fs;
use std::path::Path;

use ome_ngff::{
    decode, Collection, Document, ElementKind, Multiscale, Node, NodeKind, Root, SingleScale,
    Tree, ValidationOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zarr_store::{Array, Group};

use crate::context::{Context, Located};
use crate::error::{io_error, json_error, Result};
use crate::resolve::Resolve;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Merge the attributes stored at the location of a multiscale's scales into the scales.
    #[serde(rename = "mergeExternal")]
    pub merge_external: bool,

    /// Validate the references of the loaded tree. The soft checks of
    /// [`ome_ngff::validation`] run as well and only log warnings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationOptions>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            merge_external: true,
            validation: None,
        }
    }
}

/// Parses a root document read in `context`.
///
/// If the root is a multiscale, every scale with a path gets the attributes of the single scale
/// document stored there merged in. Attributes declared in the multiscale document win, the
/// stored ones fill in everything else.
pub fn deserialize(document: Document, context: &Context, options: &LoadOptions) -> Result<Root> {
    let mut root = Root::from_document(document)?;
    if options.merge_external {
        if let Node::Multiscale(multiscale) = &mut root.node {
            merge_external_attributes(multiscale, context)?;
        }
    }
    if let Some(validation) = &options.validation {
        let tree = Tree::new(&root.node);
        tree.validate(validation)?;
        if !ome_ngff::validation::is_valid(&tree) {
            log::warn!("`{}` loaded with metadata warnings", root.node.id());
        }
    }
    Ok(root)
}

fn merge_external_attributes(multiscale: &mut Multiscale, context: &Context) -> Result<()> {
    for scale in &mut multiscale.nodes {
        let Some(location) = &scale.path else {
            continue;
        };
        let external = match read_located(&location.resolve(context)?)?.node {
            Node::SingleScale(external) => external,
            other => {
                return Err(ome_ngff::Error::KindMismatch {
                    id: scale.id.clone(),
                    expected: ElementKind::SingleScale,
                    found: other.kind().into(),
                }
                .into())
            }
        };
        if external.id != scale.id {
            log::warn!(
                "scale `{}` refers to {} which holds scale `{}`",
                scale.id,
                location,
                external.id
            );
        }
        log::debug!("merging attributes of scale `{}` from {}", scale.id, location);
        scale.attributes = std::mem::take(&mut scale.attributes).merge_over(external.attributes);
    }
    Ok(())
}

fn read_located(located: &Located) -> Result<Root> {
    match located {
        Located::File(path) => read_json_file(path),
        Located::Store(node) => Ok(decode(Value::Object(node.attributes()?))?),
    }
}

/// Reads a wrapped or bare node document as is.
pub(crate) fn read_json_file(path: &Path) -> Result<Root> {
    Ok(decode(read_json_value(path)?)?)
}

fn read_json_value(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(io_error(path))?;
    serde_json::from_str(&contents).map_err(json_error(path))
}

fn into_document(value: Value) -> Result<Document> {
    match value {
        Value::Object(document) => Ok(document),
        _ => Err(ome_ngff::Error::Validation {
            path: "<document>".to_string(),
            message: "expected an object".to_string(),
        }
        .into()),
    }
}

pub fn from_json(document: Value, context: &Context) -> Result<Root> {
    from_json_with(document, context, &LoadOptions::default())
}

pub fn from_json_with(document: Value, context: &Context, options: &LoadOptions) -> Result<Root> {
    deserialize(into_document(document)?, context, options)
}

/// Loads the root document stored in the JSON file at `path`. Relative references are resolved
/// against the file's directory.
pub fn load_json(path: impl AsRef<Path>) -> Result<Root> {
    load_json_with(path, &LoadOptions::default())
}

pub fn load_json_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Root> {
    let path = path.as_ref();
    let path = path.canonicalize().map_err(io_error(path))?;
    log::debug!("loading {}", path.display());
    let document = into_document(read_json_value(&path)?)?;
    deserialize(document, &Context::Filesystem(path), options)
}

pub fn save_json(root: &Root, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let contents = serde_json::to_string_pretty(&root.to_document()?).map_err(json_error(path))?;
    log::debug!("saving {}", path.display());
    fs::write(path, contents).map_err(io_error(path))
}

/// Reads the root document stored in the attributes of `node`.
pub fn read(node: &zarr_store::Node, options: &LoadOptions) -> Result<Root> {
    log::debug!("reading attributes of {}", node.path().display());
    deserialize(node.attributes()?, &Context::Store(node.clone()), options)
}

pub fn read_group(group: &Group, options: &LoadOptions) -> Result<Root> {
    read(&zarr_store::Node::Group(group.clone()), options)
}

pub fn read_array(array: &Array, options: &LoadOptions) -> Result<Root> {
    read(&zarr_store::Node::Array(array.clone()), options)
}

pub fn read_collection(group: &Group) -> Result<Collection> {
    match read_group(group, &LoadOptions::default())?.node {
        Node::Collection(collection) => Ok(collection),
        other => Err(kind_mismatch(&other, NodeKind::Collection)),
    }
}

pub fn read_multiscale(group: &Group) -> Result<Multiscale> {
    match read_group(group, &LoadOptions::default())?.node {
        Node::Multiscale(multiscale) => Ok(multiscale),
        other => Err(kind_mismatch(&other, NodeKind::Multiscale)),
    }
}

pub fn read_single_scale(array: &Array) -> Result<SingleScale> {
    match read_array(array, &LoadOptions::default())?.node {
        Node::SingleScale(scale) => Ok(scale),
        other => Err(kind_mismatch(&other, NodeKind::SingleScale)),
    }
}

fn kind_mismatch(node: &Node, expected: NodeKind) -> crate::error::Error {
    ome_ngff::Error::KindMismatch {
        id: node.id().to_string(),
        expected: expected.into(),
        found: node.kind().into(),
    }
    .into()
}

/// Stores the canonical document of `root` in the attributes of `node`. Unrelated attributes
/// are kept.
pub fn write(root: &Root, node: &zarr_store::Node) -> Result<()> {
    let document = root.to_document()?;
    log::debug!("writing `{}` to {}", root.node.id(), node.path().display());
    Ok(node.update_attributes(document)?)
}

pub fn write_group(root: &Root, group: &Group) -> Result<()> {
    write(root, &zarr_store::Node::Group(group.clone()))
}

pub fn write_array(root: &Root, array: &Array) -> Result<()> {
    write(root, &zarr_store::Node::Array(array.clone()))
}
