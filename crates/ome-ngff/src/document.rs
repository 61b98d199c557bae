//! Canonical attribute documents.
//!
//! A node is written as `{"id", "type", "name"?, "path"?, "attributes"?, "nodes"?}`: `null`
//! fields are dropped, `nodes` only appears when there are children and `attributes` only when
//! their canonical form is not empty. On read, `kind` is accepted in place of `type` and both
//! spellings of the attribute keys are accepted.

use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::attributes::Attributes;
use crate::error::Error;
use crate::node::{Collection, Multiscale, Node, NodeKind, SingleScale};
use crate::path::PathRef;
use crate::util::random_id;

/// A JSON object as stored in a `.zattrs` key or a standalone file.
pub type Document = Map<String, Value>;

/// The key under which the root node is stored.
pub const ROOT_KEY: &str = "ome";

/// Dotted path of a field inside a document, used in validation errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root() -> Self {
        FieldPath::default()
    }

    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            FieldPath(name.to_string())
        } else {
            FieldPath(format!("{}.{}", self.0, name))
        }
    }

    pub fn index(&self, index: usize) -> Self {
        FieldPath(format!("{}[{}]", self.0, index))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<document>")
        } else {
            f.write_str(&self.0)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    #[serde(rename = "0.7dev0")]
    V0_7Dev0,

    #[serde(rename = "0.8")]
    V0_8,
}

impl Version {
    /// Single scales are tagged with the newer version, all other nodes with the older one.
    pub fn default_for(kind: NodeKind) -> Version {
        match kind {
            NodeKind::SingleScale => Version::V0_8,
            NodeKind::Collection | NodeKind::Multiscale => Version::V0_7Dev0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Version::V0_7Dev0 => "0.7dev0",
            Version::V0_8 => "0.8",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outermost wrapper of a metadata tree: `{"ome": {...node, "version": "..."}}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Root {
    pub version: Version,
    pub node: Node,
}

impl Root {
    /// Wraps `node` using the default version for its kind.
    pub fn new(node: impl Into<Node>) -> Self {
        let node = node.into();
        Self {
            version: Version::default_for(node.kind()),
            node,
        }
    }

    pub fn with_version(node: impl Into<Node>, version: Version) -> Self {
        Self {
            version,
            node: node.into(),
        }
    }

    /// Produces the canonical document of the whole tree.
    ///
    /// A single scale root with a path reference cannot be written, its canonical form only
    /// exists inline.
    pub fn to_document(&self) -> Result<Document, Error> {
        if let Node::SingleScale(scale) = &self.node {
            if scale.path.is_some() {
                return Err(Error::UnsupportedWrite {
                    id: scale.id.clone(),
                });
            }
        }
        let mut ome = match serde_json::to_value(&self.node) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                return Err(Error::validation(
                    ROOT_KEY,
                    format!("expected an object, found {}", type_name(&other)),
                ))
            }
            Err(e) => return Err(Error::validation(ROOT_KEY, e)),
        };
        ome.insert(
            "version".to_string(),
            Value::String(self.version.as_str().to_string()),
        );
        let mut document = Document::new();
        document.insert(ROOT_KEY.to_string(), Value::Object(ome));
        Ok(document)
    }

    /// Parses a wrapped document. A missing version defaults to the one for the node's kind.
    pub fn from_document(mut document: Document) -> Result<Root, Error> {
        let path = FieldPath::root().field(ROOT_KEY);
        let mut ome = match document.remove(ROOT_KEY) {
            Some(Value::Object(object)) => object,
            Some(other) => {
                return Err(Error::validation(
                    &path,
                    format!("expected an object, found {}", type_name(&other)),
                ))
            }
            None => return Err(Error::validation(&path, "missing field")),
        };
        let version = take_field::<Version>(&mut ome, "version", &path)?;
        let node = decode_node(Value::Object(ome), &path)?;
        Ok(Root {
            version: version.unwrap_or_else(|| Version::default_for(node.kind())),
            node,
        })
    }

    pub fn from_value(value: Value) -> Result<Root, Error> {
        match value {
            Value::Object(document) => Root::from_document(document),
            other => Err(Error::validation(
                FieldPath::root(),
                format!("expected an object, found {}", type_name(&other)),
            )),
        }
    }
}

/// Parses either a wrapped document or a bare node document. Referenced documents may be
/// stored either way.
pub fn decode(value: Value) -> Result<Root, Error> {
    match value {
        Value::Object(document) if document.contains_key(ROOT_KEY) => Root::from_document(document),
        value => decode_node(value, &FieldPath::root()).map(Root::new),
    }
}

/// Parses a node document and all of its children. Errors carry the path of the offending field
/// relative to `path`.
pub fn decode_node(value: Value, path: &FieldPath) -> Result<Node, Error> {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Err(Error::validation(
                path,
                format!("expected a node object, found {}", type_name(&other)),
            ))
        }
    };
    let kind = take_kind(&mut object, path)?;
    let id = take_field::<String>(&mut object, "id", path)?.unwrap_or_else(random_id);
    let name = take_field::<String>(&mut object, "name", path)?;
    let location = take_field::<PathRef>(&mut object, "path", path)?;
    let attributes = take_field::<Attributes>(&mut object, "attributes", path)?.unwrap_or_default();
    let children = take_field::<Vec<Value>>(&mut object, "nodes", path)?.unwrap_or_default();
    let nodes_path = path.field("nodes");

    let node = match kind {
        NodeKind::SingleScale => {
            if !children.is_empty() {
                return Err(Error::validation(
                    nodes_path,
                    "single scale nodes cannot have children",
                ));
            }
            Node::SingleScale(SingleScale {
                id,
                name,
                path: location,
                attributes,
            })
        }
        NodeKind::Multiscale => {
            let mut nodes = Vec::with_capacity(children.len());
            for (i, child) in children.into_iter().enumerate() {
                let child_path = nodes_path.index(i);
                match decode_node(child, &child_path)? {
                    Node::SingleScale(scale) => nodes.push(scale),
                    other => {
                        return Err(Error::validation(
                            child_path.field("type"),
                            format!(
                                "multiscale nodes can only contain singlescale nodes, found {}",
                                other.kind()
                            ),
                        ))
                    }
                }
            }
            Node::Multiscale(Multiscale {
                id,
                name,
                path: location,
                attributes,
                nodes,
            })
        }
        NodeKind::Collection => {
            let nodes = children
                .into_iter()
                .enumerate()
                .map(|(i, child)| decode_node(child, &nodes_path.index(i)))
                .collect::<Result<Vec<_>, _>>()?;
            Node::Collection(Collection {
                id,
                name,
                path: location,
                attributes,
                nodes,
            })
        }
    };
    Ok(node)
}

fn take_kind(object: &mut Document, path: &FieldPath) -> Result<NodeKind, Error> {
    let (key, value) = match object.remove("type") {
        Some(value) => ("type", value),
        None => match object.remove("kind") {
            Some(value) => ("kind", value),
            None => return Err(Error::validation(path.field("type"), "missing field")),
        },
    };
    match value {
        Value::String(kind) => kind.parse().map_err(|kind| Error::UnknownNodeKind {
            path: path.field(key).to_string(),
            kind,
        }),
        other => Err(Error::validation(
            path.field(key),
            format!("expected a string, found {}", type_name(&other)),
        )),
    }
}

/// Removes and parses an optional field. `null` counts as absent.
fn take_field<T>(object: &mut Document, key: &str, path: &FieldPath) -> Result<Option<T>, Error>
where
    T: DeserializeOwned,
{
    match object.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| Error::validation(path.field(key), e)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The canonical shape shared by all node kinds.
#[derive(Serialize)]
struct NodeDocument<'a, C: Serialize> {
    id: &'a str,

    #[serde(rename = "type")]
    kind: NodeKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a PathRef>,

    #[serde(skip_serializing_if = "no_attributes")]
    attributes: &'a Attributes,

    #[serde(skip_serializing_if = "no_children")]
    nodes: &'a [C],
}

fn no_attributes(attributes: &&Attributes) -> bool {
    attributes.is_empty()
}

fn no_children<C>(nodes: &&[C]) -> bool {
    nodes.is_empty()
}

impl Serialize for Collection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        NodeDocument {
            id: &self.id,
            kind: NodeKind::Collection,
            name: self.name.as_deref(),
            path: self.path.as_ref(),
            attributes: &self.attributes,
            nodes: self.nodes.as_slice(),
        }
        .serialize(serializer)
    }
}

impl Serialize for Multiscale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        NodeDocument {
            id: &self.id,
            kind: NodeKind::Multiscale,
            name: self.name.as_deref(),
            path: self.path.as_ref(),
            attributes: &self.attributes,
            nodes: self.nodes.as_slice(),
        }
        .serialize(serializer)
    }
}

impl Serialize for SingleScale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        NodeDocument::<SingleScale> {
            id: &self.id,
            kind: NodeKind::SingleScale,
            name: self.name.as_deref(),
            path: self.path.as_ref(),
            attributes: &self.attributes,
            nodes: &[],
        }
        .serialize(serializer)
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Collection(node) => node.serialize(serializer),
            Node::Multiscale(node) => node.serialize(serializer),
            Node::SingleScale(node) => node.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decode_node(value, &FieldPath::root()).map_err(D::Error::custom)
    }
}

macro_rules! deserialize_kind {
    ($node:ident, $variant:ident) => {
        impl<'de> Deserialize<'de> for $node {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                match Node::deserialize(deserializer)? {
                    Node::$variant(node) => Ok(node),
                    other => Err(D::Error::custom(format!(
                        "expected a {} node, found {}",
                        NodeKind::$variant,
                        other.kind()
                    ))),
                }
            }
        }
    };
}

deserialize_kind!(Collection, Collection);
deserialize_kind!(Multiscale, Multiscale);
deserialize_kind!(SingleScale, SingleScale);

impl Serialize for Root {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_document()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Root {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Root::from_value(Value::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}
