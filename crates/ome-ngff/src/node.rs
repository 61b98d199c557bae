use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::path::PathRef;
use crate::util::random_id;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Collection,
    Multiscale,
    #[serde(rename = "singlescale")]
    SingleScale,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Collection => "collection",
            NodeKind::Multiscale => "multiscale",
            NodeKind::SingleScale => "singlescale",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collection" => Ok(NodeKind::Collection),
            "multiscale" => Ok(NodeKind::Multiscale),
            "singlescale" => Ok(NodeKind::SingleScale),
            other => Err(other.to_string()),
        }
    }
}

/// A group of nodes of any kind, e.g. several images of one experiment.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection {
    pub id: String,
    pub name: Option<String>,
    pub path: Option<PathRef>,
    pub attributes: Attributes,
    pub nodes: Vec<Node>,
}

/// An image pyramid. Its children are the individual resolution levels.
#[derive(Clone, Debug, PartialEq)]
pub struct Multiscale {
    pub id: String,
    pub name: Option<String>,
    pub path: Option<PathRef>,
    pub attributes: Attributes,
    pub nodes: Vec<SingleScale>,
}

/// A single array. Single scales are leaves and never have children.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleScale {
    pub id: String,
    pub name: Option<String>,
    pub path: Option<PathRef>,
    pub attributes: Attributes,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            id: random_id(),
            name: None,
            path: None,
            attributes: Attributes::default(),
            nodes: Vec::new(),
        }
    }
}

impl Default for Multiscale {
    fn default() -> Self {
        Self {
            id: random_id(),
            name: None,
            path: None,
            attributes: Attributes::default(),
            nodes: Vec::new(),
        }
    }
}

impl Default for SingleScale {
    fn default() -> Self {
        Self {
            id: random_id(),
            name: None,
            path: None,
            attributes: Attributes::default(),
        }
    }
}

/// Any node of the metadata tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Collection(Collection),
    Multiscale(Multiscale),
    SingleScale(SingleScale),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.as_node_ref().kind()
    }

    pub fn id(&self) -> &str {
        self.as_node_ref().id()
    }

    pub fn name(&self) -> Option<&str> {
        self.as_node_ref().name()
    }

    pub fn path(&self) -> Option<&PathRef> {
        self.as_node_ref().path()
    }

    pub fn attributes(&self) -> &Attributes {
        self.as_node_ref().attributes()
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            Node::Collection(node) => &mut node.attributes,
            Node::Multiscale(node) => &mut node.attributes,
            Node::SingleScale(node) => &mut node.attributes,
        }
    }

    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Collection(node) => NodeRef::Collection(node),
            Node::Multiscale(node) => NodeRef::Multiscale(node),
            Node::SingleScale(node) => NodeRef::SingleScale(node),
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Node::Collection(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_multiscale(&self) -> Option<&Multiscale> {
        match self {
            Node::Multiscale(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_single_scale(&self) -> Option<&SingleScale> {
        match self {
            Node::SingleScale(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_multiscale_mut(&mut self) -> Option<&mut Multiscale> {
        match self {
            Node::Multiscale(node) => Some(node),
            _ => None,
        }
    }
}

impl From<Collection> for Node {
    fn from(node: Collection) -> Self {
        Node::Collection(node)
    }
}

impl From<Multiscale> for Node {
    fn from(node: Multiscale) -> Self {
        Node::Multiscale(node)
    }
}

impl From<SingleScale> for Node {
    fn from(node: SingleScale) -> Self {
        Node::SingleScale(node)
    }
}

/// A borrowed view of any node, regardless of whether it is stored as a [`Node`] or as the child
/// of a [`Multiscale`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeRef<'a> {
    Collection(&'a Collection),
    Multiscale(&'a Multiscale),
    SingleScale(&'a SingleScale),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Collection(_) => NodeKind::Collection,
            NodeRef::Multiscale(_) => NodeKind::Multiscale,
            NodeRef::SingleScale(_) => NodeKind::SingleScale,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            NodeRef::Collection(node) => &node.id,
            NodeRef::Multiscale(node) => &node.id,
            NodeRef::SingleScale(node) => &node.id,
        }
    }

    pub fn name(&self) -> Option<&'a str> {
        match self {
            NodeRef::Collection(node) => node.name.as_deref(),
            NodeRef::Multiscale(node) => node.name.as_deref(),
            NodeRef::SingleScale(node) => node.name.as_deref(),
        }
    }

    pub fn path(&self) -> Option<&'a PathRef> {
        match self {
            NodeRef::Collection(node) => node.path.as_ref(),
            NodeRef::Multiscale(node) => node.path.as_ref(),
            NodeRef::SingleScale(node) => node.path.as_ref(),
        }
    }

    pub fn attributes(&self) -> &'a Attributes {
        match self {
            NodeRef::Collection(node) => &node.attributes,
            NodeRef::Multiscale(node) => &node.attributes,
            NodeRef::SingleScale(node) => &node.attributes,
        }
    }

    /// The children in insertion order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match self {
            NodeRef::Collection(node) => node.nodes.iter().map(Node::as_node_ref).collect(),
            NodeRef::Multiscale(node) => node.nodes.iter().map(NodeRef::SingleScale).collect(),
            NodeRef::SingleScale(_) => Vec::new(),
        }
    }
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        node.as_node_ref()
    }
}

impl<'a> From<&'a Collection> for NodeRef<'a> {
    fn from(node: &'a Collection) -> Self {
        NodeRef::Collection(node)
    }
}

impl<'a> From<&'a Multiscale> for NodeRef<'a> {
    fn from(node: &'a Multiscale) -> Self {
        NodeRef::Multiscale(node)
    }
}

impl<'a> From<&'a SingleScale> for NodeRef<'a> {
    fn from(node: &'a SingleScale) -> Self {
        NodeRef::SingleScale(node)
    }
}
