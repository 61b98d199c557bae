//! Traversal of a metadata tree.
//!
//! A [`Tree`] flattens a node and everything nested in it (coordinate systems, axes,
//! transformations, references, path references and opaque attribute values) into an arena.
//! Elements are addressed by index, edges are kept per element in insertion order, and the walk
//! tracks visited elements by index. Extra edges added with [`Tree::link`] may alias elements or
//! form cycles; every element is still emitted exactly once.

use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::Value;

use crate::axis::Axis;
use crate::coordinate_system::CoordinateSystem;
use crate::coordinate_transformations::CoordinateTransformation;
use crate::error::{Error, UnknownReference};
use crate::node::{NodeKind, NodeRef};
use crate::options::{DuplicateIds, ValidationOptions};
use crate::path::PathRef;
use crate::reference::Ref;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Collection,
    Multiscale,
    SingleScale,
    CoordinateSystem,
    Axis,
    Transformation,
    Ref,
    Path,
    Opaque,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Collection => "collection",
            ElementKind::Multiscale => "multiscale",
            ElementKind::SingleScale => "singlescale",
            ElementKind::CoordinateSystem => "coordinate system",
            ElementKind::Axis => "axis",
            ElementKind::Transformation => "coordinate transformation",
            ElementKind::Ref => "reference",
            ElementKind::Path => "path reference",
            ElementKind::Opaque => "value",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NodeKind> for ElementKind {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Collection => ElementKind::Collection,
            NodeKind::Multiscale => ElementKind::Multiscale,
            NodeKind::SingleScale => ElementKind::SingleScale,
        }
    }
}

/// Anything reachable from a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Element<'a> {
    Node(NodeRef<'a>),
    CoordinateSystem(&'a CoordinateSystem),
    Axis(&'a Axis),
    Transformation(&'a CoordinateTransformation),
    Ref(&'a Ref),
    Path(&'a PathRef),
    /// An attribute value the model does not interpret.
    Opaque(&'a Value),
}

impl<'a> Element<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Node(node) => node.kind().into(),
            Element::CoordinateSystem(_) => ElementKind::CoordinateSystem,
            Element::Axis(_) => ElementKind::Axis,
            Element::Transformation(_) => ElementKind::Transformation,
            Element::Ref(_) => ElementKind::Ref,
            Element::Path(_) => ElementKind::Path,
            Element::Opaque(_) => ElementKind::Opaque,
        }
    }

    /// Nodes and coordinate systems carry ids, nothing else does.
    pub fn id(&self) -> Option<&'a str> {
        match self {
            Element::Node(node) => Some(node.id()),
            Element::CoordinateSystem(coordinate_system) => Some(&coordinate_system.id),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeRef<'a>> {
        match self {
            Element::Node(node) => Some(*node),
            _ => None,
        }
    }

    pub fn as_coordinate_system(&self) -> Option<&'a CoordinateSystem> {
        match self {
            Element::CoordinateSystem(coordinate_system) => Some(coordinate_system),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&'a Ref> {
        match self {
            Element::Ref(reference) => Some(reference),
            _ => None,
        }
    }
}

/// Elements by id, in the order their ids were first seen.
pub type IdIndex<'a> = IndexMap<&'a str, Element<'a>>;

#[derive(Clone, Debug)]
pub struct Tree<'a> {
    elements: Vec<Element<'a>>,
    children: Vec<Vec<usize>>,
}

impl<'a> Tree<'a> {
    /// Index of the root node.
    pub const ROOT: usize = 0;

    pub fn new(root: impl Into<NodeRef<'a>>) -> Self {
        let mut tree = Self {
            elements: Vec::new(),
            children: Vec::new(),
        };
        tree.add_node(root.into());
        tree
    }

    fn push(&mut self, element: Element<'a>) -> usize {
        self.elements.push(element);
        self.children.push(Vec::new());
        self.elements.len() - 1
    }

    fn push_child(&mut self, parent: usize, element: Element<'a>) -> usize {
        let index = self.push(element);
        self.children[parent].push(index);
        index
    }

    fn add_node(&mut self, node: NodeRef<'a>) -> usize {
        let index = self.push(Element::Node(node));
        if let Some(path) = node.path() {
            self.push_child(index, Element::Path(path));
        }
        let attributes = node.attributes();
        for coordinate_system in &attributes.coordinate_systems {
            let cs = self.push_child(index, Element::CoordinateSystem(coordinate_system));
            for axis in &coordinate_system.axes {
                self.push_child(cs, Element::Axis(axis));
            }
        }
        for transformation in &attributes.coordinate_transformations {
            let t = self.push_child(index, Element::Transformation(transformation));
            for reference in [transformation.input(), transformation.output()] {
                let r = self.push_child(t, Element::Ref(reference));
                if let Some(path) = &reference.path {
                    self.push_child(r, Element::Path(path));
                }
            }
        }
        for value in attributes.other.values() {
            self.push_child(index, Element::Opaque(value));
        }
        for child in node.children() {
            let c = self.add_node(child);
            self.children[index].push(c);
        }
        index
    }

    /// Adds an edge from `parent` to an already existing `child`. Returns `false` if either index
    /// is out of range.
    pub fn link(&mut self, parent: usize, child: usize) -> bool {
        if parent >= self.len() || child >= self.len() {
            return false;
        }
        self.children[parent].push(child);
        true
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Element<'a>> {
        self.elements.get(index).copied()
    }

    pub fn root(&self) -> NodeRef<'a> {
        match self.elements[Self::ROOT] {
            Element::Node(node) => node,
            _ => unreachable!("the root element is always a node"),
        }
    }

    /// Index of the first element carrying `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == Some(id))
    }

    /// Depth-first, pre-order walk from the root. A `max_depth` of `Some(0)` yields only the root.
    pub fn collect_all(&self, max_depth: Option<usize>) -> Vec<Element<'a>> {
        let mut visited = vec![false; self.len()];
        let mut elements = Vec::with_capacity(self.len());
        let mut stack = vec![(Self::ROOT, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            if visited[index] {
                continue;
            }
            visited[index] = true;
            elements.push(self.elements[index]);
            if max_depth.map_or(true, |max| depth < max) {
                stack.extend(
                    self.children[index]
                        .iter()
                        .rev()
                        .filter(|&&child| !visited[child])
                        .map(|&child| (child, depth + 1)),
                );
            }
        }
        elements
    }

    /// All id-bearing elements by id. If an id occurs more than once, the element visited last
    /// wins.
    pub fn collect_ids(&self) -> IdIndex<'a> {
        let mut ids = IdIndex::new();
        for element in self.collect_all(None) {
            if let Some(id) = element.id() {
                ids.insert(id, element);
            }
        }
        ids
    }

    pub fn collect_ids_with(&self, options: &ValidationOptions) -> Result<IdIndex<'a>, Error> {
        let mut ids = IdIndex::new();
        for element in self.collect_all(options.max_depth) {
            let Some(id) = element.id() else {
                continue;
            };
            match ids.entry(id) {
                Entry::Occupied(mut entry) => {
                    if options.duplicate_ids == DuplicateIds::Reject && *entry.get() != element {
                        return Err(Error::DuplicateId(id.to_string()));
                    }
                    entry.insert(element);
                }
                Entry::Vacant(entry) => {
                    entry.insert(element);
                }
            }
        }
        Ok(ids)
    }

    /// Every reference in the tree, in walk order.
    pub fn collect_refs(&self) -> Vec<&'a Ref> {
        self.collect_all(None)
            .iter()
            .filter_map(Element::as_reference)
            .collect()
    }

    /// Checks that every reference without a location points to an id of this tree. Reports one
    /// entry per offending reference.
    pub fn validate_references(&self) -> Result<(), Vec<UnknownReference>> {
        unresolved(&self.collect_all(None), &self.collect_ids())
    }

    /// Collects ids according to `options` and validates all local references against them.
    pub fn validate(&self, options: &ValidationOptions) -> Result<IdIndex<'a>, Error> {
        let ids = self.collect_ids_with(options)?;
        unresolved(&self.collect_all(options.max_depth), &ids)
            .map_err(Error::UnresolvedReferences)?;
        Ok(ids)
    }
}

fn unresolved(elements: &[Element], ids: &IdIndex) -> Result<(), Vec<UnknownReference>> {
    let unknown = elements
        .iter()
        .filter_map(Element::as_reference)
        .filter(|reference| reference.is_local())
        .filter_map(|reference| reference.resolve_local(ids).err())
        .collect::<Vec<_>>();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(unknown)
    }
}

pub fn collect_all<'a>(root: impl Into<NodeRef<'a>>, max_depth: Option<usize>) -> Vec<Element<'a>> {
    Tree::new(root).collect_all(max_depth)
}

pub fn collect_ids<'a>(root: impl Into<NodeRef<'a>>) -> IdIndex<'a> {
    Tree::new(root).collect_ids()
}

pub fn validate_references<'a>(root: impl Into<NodeRef<'a>>) -> Result<(), Vec<UnknownReference>> {
    Tree::new(root).validate_references()
}
