//! OME-NGFF collection metadata
//! https://ngff.openmicroscopy.org/rfc/8/
//!
//! A tree of collection, multiscale and single scale nodes, the coordinate systems and
//! transformations attached to them, and the symbolic references that link them.

pub mod attributes;
pub mod axis;
pub mod coordinate_system;
pub mod coordinate_transformations;
pub mod document;
pub mod error;
pub mod node;
pub mod options;
pub mod path;
pub mod reference;
pub mod util;
pub mod validation;
pub mod walk;

pub use attributes::Attributes;
pub use axis::{
    Axis,
    AxisType,
};
pub use coordinate_system::CoordinateSystem;
pub use coordinate_transformations::{
    CoordinateTransformation,
    Identity,
    Scale,
    Translation,
};
pub use document::{
    decode,
    decode_node,
    Document,
    FieldPath,
    Root,
    Version,
    ROOT_KEY,
};
pub use error::{
    Error,
    UnknownReference,
};
pub use node::{
    Collection,
    Multiscale,
    Node,
    NodeKind,
    NodeRef,
    SingleScale,
};
pub use options::{
    DuplicateIds,
    ValidationOptions,
};
pub use path::{
    ContextKind,
    FileLocation,
    PathRef,
    StoreLocation,
};
pub use reference::Ref;
pub use walk::{
    collect_all,
    collect_ids,
    validate_references,
    Element,
    ElementKind,
    IdIndex,
    Tree,
};
