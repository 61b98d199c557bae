//! OME-NGFF collection metadata stored in Zarr hierarchies and JSON files.
//!
//! Documents are read together with the [`Context`] they were found in, which is what relative
//! path references are resolved against.

pub mod context;
pub mod document;
pub mod error;
pub mod reference;
pub mod resolve;

pub use context::{
    Context,
    Located,
};
pub use document::{
    deserialize,
    from_json,
    from_json_with,
    load_json,
    load_json_with,
    read,
    read_array,
    read_collection,
    read_group,
    read_multiscale,
    read_single_scale,
    save_json,
    write,
    write_array,
    write_group,
    LoadOptions,
};
pub use error::{
    Error,
    Result,
};
pub use reference::resolve_external;
pub use resolve::Resolve;
