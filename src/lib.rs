//! Hierarchical OME-NGFF collection metadata.
//!
//! - [`ome_ngff`]: the metadata model, its canonical documents and reference validation
//! - [`ome_zarr`]: resolution of path references and loading and storing of documents
//! - [`zarr_store`]: the filesystem Zarr hierarchy documents are stored in

pub mod report;

pub use ome_ngff;
pub use ome_zarr;
pub use zarr_store;

pub use report::Report;
