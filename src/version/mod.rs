//! Version layer: parsing, ordering, stability and the remote index
//!
//! # Modules
//!
//! - [`ordering`]: Structured version parsing and total ordering
//! - [`stability`]: Stable release filtering
//! - [`registry`]: Registry trait for fetching versions from a remote index
//! - [`registries`]: Concrete registry implementations (PyPI)
//! - [`error`]: Error types for registry and download operations

pub mod error;
pub mod ordering;
pub mod registries;
pub mod registry;
pub mod stability;
