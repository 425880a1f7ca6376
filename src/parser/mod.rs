//! Parser layer
//! - traits.rs: FilenameParser trait definition
//! - types.rs: Common types (PackageFile)
//! - distribution.rs: Python distribution file name parser

pub mod distribution;
pub mod traits;
pub mod types;

pub use distribution::DistributionFilenameParser;
pub use traits::{FilenameParser, ParseError};
pub use types::PackageFile;
