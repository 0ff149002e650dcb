//! Font file classification and naming-table access.

pub mod classify;
pub mod reader;

pub use classify::Classification;
pub use reader::{FontMetadataReader, ReadFontsReader};
