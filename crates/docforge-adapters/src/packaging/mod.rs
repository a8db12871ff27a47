//! Project packaging adapters: ignore-aware tree listing and zip output.

mod archive;
mod tree;

pub use archive::ZipArchiver;
pub use tree::IgnoreSourceTree;
