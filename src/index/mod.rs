pub mod build;
pub mod detect;
pub mod reader;
pub mod stats;
pub mod types;
pub mod writer;

pub use build::{FileIndexer, IndexSummary};
pub use detect::{FileTypeDetector, TextFileTypeDetector};
pub use reader::IndexReader;
pub use types::*;
pub use writer::IndexWriter;
