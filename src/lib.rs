//! # wordhunt - find files by the words they contain
//!
//! wordhunt locates files under a directory whose name, relative path or
//! text content contains every requested word. Words are compared after
//! case folding and expansion (camel-case pieces and `-`/`_`/`.` pieces count
//! as words of their own).
//!
//! ## Architecture
//!
//! - [`matcher`] - Tri-state matcher chain (path/name, then content)
//! - [`search`] - Live tree walk or prebuilt-index scan
//! - [`index`] - Flat-file index: format, builder, reader, statistics
//! - [`output`] - Sinks for matches and status lines
//! - [`utils`] - Word extraction, path helpers, tree walk, persistent config
//!
//! ## Quick Start
//!
//! ```no_run
//! use wordhunt::matcher::{SearchConfig, SearchTerms};
//! use wordhunt::output::MemorySink;
//! use std::path::Path;
//!
//! let config = SearchConfig::new(Path::new("/path/to/docs")).unwrap();
//! let terms = SearchTerms::builder()
//!     .file(["report"])
//!     .content(["quarterly revenue"])
//!     .build();
//!
//! let mut sink = MemorySink::default();
//! wordhunt::search::find(&config, &terms, &mut sink).unwrap();
//! for path in &sink.found {
//!     println!("{}", path.display());
//! }
//! ```

pub mod error;
pub mod index;
pub mod matcher;
pub mod output;
pub mod search;
pub mod utils;

pub use error::{Result, SearchError};
