//! Utility functions shared across wordhunt.
//!
//! ## Modules
//!
//! - [`app_data`] - Persistent defaults loaded from the user's config directory
//! - [`paths`] - Same-file identity, path relativization, document probing
//! - [`progress`] - Spinner that compiles away without the `progress` feature
//! - [`walk`] - Post-order directory walk shared by the indexer and live search
//! - [`words`] - Term normalizer (tokenizing, case folding, word expansion)
//!
//! ## Key Functions
//!
//! ```no_run
//! use wordhunt::utils::{extract_words, matches_all_words};
//!
//! // Expanded word set of a file name
//! let words = extract_words("Report-Final.txt", false, true);
//! assert!(words.contains("REPORT") && words.contains("TXT"));
//!
//! assert!(matches_all_words("Report-Final.txt", &["REPORT".to_string()], false, true));
//! ```

pub mod app_data;
pub mod paths;
pub mod progress;
pub mod walk;
pub mod words;

pub use app_data::*;
pub use paths::*;
pub use walk::*;
pub use words::*;
