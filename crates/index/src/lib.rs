//! # Docsearch Index
//!
//! Loading and querying of static documentation search indexes, the
//! `search_index.js` blobs generated alongside API reference sites.
//!
//! ## Pipeline
//!
//! ```text
//! search_index.js / .json
//!     │
//!     ├──> Source decoding (JS assignment stripped, records validated)
//!     │      └─> DocEntry[]
//!     │
//!     ├──> IndexStore (immutable, load order preserved)
//!     │      └─> search / query / by_location / pages / stats
//!     │
//!     └──> SharedIndex (atomic whole-collection reload)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use docsearch_index::{Category, IndexStore, SearchQuery};
//!
//! let store = IndexStore::load(
//!     r##"var documenterSearchIndex = {"docs": [
//!         {"location": "", "page": "Home", "title": "Home",
//!          "text": "Documentation for X", "category": "page"},
//!         {"location": "#X.run", "page": "Home", "title": "X.run",
//!          "text": "run(x)\n\nRun the documented thing.", "category": "function"}
//!     ]}"##,
//! )
//! .unwrap();
//!
//! assert_eq!(store.search("documentation").len(), 1);
//!
//! let functions = SearchQuery::new("run").category(Category::Function);
//! for entry in store.query(&functions) {
//!     println!("{} {}: {}", entry.category, entry.title, entry.summary());
//! }
//! ```

mod error;
mod shared;
mod source;
mod store;
mod types;

pub use error::{FormatError, IndexError, Result};
pub use shared::SharedIndex;
pub use source::{parse_document, parse_value};
pub use store::{IndexStats, IndexStore, SearchQuery};
pub use types::{Category, DocEntry, UnknownCategory};
