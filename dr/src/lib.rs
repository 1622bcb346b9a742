//! DocReader - topic-addressed documentation reader
//!
//! Resolves a topic such as `express/middleware` to a Markdown document in a
//! content store and prints it. Every topic may have an advanced companion
//! document that is only shown on request.
//!
//! # Content layout
//!
//! ```text
//! docs/
//! └── express/
//!     ├── middleware.md        # basic document: `dr express/middleware`
//!     └── middleware.adv.md    # advanced companion: `dr express/middleware.adv`
//! ```
//!
//! The crate's own `docs/` tree is compiled into the binary and used unless
//! a content root directory is configured.
//!
//! # Example
//!
//! ```ignore
//! use docreader::{FsStore, Resolution, Topic, resolve};
//!
//! let topic = Topic::parse("express/middleware")?.expect("non-empty topic");
//! match resolve(&topic, &FsStore::new("docs"))? {
//!     Resolution::Found { path, has_advanced } => { /* ... */ }
//!     Resolution::FoundAdvanced { path } => { /* ... */ }
//!     Resolution::NotFound => { /* ... */ }
//! }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod embedded;
pub mod error;
pub mod render;
mod resolver;
pub mod store;
pub mod topic;

pub use app::{EXIT_OK, EXIT_RUNTIME_FAILURE, run};
pub use config::Config;
pub use error::DocError;
pub use render::{DocumentReport, Renderer};
pub use resolver::{
    CANDIDATE_SUFFIXES, Candidate, DocKind, Resolution, candidates, is_advanced_topic, list_topics, read_document,
    resolve,
};
pub use store::{BundledStore, ContentStore, FsStore};
pub use topic::{ADVANCED_MARKER, Topic};
