//! # semanticscholar
//!
//! A Rust client for the [Semantic Scholar](https://www.semanticscholar.org)
//! Academic Graph API.
//!
//! Provides:
//! - **Entities**: [`Paper`], [`Author`], [`Citation`], [`Journal`] and [`Tldr`],
//!   typed read-only views over the JSON the API returns, with key-based
//!   access to the raw payload through [`JsonEntity`]
//! - **Client**: async lookup, batch lookup and search, with
//!   [`PaginatedResults`] for multi-page result sets
//! - **Blocking client**: the same operations for synchronous code
//!   (`blocking` feature, on by default)
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> semanticscholar::Result<()> {
//! use semanticscholar::SemanticScholar;
//!
//! let sch = SemanticScholar::new()?;
//!
//! let paper = sch.get_paper("10.1093/mind/lix.236.433", &[]).await?;
//! println!("{} ({:?})", paper.title().unwrap_or_default(), paper.year());
//!
//! let mut results = sch.search_paper("turing", &["Mathematics"], &[]).await?;
//! println!("{} of {:?} results loaded", results.len(), results.total());
//! results.next_page().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Unknown ids fail with [`SemanticScholarError::ObjectNotFound`], rejected
//! parameters with [`SemanticScholarError::BadQueryParameters`]. Timeouts are
//! reported as the underlying [`reqwest::Error`]. Batch lookups never fail for
//! unknown ids; those positions are `None`.

pub mod authors;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod pagination;
pub mod papers;
mod parse;
pub mod requester;
pub mod types;

#[cfg(feature = "blocking")]
pub mod blocking;

// Re-export key types at the crate root.
pub use client::SemanticScholar;
pub use config::Config;
pub use entity::JsonEntity;
pub use error::{Result, SemanticScholarError};
pub use pagination::PaginatedResults;
pub use papers::PaperSearch;
pub use requester::ApiRequester;
pub use types::*;
