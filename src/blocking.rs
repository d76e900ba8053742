//! Synchronous wrapper around the async [`SemanticScholar`](crate::SemanticScholar) client.
//!
//! Every call blocks the current thread until the response arrives or the
//! timeout expires. Do not use from inside an async runtime.
//!
//! ```no_run
//! # fn example() -> semanticscholar::Result<()> {
//! use semanticscholar::blocking::SemanticScholar;
//!
//! let sch = SemanticScholar::new()?;
//! let results = sch.search_paper("turing", &[], &[])?;
//! for paper in results {
//!     println!("{}", paper?.title().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::entity::JsonEntity;
use crate::error::Result;
use crate::papers::PaperSearch;
use crate::types::{Author, Citation, Paper};
use serde_json::{Map, Value};
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Blocking Semantic Scholar client.
///
/// Clones share the runtime but carry their own settings.
#[derive(Debug, Clone)]
pub struct SemanticScholar {
    client: crate::SemanticScholar,
    runtime: Arc<Runtime>,
}

impl SemanticScholar {
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let client = crate::SemanticScholar::with_config(config)?;
        let runtime = Runtime::new()?;
        Ok(Self {
            client,
            runtime: Arc::new(runtime),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::with_config(Config::from_env())
    }

    pub fn timeout(&self) -> Duration {
        self.client.timeout()
    }

    /// Change the timeout for every later request made through this client.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.client.set_timeout(timeout);
    }

    pub fn get_paper(&self, paper_id: &str, fields: &[&str]) -> Result<Paper> {
        self.runtime.block_on(self.client.get_paper(paper_id, fields))
    }

    pub fn get_paper_with_options(
        &self,
        paper_id: &str,
        include_unknown_refs: bool,
        fields: &[&str],
    ) -> Result<Paper> {
        self.runtime.block_on(
            self.client
                .get_paper_with_options(paper_id, include_unknown_refs, fields),
        )
    }

    /// Aligned with `paper_ids`; unknown ids yield `None`.
    pub fn get_papers(&self, paper_ids: &[&str], fields: &[&str]) -> Result<Vec<Option<Paper>>> {
        self.runtime.block_on(self.client.get_papers(paper_ids, fields))
    }

    pub fn search_paper(
        &self,
        query: &str,
        fields_of_study: &[&str],
        fields: &[&str],
    ) -> Result<PaginatedResults<Paper>> {
        let inner = self
            .runtime
            .block_on(self.client.search_paper(query, fields_of_study, fields))?;
        Ok(self.wrap(inner))
    }

    pub fn search_paper_with_options(&self, search: &PaperSearch) -> Result<PaginatedResults<Paper>> {
        let inner = self
            .runtime
            .block_on(self.client.search_paper_with_options(search))?;
        Ok(self.wrap(inner))
    }

    pub fn get_paper_citations(
        &self,
        paper_id: &str,
        fields: &[&str],
        limit: u32,
    ) -> Result<PaginatedResults<Citation>> {
        let inner = self
            .runtime
            .block_on(self.client.get_paper_citations(paper_id, fields, limit))?;
        Ok(self.wrap(inner))
    }

    pub fn get_author(&self, author_id: &str, fields: &[&str]) -> Result<Author> {
        self.runtime.block_on(self.client.get_author(author_id, fields))
    }

    /// Aligned with `author_ids`; unknown ids yield `None`.
    pub fn get_authors(&self, author_ids: &[&str], fields: &[&str]) -> Result<Vec<Option<Author>>> {
        self.runtime
            .block_on(self.client.get_authors(author_ids, fields))
    }

    pub fn search_author(&self, query: &str, fields: &[&str]) -> Result<PaginatedResults<Author>> {
        let inner = self
            .runtime
            .block_on(self.client.search_author(query, fields))?;
        Ok(self.wrap(inner))
    }

    pub fn search_author_with_limit(
        &self,
        query: &str,
        fields: &[&str],
        limit: u32,
    ) -> Result<PaginatedResults<Author>> {
        let inner = self
            .runtime
            .block_on(self.client.search_author_with_limit(query, fields, limit))?;
        Ok(self.wrap(inner))
    }

    /// Raw paper payload.
    #[deprecated(since = "0.3.0", note = "use `get_paper` instead")]
    #[allow(deprecated)]
    pub fn paper(&self, paper_id: &str, include_unknown_refs: bool) -> Result<Map<String, Value>> {
        self.runtime
            .block_on(self.client.paper(paper_id, include_unknown_refs))
    }

    /// Raw author payload.
    #[deprecated(since = "0.3.0", note = "use `get_author` instead")]
    #[allow(deprecated)]
    pub fn author(&self, author_id: &str) -> Result<Map<String, Value>> {
        self.runtime.block_on(self.client.author(author_id))
    }

    fn wrap<T>(&self, inner: crate::PaginatedResults<T>) -> PaginatedResults<T> {
        PaginatedResults {
            inner,
            runtime: Arc::clone(&self.runtime),
        }
    }
}

/// Blocking view of [`crate::PaginatedResults`].
///
/// Dereferences to the async container for length, indexing and cursors.
/// Consuming it with `for` walks every result, fetching pages as needed.
#[derive(Debug)]
pub struct PaginatedResults<T> {
    inner: crate::PaginatedResults<T>,
    runtime: Arc<Runtime>,
}

impl<T: JsonEntity> PaginatedResults<T> {
    /// Fetch the next page and append its items, returning just the new ones.
    pub fn next_page(&mut self) -> Result<&[T]> {
        self.runtime.block_on(self.inner.next_page())
    }
}

impl<T> Deref for PaginatedResults<T> {
    type Target = crate::PaginatedResults<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: JsonEntity> IntoIterator for PaginatedResults<T> {
    type Item = Result<T>;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let buffer = self.inner.take_items().into_iter();
        IntoIter {
            results: self,
            buffer,
            failed: false,
        }
    }
}

/// Iterator over every result of a query. Ends after the last page, or
/// after yielding the first request error.
pub struct IntoIter<T> {
    results: PaginatedResults<T>,
    buffer: std::vec::IntoIter<T>,
    failed: bool,
}

impl<T: JsonEntity> Iterator for IntoIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(Ok(item));
            }
            if self.failed || !self.results.has_next_page() {
                return None;
            }
            if let Err(e) = self.results.next_page() {
                self.failed = true;
                return Some(Err(e));
            }
            self.buffer = self.results.inner.take_items().into_iter();
        }
    }
}
