//! Growable client-side view over a paginated list endpoint.

use crate::entity::JsonEntity;
use crate::error::{Result, SemanticScholarError};
use crate::parse::parse_page;
use crate::requester::ApiRequester;
use futures::Stream;
use serde_json::{Map, Value};
use std::ops::Index;

/// Results of one search query, fetched in pages of `limit` items.
///
/// The first page is loaded when the query is issued. [`next_page`](Self::next_page)
/// appends the following page in place; [`into_stream`](Self::into_stream)
/// walks every remaining result lazily.
///
/// Length, indexing and iteration only cover the items fetched so far, not
/// [`total`](Self::total).
#[derive(Debug)]
pub struct PaginatedResults<T> {
    requester: ApiRequester,
    url: String,
    params: Vec<(String, String)>,
    fields: Vec<String>,
    limit: u32,
    pub(crate) items: Vec<T>,
    offset: u64,
    next: Option<u64>,
    total: Option<u64>,
}

impl<T: JsonEntity> PaginatedResults<T> {
    /// Issue the query and load its first page.
    pub(crate) async fn fetch(
        requester: ApiRequester,
        url: String,
        params: Vec<(String, String)>,
        fields: &[&str],
        limit: u32,
    ) -> Result<Self> {
        let mut results = Self {
            requester,
            url,
            params,
            fields: fields.iter().map(|f| f.to_string()).collect(),
            limit,
            items: Vec::new(),
            offset: 0,
            next: None,
            total: None,
        };
        results.fetch_page(0).await?;
        Ok(results)
    }

    /// Fetch the next page and append its items, returning just the new ones.
    ///
    /// Fails with [`SemanticScholarError::BadQueryParameters`] once every page
    /// has been fetched. On any failure the already fetched items are left as they were.
    pub async fn next_page(&mut self) -> Result<&[T]> {
        let offset = self.next.ok_or_else(|| {
            SemanticScholarError::BadQueryParameters(
                "No more pages: all results for this query have been fetched".to_string(),
            )
        })?;
        let start = self.items.len();
        self.fetch_page(offset).await?;
        Ok(&self.items[start..])
    }

    async fn fetch_page(&mut self, offset: u64) -> Result<()> {
        let mut params = self.params.clone();
        params.push(("offset".to_string(), offset.to_string()));
        params.push(("limit".to_string(), self.limit.to_string()));
        let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();

        let body = self.requester.get_data(&self.url, &params, &fields).await?;
        let page = parse_page::<T>(body)?;
        tracing::debug!(
            offset = page.offset,
            next = ?page.next,
            total = ?page.total,
            fetched = page.items.len(),
            "page loaded"
        );

        self.items.extend(page.items);
        self.offset = page.offset;
        self.next = page.next;
        if page.total.is_some() {
            self.total = page.total;
        }
        Ok(())
    }

    /// Walk every result of the query, fetching further pages on demand.
    ///
    /// Yields the items already loaded first. The stream ends once the last
    /// page has been consumed. A failed page request is yielded once as an
    /// error, after which the stream ends.
    ///
    /// ```no_run
    /// # async fn example() -> semanticscholar::Result<()> {
    /// use futures::TryStreamExt;
    ///
    /// let sch = semanticscholar::SemanticScholar::new()?;
    /// let results = sch.search_paper("turing", &[], &[]).await?;
    /// let titles: Vec<String> = results
    ///     .into_stream()
    ///     .map_ok(|paper| paper.title().unwrap_or_default().to_string())
    ///     .try_collect()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_stream(mut self) -> impl Stream<Item = Result<T>> {
        let buffer = self.take_items().into_iter();
        futures::stream::try_unfold((self, buffer), |(mut results, mut buffer)| async move {
            loop {
                if let Some(item) = buffer.next() {
                    return Ok(Some((item, (results, buffer))));
                }
                if !results.has_next_page() {
                    return Ok(None);
                }
                if let Err(e) = results.next_page().await {
                    return Err(e);
                }
                buffer = results.take_items().into_iter();
            }
        })
    }
}

impl<T> PaginatedResults<T> {
    /// Items fetched so far, across all loaded pages.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Offset of the most recently loaded page.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Offset of the next page, or `None` when the last page has been loaded.
    pub fn next_offset(&self) -> Option<u64> {
        self.next
    }

    pub fn has_next_page(&self) -> bool {
        self.next.is_some()
    }

    /// Total number of matches reported by the server. Endpoints that do not
    /// report a total leave this `None`.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Page size used for every request of this query.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Move the loaded items out, leaving the cursors untouched.
    pub(crate) fn take_items(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }
}

impl<T: JsonEntity> PaginatedResults<T> {
    /// Raw payloads of the items fetched so far.
    pub fn raw_data(&self) -> Vec<&Map<String, Value>> {
        self.items.iter().map(JsonEntity::raw_data).collect()
    }
}

impl<T> Index<usize> for PaginatedResults<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a PaginatedResults<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
