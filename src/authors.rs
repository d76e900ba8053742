//! Author lookup, batch and search endpoints.

use crate::client::{check_limit, fields_or, SemanticScholar};
use crate::entity::JsonEntity;
use crate::error::Result;
use crate::pagination::PaginatedResults;
use crate::parse::parse_batch;
use crate::types::Author;
use serde_json::{Map, Value};

/// Largest page the author search endpoint serves.
pub const MAX_AUTHOR_SEARCH_LIMIT: u32 = 1000;

impl SemanticScholar {
    /// Look up an author by S2 author id.
    ///
    /// Empty `fields` requests [`Author::FIELDS`]. Fails with
    /// [`ObjectNotFound`](crate::SemanticScholarError::ObjectNotFound) for unknown ids.
    pub async fn get_author(&self, author_id: &str, fields: &[&str]) -> Result<Author> {
        let url = self.object_endpoint("author", author_id, None)?;
        let body = self
            .requester
            .get_data(&url, &[], fields_or(fields, Author::FIELDS))
            .await?;
        Author::from_json(body)
    }

    /// Look up many authors with a single request.
    ///
    /// The result is aligned with `author_ids`; unknown ids yield `None`.
    /// Empty `fields` requests [`Author::SEARCH_FIELDS`].
    pub async fn get_authors(&self, author_ids: &[&str], fields: &[&str]) -> Result<Vec<Option<Author>>> {
        let url = self.endpoint("/author/batch");
        let body = serde_json::json!({ "ids": author_ids });

        let response = self
            .requester
            .post_data(&url, &[], fields_or(fields, Author::SEARCH_FIELDS), &body)
            .await?;
        parse_batch(response)
    }

    /// Search authors by name, 1000 per page.
    pub async fn search_author(&self, query: &str, fields: &[&str]) -> Result<PaginatedResults<Author>> {
        self.search_author_with_limit(query, fields, MAX_AUTHOR_SEARCH_LIMIT)
            .await
    }

    pub async fn search_author_with_limit(
        &self,
        query: &str,
        fields: &[&str],
        limit: u32,
    ) -> Result<PaginatedResults<Author>> {
        check_limit(limit, MAX_AUTHOR_SEARCH_LIMIT)?;

        PaginatedResults::fetch(
            self.requester.clone(),
            self.endpoint("/author/search"),
            vec![("query".to_string(), query.to_string())],
            fields_or(fields, Author::SEARCH_FIELDS),
            limit,
        )
        .await
    }

    /// Raw author payload.
    #[deprecated(since = "0.3.0", note = "use `get_author` instead")]
    pub async fn author(&self, author_id: &str) -> Result<Map<String, Value>> {
        let author = self.get_author(author_id, &[]).await?;
        Ok(author.raw_data().clone())
    }
}
