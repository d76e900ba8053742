//! Paper lookup, batch and search endpoints.

use crate::client::{check_limit, fields_or, SemanticScholar};
use crate::entity::JsonEntity;
use crate::error::Result;
use crate::pagination::PaginatedResults;
use crate::parse::parse_batch;
use crate::types::{Citation, Paper};
use serde_json::{Map, Value};

/// Largest page the paper search endpoint serves.
pub const MAX_PAPER_SEARCH_LIMIT: u32 = 100;

/// Largest page the citations endpoint serves.
pub const MAX_CITATIONS_LIMIT: u32 = 1000;

/// Options for [`SemanticScholar::search_paper_with_options`].
///
/// ```
/// use semanticscholar::PaperSearch;
///
/// let search = PaperSearch::new("turing")
///     .year("1936-1950")
///     .fields_of_study(&["Mathematics"])
///     .limit(20);
/// ```
#[derive(Debug, Clone)]
pub struct PaperSearch {
    query: String,
    year: Option<String>,
    fields_of_study: Vec<String>,
    fields: Vec<String>,
    limit: u32,
}

impl PaperSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            year: None,
            fields_of_study: Vec::new(),
            fields: Vec::new(),
            limit: MAX_PAPER_SEARCH_LIMIT,
        }
    }

    /// Restrict to a publication year or range (`2019`, `2016-2020`, `2010-`, `-2015`).
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Restrict to papers tagged with any of these fields of study.
    pub fn fields_of_study(mut self, fields_of_study: &[&str]) -> Self {
        self.fields_of_study = fields_of_study.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Paper fields to return. Empty means [`Paper::SEARCH_FIELDS`].
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Page size, 1 to 100.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl SemanticScholar {
    /// Look up a paper.
    ///
    /// `paper_id` may be an S2 paper id, `CorpusId:<id>`, a DOI, an arXiv id,
    /// a MAG/ACL/PMID/PMCID id, or a supported URL. Empty `fields` requests
    /// [`Paper::FIELDS`].
    ///
    /// Fails with [`ObjectNotFound`](crate::SemanticScholarError::ObjectNotFound) for unknown ids.
    pub async fn get_paper(&self, paper_id: &str, fields: &[&str]) -> Result<Paper> {
        self.get_paper_with_options(paper_id, false, fields).await
    }

    /// Look up a paper, optionally keeping references the API could not resolve.
    pub async fn get_paper_with_options(
        &self,
        paper_id: &str,
        include_unknown_refs: bool,
        fields: &[&str],
    ) -> Result<Paper> {
        let url = self.object_endpoint("paper", paper_id, None)?;
        let mut params = Vec::new();
        if include_unknown_refs {
            params.push((
                "include_unknown_references".to_string(),
                "true".to_string(),
            ));
        }

        let body = self
            .requester
            .get_data(&url, &params, fields_or(fields, Paper::FIELDS))
            .await?;
        Paper::from_json(body)
    }

    /// Look up many papers with a single request.
    ///
    /// The result is aligned with `paper_ids`: an id the API does not know
    /// yields `None` at its position instead of failing the whole batch.
    /// Empty `fields` requests [`Paper::SEARCH_FIELDS`].
    pub async fn get_papers(&self, paper_ids: &[&str], fields: &[&str]) -> Result<Vec<Option<Paper>>> {
        let url = self.endpoint("/paper/batch");
        let body = serde_json::json!({ "ids": paper_ids });

        let response = self
            .requester
            .post_data(&url, &[], fields_or(fields, Paper::SEARCH_FIELDS), &body)
            .await?;
        parse_batch(response)
    }

    /// Search papers by keyword, optionally restricted to fields of study.
    ///
    /// The first page (100 papers) is loaded before returning.
    pub async fn search_paper(
        &self,
        query: &str,
        fields_of_study: &[&str],
        fields: &[&str],
    ) -> Result<PaginatedResults<Paper>> {
        let search = PaperSearch::new(query)
            .fields_of_study(fields_of_study)
            .fields(fields);
        self.search_paper_with_options(&search).await
    }

    pub async fn search_paper_with_options(
        &self,
        search: &PaperSearch,
    ) -> Result<PaginatedResults<Paper>> {
        check_limit(search.limit, MAX_PAPER_SEARCH_LIMIT)?;

        let mut params = vec![("query".to_string(), search.query.clone())];
        if let Some(year) = &search.year {
            params.push(("year".to_string(), year.clone()));
        }
        if !search.fields_of_study.is_empty() {
            params.push(("fieldsOfStudy".to_string(), search.fields_of_study.join(",")));
        }

        let fields: Vec<&str> = search.fields.iter().map(String::as_str).collect();
        PaginatedResults::fetch(
            self.requester.clone(),
            self.endpoint("/paper/search"),
            params,
            fields_or(&fields, Paper::SEARCH_FIELDS),
            search.limit,
        )
        .await
    }

    /// Papers citing `paper_id`, with their influence flag.
    ///
    /// Empty `fields` requests [`Citation::FIELDS`]. This endpoint reports no
    /// total, so [`PaginatedResults::total`] stays `None`.
    pub async fn get_paper_citations(
        &self,
        paper_id: &str,
        fields: &[&str],
        limit: u32,
    ) -> Result<PaginatedResults<Citation>> {
        check_limit(limit, MAX_CITATIONS_LIMIT)?;

        PaginatedResults::fetch(
            self.requester.clone(),
            self.object_endpoint("paper", paper_id, Some("citations"))?,
            Vec::new(),
            fields_or(fields, Citation::FIELDS),
            limit,
        )
        .await
    }

    /// Raw paper payload.
    #[deprecated(since = "0.3.0", note = "use `get_paper` instead")]
    pub async fn paper(&self, paper_id: &str, include_unknown_refs: bool) -> Result<Map<String, Value>> {
        let paper = self
            .get_paper_with_options(paper_id, include_unknown_refs, &[])
            .await?;
        Ok(paper.raw_data().clone())
    }
}
