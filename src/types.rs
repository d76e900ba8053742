//! Public entity types for the Semantic Scholar client.
//!
//! Every entity is a read-only view built once from a JSON payload. Typed
//! accessors cover the documented fields; [`JsonEntity`] gives key-based
//! access to the raw payload. Identifier maps, embeddings, field-of-study
//! tags, open-access links and venue records are passed through as
//! [`serde_json::Value`].

use crate::entity::JsonEntity;
use crate::error::Result;
use crate::parse;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::Index;

static NULL: Value = Value::Null;

/// A paper from the Academic Graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    pub(crate) raw: Map<String, Value>,
    pub(crate) paper_id: Option<String>,
    pub(crate) corpus_id: Option<u64>,
    pub(crate) external_ids: Option<Value>,
    pub(crate) url: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) venue: Option<String>,
    pub(crate) year: Option<u16>,
    pub(crate) publication_date: Option<NaiveDate>,
    pub(crate) publication_types: Option<Vec<String>>,
    pub(crate) publication_venue: Option<Value>,
    pub(crate) abstract_text: Option<String>,
    pub(crate) embedding: Option<Value>,
    pub(crate) fields_of_study: Option<Vec<String>>,
    pub(crate) s2_fields_of_study: Option<Value>,
    pub(crate) citation_count: Option<u64>,
    pub(crate) reference_count: Option<u64>,
    pub(crate) influential_citation_count: Option<u64>,
    pub(crate) is_open_access: Option<bool>,
    pub(crate) open_access_pdf: Option<Value>,
    pub(crate) journal: Option<Journal>,
    pub(crate) tldr: Option<Tldr>,
    pub(crate) authors: Vec<Author>,
    pub(crate) citations: Vec<Citation>,
    pub(crate) references: Vec<Citation>,
}

impl Paper {
    /// Fields requested by a single paper lookup when none are given.
    pub const FIELDS: &'static [&'static str] = &[
        "abstract",
        "authors",
        "citationCount",
        "citations",
        "corpusId",
        "embedding",
        "externalIds",
        "fieldsOfStudy",
        "influentialCitationCount",
        "isOpenAccess",
        "journal",
        "openAccessPdf",
        "paperId",
        "publicationDate",
        "publicationTypes",
        "publicationVenue",
        "referenceCount",
        "references",
        "s2FieldsOfStudy",
        "title",
        "tldr",
        "url",
        "venue",
        "year",
    ];

    /// Fields requested by searches and batch lookups when none are given.
    pub const SEARCH_FIELDS: &'static [&'static str] = &[
        "abstract",
        "authors",
        "citationCount",
        "corpusId",
        "externalIds",
        "fieldsOfStudy",
        "influentialCitationCount",
        "isOpenAccess",
        "journal",
        "openAccessPdf",
        "paperId",
        "publicationDate",
        "publicationTypes",
        "publicationVenue",
        "referenceCount",
        "s2FieldsOfStudy",
        "title",
        "url",
        "venue",
        "year",
    ];

    /// Semantic Scholar's primary paper id.
    pub fn paper_id(&self) -> Option<&str> {
        self.paper_id.as_deref()
    }

    pub fn corpus_id(&self) -> Option<u64> {
        self.corpus_id
    }

    /// Identifiers in other catalogues (DOI, ArXiv, MAG, ...), as returned.
    pub fn external_ids(&self) -> Option<&Value> {
        self.external_ids.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn venue(&self) -> Option<&str> {
        self.venue.as_deref()
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn publication_date(&self) -> Option<NaiveDate> {
        self.publication_date
    }

    pub fn publication_types(&self) -> Option<&[String]> {
        self.publication_types.as_deref()
    }

    pub fn publication_venue(&self) -> Option<&Value> {
        self.publication_venue.as_ref()
    }

    /// The `abstract` field.
    pub fn abstract_text(&self) -> Option<&str> {
        self.abstract_text.as_deref()
    }

    /// SPECTER embedding record (`{model, vector}`), as returned.
    pub fn embedding(&self) -> Option<&Value> {
        self.embedding.as_ref()
    }

    pub fn fields_of_study(&self) -> Option<&[String]> {
        self.fields_of_study.as_deref()
    }

    pub fn s2_fields_of_study(&self) -> Option<&Value> {
        self.s2_fields_of_study.as_ref()
    }

    pub fn citation_count(&self) -> Option<u64> {
        self.citation_count
    }

    pub fn reference_count(&self) -> Option<u64> {
        self.reference_count
    }

    pub fn influential_citation_count(&self) -> Option<u64> {
        self.influential_citation_count
    }

    pub fn is_open_access(&self) -> Option<bool> {
        self.is_open_access
    }

    pub fn open_access_pdf(&self) -> Option<&Value> {
        self.open_access_pdf.as_ref()
    }

    pub fn journal(&self) -> Option<&Journal> {
        self.journal.as_ref()
    }

    pub fn tldr(&self) -> Option<&Tldr> {
        self.tldr.as_ref()
    }

    /// Authors in byline order. Empty when the field was not requested.
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    pub fn references(&self) -> &[Citation] {
        &self.references
    }
}

impl JsonEntity for Paper {
    fn from_json(value: Value) -> Result<Self> {
        parse::paper_from_json(value)
    }

    fn raw_data(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl Index<&str> for Paper {
    type Output = Value;

    /// Returns `Value::Null` for keys absent from the payload.
    fn index(&self, key: &str) -> &Value {
        self.raw.get(key).unwrap_or(&NULL)
    }
}

impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Paper({}:{})",
            self.paper_id.as_deref().unwrap_or("-"),
            self.title.as_deref().unwrap_or("-")
        )
    }
}

/// An author from the Academic Graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub(crate) raw: Map<String, Value>,
    pub(crate) author_id: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) aliases: Option<Vec<String>>,
    pub(crate) affiliations: Option<Vec<String>>,
    pub(crate) external_ids: Option<Value>,
    pub(crate) homepage: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) citation_count: Option<u64>,
    pub(crate) h_index: Option<u64>,
    pub(crate) paper_count: Option<u64>,
    pub(crate) papers: Vec<Paper>,
}

impl Author {
    /// Fields requested by a single author lookup when none are given.
    pub const FIELDS: &'static [&'static str] = &[
        "affiliations",
        "aliases",
        "authorId",
        "citationCount",
        "externalIds",
        "hIndex",
        "homepage",
        "name",
        "paperCount",
        "papers",
        "url",
    ];

    /// Fields requested by searches and batch lookups when none are given.
    pub const SEARCH_FIELDS: &'static [&'static str] = &[
        "affiliations",
        "aliases",
        "authorId",
        "citationCount",
        "externalIds",
        "hIndex",
        "homepage",
        "name",
        "paperCount",
        "url",
    ];

    /// Authors embedded in a paper may have no id.
    pub fn author_id(&self) -> Option<&str> {
        self.author_id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn aliases(&self) -> Option<&[String]> {
        self.aliases.as_deref()
    }

    pub fn affiliations(&self) -> Option<&[String]> {
        self.affiliations.as_deref()
    }

    pub fn external_ids(&self) -> Option<&Value> {
        self.external_ids.as_ref()
    }

    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn citation_count(&self) -> Option<u64> {
        self.citation_count
    }

    pub fn h_index(&self) -> Option<u64> {
        self.h_index
    }

    pub fn paper_count(&self) -> Option<u64> {
        self.paper_count
    }

    /// Paper summaries, in the order the API returned them.
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }
}

impl JsonEntity for Author {
    fn from_json(value: Value) -> Result<Self> {
        parse::author_from_json(value)
    }

    fn raw_data(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl Index<&str> for Author {
    type Output = Value;

    /// Returns `Value::Null` for keys absent from the payload.
    fn index(&self, key: &str) -> &Value {
        self.raw.get(key).unwrap_or(&NULL)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Author({}:{})",
            self.author_id.as_deref().unwrap_or("-"),
            self.name.as_deref().unwrap_or("-")
        )
    }
}

/// A citation edge: a paper that cites another one.
#[derive(Debug, Clone, PartialEq)]
pub struct Citation {
    pub(crate) raw: Map<String, Value>,
    pub(crate) citing_paper_id: Option<String>,
    pub(crate) is_influential: bool,
    pub(crate) title: String,
}

impl Citation {
    /// Fields requested from the citations endpoint when none are given.
    pub const FIELDS: &'static [&'static str] = &["isInfluential", "paperId", "title"];

    /// Id of the citing paper; the API leaves it null for unresolved papers.
    pub fn citing_paper_id(&self) -> Option<&str> {
        self.citing_paper_id.as_deref()
    }

    pub fn is_influential(&self) -> bool {
        self.is_influential
    }

    /// Title of the citing paper. Empty when an embedded summary was
    /// requested without `title`.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl JsonEntity for Citation {
    fn from_json(value: Value) -> Result<Self> {
        parse::citation_from_json(value)
    }

    fn raw_data(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Citation({}:{})",
            self.citing_paper_id.as_deref().unwrap_or("-"),
            if self.title.is_empty() { "-" } else { self.title.as_str() }
        )
    }
}

/// Journal details of a paper.
#[derive(Debug, Clone, PartialEq)]
pub struct Journal {
    pub(crate) raw: Map<String, Value>,
    pub(crate) name: Option<String>,
    pub(crate) pages: Option<String>,
    pub(crate) volume: Option<String>,
}

impl Journal {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn pages(&self) -> Option<&str> {
        self.pages.as_deref()
    }

    pub fn volume(&self) -> Option<&str> {
        self.volume.as_deref()
    }
}

impl JsonEntity for Journal {
    fn from_json(value: Value) -> Result<Self> {
        parse::journal_from_json(value)
    }

    fn raw_data(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl fmt::Display for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}

/// Machine-generated one-sentence summary of a paper.
#[derive(Debug, Clone, PartialEq)]
pub struct Tldr {
    pub(crate) raw: Map<String, Value>,
    pub(crate) model: String,
    pub(crate) text: String,
}

impl Tldr {
    /// Name and version of the summarisation model.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl JsonEntity for Tldr {
    fn from_json(value: Value) -> Result<Self> {
        parse::tldr_from_json(value)
    }

    fn raw_data(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl fmt::Display for Tldr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// Entities serialize back to exactly the payload they were built from.
macro_rules! serialize_raw {
    ($($entity:ty),*) => {$(
        impl Serialize for $entity {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                self.raw.serialize(serializer)
            }
        }
    )*};
}

serialize_raw!(Paper, Author, Citation, Journal, Tldr);
