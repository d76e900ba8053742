//! Semantic Scholar API response parsing.
//!
//! Payloads are first captured as an ordered JSON map (kept as the entity's
//! `raw_data`), then decoded through private serde records into the typed
//! fields exposed by [`crate::types`].

use crate::entity::JsonEntity;
use crate::error::{Result, SemanticScholarError};
use crate::types::{Author, Citation, Journal, Paper, Tldr};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Date format used by `publicationDate`.
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaperRecord {
    paper_id: Option<String>,
    corpus_id: Option<u64>,
    external_ids: Option<Value>,
    url: Option<String>,
    title: Option<String>,
    venue: Option<String>,
    year: Option<u16>,
    publication_date: Option<String>,
    publication_types: Option<Vec<String>>,
    publication_venue: Option<Value>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    embedding: Option<Value>,
    fields_of_study: Option<Vec<String>>,
    s2_fields_of_study: Option<Value>,
    citation_count: Option<u64>,
    reference_count: Option<u64>,
    influential_citation_count: Option<u64>,
    is_open_access: Option<bool>,
    open_access_pdf: Option<Value>,
    journal: Option<Value>,
    tldr: Option<Value>,
    authors: Option<Vec<Value>>,
    citations: Option<Vec<Value>>,
    references: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorRecord {
    author_id: Option<String>,
    name: Option<String>,
    aliases: Option<Vec<String>>,
    affiliations: Option<Vec<String>>,
    external_ids: Option<Value>,
    homepage: Option<String>,
    url: Option<String>,
    citation_count: Option<u64>,
    h_index: Option<u64>,
    paper_count: Option<u64>,
    papers: Option<Vec<Value>>,
}

/// The paper side of a citation edge.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CitedPaperRecord {
    paper_id: Option<String>,
    title: String,
}

/// Paper summary embedded in a paper's `citations`/`references`. Field
/// subsets such as `citations.paperId` leave the title out.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatCitationRecord {
    paper_id: Option<String>,
    title: Option<String>,
    #[serde(default)]
    is_influential: bool,
}

/// Citation edge as returned by `/paper/{id}/citations`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CitationEnvelope {
    is_influential: bool,
    citing_paper: CitedPaperRecord,
}

#[derive(Debug, Deserialize)]
struct JournalRecord {
    name: Option<String>,
    pages: Option<String>,
    volume: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TldrRecord {
    model: String,
    text: String,
}

/// One page of a list endpoint: `{ total?, offset, next?, data: [...] }`.
#[derive(Debug, Deserialize)]
struct PageEnvelope {
    total: Option<u64>,
    #[serde(default)]
    offset: u64,
    next: Option<u64>,
    data: Vec<Value>,
}

/// A decoded page of entities plus its cursors.
#[derive(Debug)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
    pub offset: u64,
    pub next: Option<u64>,
    pub total: Option<u64>,
}

/// Require `value` to be a JSON object and take ownership of its map.
pub(crate) fn into_object(value: Value, kind: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SemanticScholarError::Parse(format!(
            "{} must be a JSON object, got {}",
            kind,
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a typed record from a copy of `raw`.
fn decode<T: DeserializeOwned>(raw: &Map<String, Value>, kind: &str) -> Result<T> {
    serde_json::from_value(Value::Object(raw.clone()))
        .map_err(|e| SemanticScholarError::Parse(format!("Invalid {}: {}", kind, e)))
}

/// Parse a `YYYY-MM-DD` publication date.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        SemanticScholarError::Parse(format!("Invalid publicationDate {:?}: {}", s, e))
    })
}

fn decode_all<T: JsonEntity>(values: Option<Vec<Value>>) -> Result<Vec<T>> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(T::from_json)
        .collect()
}

pub(crate) fn paper_from_json(value: Value) -> Result<Paper> {
    let raw = into_object(value, "paper")?;
    let record: PaperRecord = decode(&raw, "paper")?;

    let publication_date = record
        .publication_date
        .as_deref()
        .map(parse_date)
        .transpose()?;

    Ok(Paper {
        paper_id: record.paper_id,
        corpus_id: record.corpus_id,
        external_ids: record.external_ids,
        url: record.url,
        title: record.title,
        venue: record.venue,
        year: record.year,
        publication_date,
        publication_types: record.publication_types,
        publication_venue: record.publication_venue,
        abstract_text: record.abstract_text,
        embedding: record.embedding,
        fields_of_study: record.fields_of_study,
        s2_fields_of_study: record.s2_fields_of_study,
        citation_count: record.citation_count,
        reference_count: record.reference_count,
        influential_citation_count: record.influential_citation_count,
        is_open_access: record.is_open_access,
        open_access_pdf: record.open_access_pdf,
        journal: record.journal.map(Journal::from_json).transpose()?,
        tldr: record.tldr.map(Tldr::from_json).transpose()?,
        authors: decode_all(record.authors)?,
        citations: decode_all(record.citations)?,
        references: decode_all(record.references)?,
        raw,
    })
}

pub(crate) fn author_from_json(value: Value) -> Result<Author> {
    let raw = into_object(value, "author")?;
    let record: AuthorRecord = decode(&raw, "author")?;

    Ok(Author {
        author_id: record.author_id,
        name: record.name,
        aliases: record.aliases,
        affiliations: record.affiliations,
        external_ids: record.external_ids,
        homepage: record.homepage,
        url: record.url,
        citation_count: record.citation_count,
        h_index: record.h_index,
        paper_count: record.paper_count,
        papers: decode_all(record.papers)?,
        raw,
    })
}

/// Accepts both the citation-edge shape (`{isInfluential, citingPaper}`) and
/// the flat paper summary the API embeds in a paper's `citations`/`references`.
pub(crate) fn citation_from_json(value: Value) -> Result<Citation> {
    let raw = into_object(value, "citation")?;

    if raw.contains_key("citingPaper") {
        let envelope: CitationEnvelope = decode(&raw, "citation")?;
        return Ok(Citation {
            citing_paper_id: envelope.citing_paper.paper_id,
            is_influential: envelope.is_influential,
            title: envelope.citing_paper.title,
            raw,
        });
    }

    let record: FlatCitationRecord = decode(&raw, "citation")?;
    Ok(Citation {
        citing_paper_id: record.paper_id,
        is_influential: record.is_influential,
        title: record.title.unwrap_or_default(),
        raw,
    })
}

pub(crate) fn journal_from_json(value: Value) -> Result<Journal> {
    let raw = into_object(value, "journal")?;
    let record: JournalRecord = decode(&raw, "journal")?;
    Ok(Journal {
        name: record.name,
        pages: record.pages,
        volume: record.volume,
        raw,
    })
}

pub(crate) fn tldr_from_json(value: Value) -> Result<Tldr> {
    let raw = into_object(value, "tldr")?;
    let record: TldrRecord = decode(&raw, "tldr")?;
    Ok(Tldr {
        model: record.model,
        text: record.text,
        raw,
    })
}

/// Parse one page of a list endpoint into entities.
pub(crate) fn parse_page<T: JsonEntity>(value: Value) -> Result<Page<T>> {
    let envelope: PageEnvelope = serde_json::from_value(value)
        .map_err(|e| SemanticScholarError::Parse(format!("Invalid result page: {}", e)))?;

    Ok(Page {
        items: envelope
            .data
            .into_iter()
            .map(T::from_json)
            .collect::<Result<_>>()?,
        offset: envelope.offset,
        next: envelope.next,
        total: envelope.total,
    })
}

/// Parse a batch response, keeping `null` entries as `None` in place.
pub(crate) fn parse_batch<T: JsonEntity>(value: Value) -> Result<Vec<Option<T>>> {
    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(SemanticScholarError::Parse(format!(
                "Batch response must be an array, got {}",
                json_type_name(&other)
            )))
        }
    };

    entries
        .into_iter()
        .map(|entry| match entry {
            Value::Null => Ok(None),
            entry => T::from_json(entry).map(Some),
        })
        .collect()
}
