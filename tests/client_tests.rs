//! Lookup, batch and error-mapping tests against a mocked API.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use semanticscholar::{Config, JsonEntity, SemanticScholar, SemanticScholarError};

const TURING_DOI: &str = "10.1093/mind/lix.236.433";

fn client_for(server: &MockServer) -> SemanticScholar {
    let config = Config::default().with_api_url(format!("{}/graph/v1", server.uri()));
    SemanticScholar::with_config(config).unwrap()
}

fn paper_fixture() -> Value {
    serde_json::from_str(include_str!("fixtures/paper.json")).unwrap()
}

fn author_fixture() -> Value {
    serde_json::from_str(include_str!("fixtures/author.json")).unwrap()
}

#[tokio::test]
async fn test_get_paper() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/graph/v1/paper/{}", TURING_DOI)))
        .and(query_param("fields", semanticscholar::Paper::FIELDS.join(",")))
        .respond_with(ResponseTemplate::new(200).set_body_json(paper_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let sch = client_for(&server);
    let paper = sch.get_paper(TURING_DOI, &[]).await.unwrap();

    assert_eq!(paper.title(), Some("Computing Machinery and Intelligence"));
    assert_eq!(paper["title"], "Computing Machinery and Intelligence");
    assert_eq!(paper.raw_data(), paper_fixture().as_object().unwrap());
    assert_eq!(paper.journal().unwrap().name(), Some("Mind"));
    assert_eq!(paper.authors()[0].name(), Some("A. Turing"));
    assert_eq!(paper.citations().len(), 2);
}

#[tokio::test]
async fn test_get_paper_custom_fields_and_unknown_refs() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/CorpusId:14636783"))
        .and(query_param("fields", "title,year"))
        .and(query_param("include_unknown_references", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paperId": "d9e8f2d4",
            "title": "Computing Machinery and Intelligence",
            "year": 1950
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sch = client_for(&server);
    let paper = sch
        .get_paper_with_options("CorpusId:14636783", true, &["title", "year"])
        .await
        .unwrap();

    assert_eq!(paper.year(), Some(1950));
    assert!(paper.abstract_text().is_none());
    assert_eq!(paper.keys().count(), 3);
}

#[tokio::test]
async fn test_url_id_with_query_stays_in_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/URL:https://example.org/p%3Fid=7"))
        .and(query_param("fields", "title"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paperId": "right",
            "title": "Right paper"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/URL:https://example.org/p"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paperId": "wrong",
            "title": "Wrong paper"
        })))
        .expect(0)
        .mount(&server)
        .await;

    let sch = client_for(&server);
    let paper = sch
        .get_paper("URL:https://example.org/p?id=7", &["title"])
        .await
        .unwrap();
    assert_eq!(paper.paper_id(), Some("right"));
}

#[tokio::test]
async fn test_author_and_citation_ids_are_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/a%23b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(author_fixture()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/x%3Fy/citations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "offset": 0,
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sch = client_for(&server);
    sch.get_author("a#b", &[]).await.unwrap();
    let citations = sch.get_paper_citations("x?y", &[], 10).await.unwrap();
    assert!(citations.is_empty());
}

#[tokio::test]
async fn test_unknown_field_is_bad_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/graph/v1/paper/{}", TURING_DOI)))
        .and(query_param("fields", "unknown"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Unrecognized or unsupported fields: [unknown]"})),
        )
        .mount(&server)
        .await;

    let sch = client_for(&server);
    let err = sch.get_paper(TURING_DOI, &["unknown"]).await.unwrap_err();

    match err {
        SemanticScholarError::BadQueryParameters(msg) => {
            assert_eq!(msg, "Unrecognized or unsupported fields: [unknown]")
        }
        other => panic!("expected BadQueryParameters, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_ids_are_object_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/0"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Paper with id 0 not found"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/graph/v1/author/0"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Author with id 0 not found"})),
        )
        .mount(&server)
        .await;

    let sch = client_for(&server);

    let paper_err = sch.get_paper("0", &[]).await.unwrap_err();
    assert!(matches!(paper_err, SemanticScholarError::ObjectNotFound(ref m) if m == "Paper with id 0 not found"));

    let author_err = sch.get_author("0", &[]).await.unwrap_err();
    assert!(matches!(author_err, SemanticScholarError::ObjectNotFound(_)));
    assert_eq!(author_err.status(), Some(404));
}

#[tokio::test]
async fn test_other_status_is_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let sch = client_for(&server);
    let err = sch.get_paper("abc", &[]).await.unwrap_err();

    match err {
        SemanticScholarError::RequestFailed { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paperId": "abc",
            "publicationDate": "October 1950"
        })))
        .mount(&server)
        .await;

    let sch = client_for(&server);
    let err = sch.get_paper("abc", &[]).await.unwrap_err();
    assert!(matches!(err, SemanticScholarError::Parse(_)));
}

#[tokio::test]
async fn test_timeout_passes_through_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/graph/v1/paper/{}", TURING_DOI)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(paper_fixture())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut sch = client_for(&server);
    sch.set_timeout(Duration::from_millis(10));
    assert_eq!(sch.timeout(), Duration::from_millis(10));

    let err = sch.get_paper(TURING_DOI, &[]).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(matches!(err, SemanticScholarError::Http(_)));
}

#[tokio::test]
async fn test_get_papers_keeps_missing_positions() {
    let server = MockServer::start().await;

    let ids = ["CorpusId:470667", "missing-id", "10.2139/ssrn.2250500"];
    Mock::given(method("POST"))
        .and(path("/graph/v1/paper/batch"))
        .and(query_param("fields", "title,authors"))
        .and(body_json(json!({"ids": ids})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "paperId": "p1",
                "title": "Microfinance",
                "authors": [{"authorId": "1", "name": "E. Duflo"}]
            },
            null,
            {
                "paperId": "p3",
                "title": "The Miracle of Microfinance?",
                "authors": [{"authorId": "1", "name": "E. Duflo"}]
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let sch = client_for(&server);
    let papers = sch.get_papers(&ids, &["title", "authors"]).await.unwrap();

    assert_eq!(papers.len(), 3);
    assert!(papers[1].is_none());
    for paper in papers.iter().flatten() {
        assert!(paper.authors().iter().any(|a| a.name() == Some("E. Duflo")));
    }
    assert_eq!(papers[2].as_ref().unwrap().paper_id(), Some("p3"));
}

#[tokio::test]
async fn test_get_author() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/2262347"))
        .and(query_param("fields", semanticscholar::Author::FIELDS.join(",")))
        .respond_with(ResponseTemplate::new(200).set_body_json(author_fixture()))
        .mount(&server)
        .await;

    let sch = client_for(&server);
    let author = sch.get_author("2262347", &[]).await.unwrap();

    assert_eq!(author.name(), Some("A. Turing"));
    assert_eq!(author.h_index(), Some(14));
    assert_eq!(author.papers().len(), 2);
    assert_eq!(
        author.keys().collect::<Vec<_>>(),
        author_fixture().as_object().unwrap().keys().collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_get_authors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graph/v1/author/batch"))
        .and(body_json(json!({"ids": ["3234559", "1726629", "1711844", "0"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"authorId": "3234559", "name": "E. Dijkstra"},
            {"authorId": "1726629", "name": "D. Parnas"},
            {"authorId": "1711844", "name": "I. Sommerville"},
            null
        ])))
        .mount(&server)
        .await;

    let sch = client_for(&server);
    let authors = sch
        .get_authors(&["3234559", "1726629", "1711844", "0"], &[])
        .await
        .unwrap();

    let names: Vec<&str> = authors.iter().flatten().filter_map(|a| a.name()).collect();
    assert_eq!(names, vec!["E. Dijkstra", "D. Parnas", "I. Sommerville"]);
    assert!(authors[3].is_none());
}

#[tokio::test]
async fn test_api_key_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/author/2262347"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(author_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::default()
        .with_api_key("secret")
        .with_api_url(format!("{}/graph/v1", server.uri()));
    let sch = SemanticScholar::with_config(config).unwrap();

    sch.get_author("2262347", &[]).await.unwrap();
}

#[tokio::test]
#[allow(deprecated)]
async fn test_deprecated_raw_lookups() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/graph/v1/paper/{}", TURING_DOI)))
        .respond_with(ResponseTemplate::new(200).set_body_json(paper_fixture()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/graph/v1/author/2262347"))
        .respond_with(ResponseTemplate::new(200).set_body_json(author_fixture()))
        .mount(&server)
        .await;

    let sch = client_for(&server);

    let paper = sch.paper(TURING_DOI, false).await.unwrap();
    assert_eq!(Value::Object(paper), paper_fixture());

    let author = sch.author("2262347").await.unwrap();
    assert_eq!(author["name"], "A. Turing");
}
