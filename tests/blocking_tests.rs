#![cfg(feature = "blocking")]
//! Blocking client tests. The mock server lives on its own runtime so the
//! client under test can block the test thread.

use std::time::Duration;

use serde_json::{json, Value};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use semanticscholar::blocking::SemanticScholar;
use semanticscholar::{Config, SemanticScholarError};

fn start_server(rt: &Runtime) -> MockServer {
    rt.block_on(MockServer::start())
}

fn client_for(server: &MockServer) -> SemanticScholar {
    let config = Config::default().with_api_url(format!("{}/graph/v1", server.uri()));
    SemanticScholar::with_config(config).unwrap()
}

fn author_page(offset: u64, count: u64, next: Option<u64>) -> Value {
    let data: Vec<Value> = (offset..offset + count)
        .map(|i| json!({"authorId": i.to_string(), "name": format!("Author {}", i)}))
        .collect();
    let mut page = json!({"total": 5, "offset": offset, "data": data});
    if let Some(next) = next {
        page["next"] = json!(next);
    }
    page
}

#[test]
fn test_blocking_get_paper() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt);

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/graph/v1/paper/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "paperId": "abc",
                "title": "Computing Machinery and Intelligence",
                "publicationDate": "1950-10-01"
            })))
            .mount(&server),
    );

    let sch = client_for(&server);
    let paper = sch.get_paper("abc", &[]).unwrap();

    assert_eq!(paper.to_string(), "Paper(abc:Computing Machinery and Intelligence)");
    assert_eq!(
        paper.publication_date(),
        chrono::NaiveDate::from_ymd_opt(1950, 10, 1)
    );
}

#[test]
fn test_blocking_not_found() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt);

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/graph/v1/author/0"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Author with id 0 not found"})))
            .mount(&server),
    );

    let sch = client_for(&server);
    let err = sch.get_author("0", &[]).unwrap_err();
    assert!(matches!(err, SemanticScholarError::ObjectNotFound(_)));
}

#[test]
fn test_blocking_iteration_walks_all_pages() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt);

    for (offset, count, next) in [(0, 2, Some(2)), (2, 2, Some(4)), (4, 1, None)] {
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/graph/v1/author/search"))
                .and(query_param("offset", offset.to_string()))
                .and(query_param("limit", "2"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(author_page(offset, count, next)),
                )
                .expect(1)
                .mount(&server),
        );
    }

    let sch = client_for(&server);
    let results = sch.search_author_with_limit("author", &[], 2).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results.total(), Some(5));

    let mut names = Vec::new();
    for author in results {
        names.push(author.unwrap().name().unwrap_or_default().to_string());
    }
    assert_eq!(
        names,
        vec!["Author 0", "Author 1", "Author 2", "Author 3", "Author 4"]
    );
}

#[test]
fn test_blocking_next_page() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt);

    for (offset, count, next) in [(0, 2, Some(2)), (2, 2, None)] {
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/graph/v1/author/search"))
                .and(query_param("offset", offset.to_string()))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(author_page(offset, count, next)),
                )
                .mount(&server),
        );
    }

    let sch = client_for(&server);
    let mut results = sch.search_author_with_limit("author", &[], 2).unwrap();

    let fresh: Vec<String> = results
        .next_page()
        .unwrap()
        .iter()
        .filter_map(|a| a.author_id().map(str::to_string))
        .collect();
    assert_eq!(fresh, vec!["2", "3"]);
    assert_eq!(results.len(), 4);
    assert!(!results.has_next_page());

    let err = results.next_page().unwrap_err();
    assert!(matches!(err, SemanticScholarError::BadQueryParameters(_)));
}

#[test]
fn test_blocking_clones_are_independent() {
    let mut first = SemanticScholar::with_config(Config::default().with_api_key("SECRET123")).unwrap();
    let second = first.clone();

    first.set_timeout(Duration::from_secs(1));
    assert_eq!(first.timeout(), Duration::from_secs(1));
    assert_eq!(second.timeout(), Duration::from_secs(10));
    assert!(!format!("{:?}", second).contains("SECRET123"));
}
