//! Solr backend contract tests.
//!
//! These tests verify the select request format and the mapping of backend
//! responses to candidate buckets against a mock HTTP server.

use panel_search::{
    collect_candidates, CandidateId, ContentType, Panel, SearchBackend, SearchConfig, SearchError,
    SolrBackend, SolrQuery,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> SearchConfig {
    SearchConfig {
        base_url: format!("{}/solr", server.uri()),
        timeout_seconds: 2,
        ..Default::default()
    }
}

fn select_body(docs: serde_json::Value) -> serde_json::Value {
    json!({
        "responseHeader": {"status": 0, "QTime": 3},
        "response": {"numFound": docs.as_array().map_or(0, Vec::len), "start": 0, "docs": docs}
    })
}

#[tokio::test]
async fn select_sends_query_sort_rows_and_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/all_collection/select"))
        .and(query_param("q", "ocean"))
        .and(query_param("qf", "title^100"))
        .and(query_param("sort", "id desc"))
        .and(query_param("rows", "1000"))
        .and(query_param("fq", r#"-type:"data source""#))
        .and(query_param("fq", "open_access:true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(select_body(json!([
            {"id": "3", "type": "service", "title": ["Compute"]},
            {"id": "50|doi::x", "type": "dataset"}
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let backend = SolrBackend::new(&config).expect("backend");
    let collected = collect_candidates(
        &backend,
        Panel::All,
        "ocean",
        "title^100",
        &["open_access:true".to_owned()],
        config.max_rows,
    )
    .await
    .expect("collect");

    assert_eq!(collected.documents.len(), 2);
    assert_eq!(collected.bucket.get(ContentType::Service), &[CandidateId::Int(3)]);
    assert_eq!(
        collected.bucket.get(ContentType::Dataset),
        &[CandidateId::from("50|doi::x")]
    );
    assert_eq!(collected.documents[0].payload["title"], json!(["Compute"]));
}

#[tokio::test]
async fn panel_query_filters_on_panel_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/all_collection/select"))
        .and(query_param("fq", r#"type:("software")"#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(select_body(json!([{"id": "s-1", "type": "software"}]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let collected = panel_search::collect(
        &config_for(&server),
        Panel::Content(ContentType::Software),
        "*",
        "title",
        &[],
    )
    .await
    .expect("collect");

    assert_eq!(collected.bucket.get(ContentType::Software).len(), 1);
}

#[tokio::test]
async fn server_error_is_retrieve_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = panel_search::collect(&config_for(&server), Panel::All, "*", "title", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Retrieve(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn zero_documents_is_empty_results_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(select_body(json!([]))))
        .mount(&server)
        .await;

    let err = panel_search::collect(&config_for(&server), Panel::All, "nothing", "title", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::EmptyResults(_)));
}

#[tokio::test]
async fn non_select_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "nope"})))
        .mount(&server)
        .await;

    let backend = SolrBackend::new(&config_for(&server)).expect("backend");
    let query = SolrQuery::for_panel(Panel::All, "*", "title", &[], 10);
    let err = backend.select(&query).await.unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)));
}

#[tokio::test]
async fn unreachable_backend_is_retrieve_error() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);

    let err = panel_search::collect(&config, Panel::All, "*", "title", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Retrieve(_)));
}

#[tokio::test]
async fn slow_backend_times_out_as_retrieve_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(select_body(json!([{"id": "1", "type": "dataset"}])))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = SearchConfig {
        timeout_seconds: 1,
        ..config_for(&server)
    };
    let err = panel_search::collect(&config, Panel::All, "*", "title", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Retrieve(_)));
}
