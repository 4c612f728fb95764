//! Integration tests for the KITOpen client
//!
//! These tests run the client against a local mockito server through the real
//! reqwest transport, and against the in-memory mock transport.

use kitopen::client::{KitOpenError, SearchClient, SEARCH_ENDPOINT};
use kitopen::config::{Language, SearchConfig};
use kitopen::models::SearchArgs;
use kitopen::transport::{MockTransport, ReqwestTransport, TransportError};
use kitopen::utils::{HttpClient, DEFAULT_USER_AGENT};
use mockito::Matcher;
use std::sync::Arc;

const SEARCH_PATH: &str = "/publikationslisten/get.php";

const SAMPLE_RESPONSE: &str = r#"[
    {
        "title": "A readout system for the KATRIN focal plane detector",
        "container-title": "Journal of Instrumentation",
        "volume": "13",
        "DOI": "10.1088/1748-0221/13/01/C01012",
        "ISSN": "1748-0221",
        "type": "article-journal",
        "kit-has-full-text": true,
        "kit-publication-id": "1000078412",
        "authors": [
            {"given": "John", "family": "Doe"},
            {"given": "Richard", "family": "Roe"}
        ]
    },
    {
        "title": "Data acquisition at high rates",
        "type": "paper-conference",
        "kit-publication-id": "1000081234",
        "authors": [{"family": "Mustermann"}]
    },
    {
        "title": "Ultrafast line cameras",
        "authors": []
    }
]"#;

/// Build a client that talks to the mockito server through reqwest
fn mock_server_client(server: &mockito::ServerGuard, config: SearchConfig) -> SearchClient {
    let transport = ReqwestTransport::new().expect("transport");
    SearchClient::with_transport(config, Arc::new(transport))
        .with_endpoint(format!("{}{}", server.url(), SEARCH_PATH))
}

#[tokio::test]
async fn test_search_maps_records_in_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("lang".into(), "en".into()),
            Matcher::UrlEncoded("format".into(), "csl_json".into()),
            Matcher::UrlEncoded("style".into(), "kit-3lines-title_b-authors-other".into()),
            Matcher::UrlEncoded("referencing".into(), "all".into()),
            Matcher::UrlEncoded("external_publications".into(), "all".into()),
            Matcher::UrlEncoded("organizations".into(), "IPE".into()),
            Matcher::UrlEncoded("types".into(), "ZEITSCHRIFTENAUFSATZ".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SAMPLE_RESPONSE)
        .create_async()
        .await;

    let client = mock_server_client(&server, SearchConfig::default());
    let args = SearchArgs::new()
        .publication_type("ZEITSCHRIFTENAUFSATZ")
        .institute("IPE");

    let publications = client.search(&args).await.unwrap();
    mock.assert_async().await;

    assert_eq!(publications.len(), 3);

    let first = &publications[0];
    assert_eq!(
        first.title(),
        "A readout system for the KATRIN focal plane detector"
    );
    assert_eq!(first.journal(), "Journal of Instrumentation");
    assert_eq!(first.doi(), "10.1088/1748-0221/13/01/C01012");
    assert!(first.is_full_text_available());
    assert_eq!(first.indexed_authors(), "Doe, J.; Roe, R.");
    assert_eq!(
        first.uri(),
        "https://publikationen.bibliothek.kit.edu/1000078412"
    );

    let second = &publications[1];
    assert_eq!(second.title(), "Data acquisition at high rates");
    assert_eq!(second.authors()[0].indexed_name(), "Mustermann");
    assert!(!second.is_full_text_available());

    assert!(publications[2].authors().is_empty());
}

#[tokio::test]
async fn test_exact_query_string() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Regex(
            "^lang=de&format=csl_json&style=kit-3lines-title_b-authors-other\
             &referencing=all&external_publications=all&authors=Doe&year=2018&limit=10$"
                .to_string(),
        ))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let config = SearchConfig::default().lang(Language::De);
    let client = mock_server_client(&server, config);
    let args = SearchArgs::new().author("Doe").year("2018").limit(10);

    let publications = client.search(&args).await.unwrap();
    mock.assert_async().await;

    assert!(publications.is_empty());
}

#[tokio::test]
async fn test_default_user_agent_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Any)
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = mock_server_client(&server, SearchConfig::default());
    client.search(&SearchArgs::new().tag("laser")).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transport_with_custom_client() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::UrlEncoded("title_contains".into(), "laser".into()))
        .match_header("user-agent", "ipe-bibliography/2.1")
        .with_status(200)
        .with_body(r#"[{"title": "Laser spectroscopy"}]"#)
        .create_async()
        .await;

    let http = HttpClient::with_user_agent("ipe-bibliography/2.1").expect("http client");
    let transport = ReqwestTransport::from_client(http);
    let client = SearchClient::with_transport(SearchConfig::default(), Arc::new(transport))
        .with_endpoint(format!("{}{}", server.url(), SEARCH_PATH));

    let publications = client.search(&SearchArgs::new().tag("laser")).await.unwrap();
    mock.assert_async().await;

    assert_eq!(publications.len(), 1);
    assert_eq!(publications[0].title(), "Laser spectroscopy");
}

#[tokio::test]
async fn test_http_error_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = mock_server_client(&server, SearchConfig::default());
    let result = client.search(&SearchArgs::new().tag("laser")).await;
    mock.assert_async().await;

    match result {
        Err(KitOpenError::Transport(TransportError::Status { status, .. })) => {
            assert_eq!(status, 503)
        }
        other => panic!("expected HTTP status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error": "unexpected"}"#)
        .create_async()
        .await;

    let client = mock_server_client(&server, SearchConfig::default());
    let result = client.search(&SearchArgs::new().author("Doe")).await;

    assert!(matches!(result, Err(KitOpenError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_record_without_title_fails_whole_response() {
    let mock = Arc::new(MockTransport::with_body(
        r#"[{"title": "ok"}, {"container-title": "no title here"}]"#,
    ));
    let client = SearchClient::with_transport(SearchConfig::default(), mock.clone());

    let result = client.search(&SearchArgs::new().institute("IPE")).await;

    match result {
        Err(KitOpenError::MalformedResponse(message)) => assert!(message.contains("title")),
        other => panic!("expected malformed response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_search_term_sends_no_request() {
    let mock = Arc::new(MockTransport::new());
    let client = SearchClient::with_transport(SearchConfig::default(), mock.clone());

    for args in [
        SearchArgs::new(),
        SearchArgs::new().year("2018").publication_type("ZEITSCHRIFTENAUFSATZ"),
        SearchArgs::new().author("").institute("").tag(""),
    ] {
        let result = client.search(&args).await;
        assert!(matches!(result, Err(KitOpenError::InvalidSearchArgs(_))));
    }

    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_default_values_never_sent() {
    let mock = Arc::new(MockTransport::new());
    let client = SearchClient::with_transport(SearchConfig::default(), mock.clone());

    client
        .search(&SearchArgs::new().tag("laser").limit(200).offset(0))
        .await
        .unwrap();

    let request = &mock.requests()[0];
    assert_eq!(request.url, SEARCH_ENDPOINT);
    for key in ["limit", "offset", "year", "types", "authors", "organizations"] {
        assert_eq!(request.param(key), None, "{} should be omitted", key);
    }
    assert_eq!(request.param("title_contains").as_deref(), Some("laser"));
}

#[tokio::test]
async fn test_concurrent_searches_share_client() {
    let mock = Arc::new(MockTransport::with_body(r#"[{"title": "T"}]"#));
    let client = Arc::new(SearchClient::with_transport(
        SearchConfig::default(),
        mock.clone(),
    ));

    let handles: Vec<_> = ["Doe", "Roe", "Poe"]
        .into_iter()
        .map(|author| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.search(&SearchArgs::new().author(author)).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().len(), 1);
    }
    assert_eq!(mock.request_count(), 3);
}

#[test]
fn test_publication_url() {
    assert_eq!(
        SearchClient::publication_url("12345"),
        "https://publikationen.bibliothek.kit.edu/12345"
    );
}
