use std::time::Duration;

use corpus_core::parse_url_list;
use corpus_engine::{
    parse_random_titles, write_url_list, SeedError, SeedSource, WikipediaRandomSource,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TWO_ARTICLES: &str = r#"{"batchcomplete":"","continue":{"rncontinue":"0.1|0.2|0|0","continue":"-||"},"query":{"random":[{"id":101,"ns":0,"title":"Москва"},{"id":102,"ns":0,"title":"Новый Орлеан"}]}}"#;

fn source(server: &MockServer) -> WikipediaRandomSource {
    WikipediaRandomSource::new("ru.wikipedia.org")
        .with_api_url(format!("{}/w/api.php", server.uri()))
        .with_batch_pause(Duration::ZERO)
}

#[tokio::test]
async fn random_titles_become_wiki_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("list", "random"))
        .and(query_param("rnnamespace", "0"))
        .and(query_param("rnlimit", "2"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TWO_ARTICLES, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let urls = source(&server).seed_urls(2).await.unwrap();

    assert_eq!(
        urls,
        vec![
            "https://ru.wikipedia.org/wiki/%D0%9C%D0%BE%D1%81%D0%BA%D0%B2%D0%B0".to_string(),
            "https://ru.wikipedia.org/wiki/%D0%9D%D0%BE%D0%B2%D1%8B%D0%B9_%D0%9E%D1%80%D0%BB%D0%B5%D0%B0%D0%BD".to_string(),
        ]
    );
}

#[tokio::test]
async fn batches_continue_until_count_is_reached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("rnlimit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TWO_ARTICLES, "application/json"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("rnlimit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TWO_ARTICLES, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let urls = source(&server).seed_urls(3).await.unwrap();

    assert_eq!(urls.len(), 3);
}

#[tokio::test]
async fn empty_batch_stops_early() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"query":{"random":[]}}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let urls = source(&server).seed_urls(5).await.unwrap();
    assert!(urls.is_empty());
}

#[tokio::test]
async fn api_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = source(&server).seed_urls(1).await.unwrap_err();
    assert!(matches!(err, SeedError::HttpStatus(429)));
}

#[test]
fn response_without_random_list_is_a_parse_error() {
    let err = parse_random_titles(br#"{"error":{"code":"badparam"}}"#).unwrap_err();
    assert!(matches!(err, SeedError::Parse(_)));
}

#[test]
fn written_list_reads_back_in_order() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("urls.txt");
    let urls = vec![
        "https://ru.wikipedia.org/wiki/A".to_string(),
        "https://ru.wikipedia.org/wiki/B".to_string(),
    ];

    write_url_list(&path, &urls).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.ends_with('\n'));
    assert_eq!(parse_url_list(&raw), urls);
}
