//! Word source tests against a mock HTTP server.
//!
//! The provider uses a blocking client, so every call runs on
//! `spawn_blocking` to keep it off the runtime's async workers.

use std::io::Cursor;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordle_tui::cli::PlainInterface;
use wordle_tui::{DatamuseProvider, WordFetchError, WordLoader, WordProvider, run_session};

async fn mock_words(body: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/words"))
        .and(query_param("sp", "?????"))
        .and(query_param("max", "1000"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

async fn fetch(endpoint: String) -> Result<String, WordFetchError> {
    tokio::task::spawn_blocking(move || {
        let provider = DatamuseProvider::new(&endpoint, Duration::from_secs(5))?;
        provider.fetch_random_word(5, 1000)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_picks_word_from_response() {
    let server = mock_words(
        r#"[{"word":"crane","score":3021},{"word":"a lot","score":1},{"word":"re-do"}]"#,
        200,
    )
    .await;

    let word = fetch(format!("{}/words", server.uri())).await.unwrap();
    assert_eq!(word, "crane");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_result_is_no_candidates() {
    let server = mock_words("[]", 200).await;

    let err = fetch(format!("{}/words", server.uri())).await.unwrap_err();
    assert!(matches!(err, WordFetchError::NoCandidates { length: 5 }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_status() {
    let server = mock_words("busy", 503).await;

    let err = fetch(format!("{}/words", server.uri())).await.unwrap_err();
    assert!(matches!(err, WordFetchError::Status { status: 503 }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_body() {
    let server = mock_words("{\"not\": \"a list\"}", 200).await;

    let err = fetch(format!("{}/words", server.uri())).await.unwrap_err();
    assert!(matches!(err, WordFetchError::Decode(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_source() {
    // Grab a free port, then close it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/words", listener.local_addr().unwrap());
    drop(listener);

    let err = fetch(endpoint).await.unwrap_err();
    assert!(matches!(err, WordFetchError::Request(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plain_game_with_online_word() {
    let server = mock_words(r#"[{"word":"slate"}]"#, 200).await;
    let endpoint = format!("{}/words", server.uri());

    let output = tokio::task::spawn_blocking(move || {
        let provider = DatamuseProvider::new(&endpoint, Duration::from_secs(5)).unwrap();
        let mut loader = WordLoader::new(Arc::new(provider), 1000);
        let mut interface =
            PlainInterface::new(Cursor::new("crane\nslate\n:quit\n"), Vec::new());
        let tally = run_session(&mut loader, &mut interface).unwrap();
        assert_eq!(tally.won, 1);
        String::from_utf8(interface.into_writer()).unwrap()
    })
    .await
    .unwrap();

    assert!(output.contains("  CRANE  ..G.G"));
    assert!(output.contains("You've won!"));
}
