#![allow(clippy::unwrap_used, clippy::expect_used)]

//! POST round trips against a mock daemon.

use bytes::Bytes;
use httpmock::prelude::*;
use pep_http::{HttpClient, HttpError};
use std::time::Duration;

const OCTET_STREAM: &str = "application/octet-stream";

fn test_client() -> HttpClient {
    HttpClient::builder()
        .allow_insecure_http()
        .user_agent("pep-http-tests")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_post_sends_body_and_headers() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST)
            .path("/authz")
            .header("content-type", OCTET_STREAM)
            .header("user-agent", "pep-http-tests")
            .body("request-bytes");
        then.status(200).body("response-bytes");
    });

    let answer = test_client()
        .post(
            &server.url("/authz"),
            OCTET_STREAM,
            Bytes::from_static(b"request-bytes"),
        )
        .await
        .unwrap();

    assert_eq!(answer, "response-bytes");
    mock.assert();
}

#[tokio::test]
async fn test_error_status_carries_preview() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::POST).path("/authz");
        then.status(500).body("pdp unavailable");
    });

    let err = test_client()
        .post(&server.url("/authz"), OCTET_STREAM, Bytes::new())
        .await
        .unwrap_err();

    match err {
        HttpError::HttpStatus {
            status,
            body_preview,
        } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body_preview, "pdp unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_response_over_limit() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::POST).path("/authz");
        then.status(200).body("x".repeat(100));
    });

    let client = HttpClient::builder()
        .allow_insecure_http()
        .max_body_size(10)
        .build()
        .unwrap();
    let err = client
        .post(&server.url("/authz"), OCTET_STREAM, Bytes::new())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::BodyTooLarge { limit: 10, .. }));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::POST).path("/authz");
        then.status(200).delay(Duration::from_secs(2)).body("late");
    });

    let client = HttpClient::builder()
        .allow_insecure_http()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = client
        .post(&server.url("/authz"), OCTET_STREAM, Bytes::new())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Timeout(d) if d == Duration::from_millis(200)));
}

#[tokio::test]
async fn test_stalled_body_times_out() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _read = socket.read(&mut request).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nabc")
            .await
            .unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let client = HttpClient::builder()
        .allow_insecure_http()
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap();
    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        client.post(&format!("http://{addr}/authz"), OCTET_STREAM, Bytes::new()),
    )
    .await
    .expect("post() must give up within its own timeout");

    let err = outcome.unwrap_err();
    assert!(matches!(err, HttpError::Timeout(d) if d == Duration::from_millis(500)));
    assert!(err.is_endpoint_failure());
    server.abort();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a listener so the port is very likely closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let err = test_client()
        .post(
            &format!("http://127.0.0.1:{port}/authz"),
            OCTET_STREAM,
            Bytes::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Transport(_)));
    assert!(err.is_endpoint_failure());
}
