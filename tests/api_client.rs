// tests/api_client.rs
//! The HTTP client against a local stub of the content API.

mod common;

use common::record_map_json;
use notion_blog::{
    extract_title, ApiErrorCode, AppError, BlogHttpClient, PostId, PostRepository, ValidatedUrl,
};
use pretty_assertions::assert_eq;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

struct StubApi {
    base_url: String,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StubApi {
    fn spawn() -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start stub api server");
        let base_url = format!("http://{}", server.server_addr());
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            let (status, body) = match request.url() {
                "/api/post" => (
                    200,
                    r#"[{ "id": "hello-world" }, { "id": "second-post" }]"#.to_string(),
                ),
                "/api/post/hello-world" => {
                    (200, record_map_json("Hello, world", "First paragraph").to_string())
                }
                "/api/post/missing" => (
                    404,
                    r#"{ "code": "not_found", "message": "No post missing" }"#.to_string(),
                ),
                "/api/post/flaky" => (503, "Service Unavailable".to_string()),
                "/api/post/garbled" => (200, "<html>not json</html>".to_string()),
                _ => (404, "not found".to_string()),
            };

            let header =
                tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .expect("content-type header");
            let _ = request.respond(
                tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header),
            );
        });

        Self {
            base_url,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    fn client(&self) -> BlogHttpClient {
        BlogHttpClient::new(ValidatedUrl::parse(&self.base_url).unwrap()).unwrap()
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[tokio::test]
async fn lists_post_ids() {
    let stub = StubApi::spawn();
    let ids = stub.client().list_post_ids().await.unwrap();

    assert_eq!(
        ids,
        vec![PostId::new("hello-world").unwrap(), PostId::new("second-post").unwrap()]
    );
}

#[tokio::test]
async fn fetches_snapshot() {
    let stub = StubApi::spawn();
    let snapshot = stub
        .client()
        .fetch_snapshot(&PostId::new("hello-world").unwrap())
        .await
        .unwrap();

    assert_eq!(extract_title(&snapshot), "Hello, world");
    assert_eq!(snapshot.block_count(), 1);
    assert_eq!(snapshot.record_map(), &record_map_json("Hello, world", "First paragraph"));
}

#[tokio::test]
async fn decodes_error_body() {
    let stub = StubApi::spawn();
    let err = stub
        .client()
        .fetch_snapshot(&PostId::new("missing").unwrap())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    match err {
        AppError::ApiService { message, status, .. } => {
            assert_eq!(message, "No post missing");
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("expected ApiService, got {:?}", other),
    }
}

#[tokio::test]
async fn classifies_status_without_error_body() {
    let stub = StubApi::spawn();
    let err = stub
        .client()
        .fetch_snapshot(&PostId::new("flaky").unwrap())
        .await
        .unwrap_err();

    match err {
        AppError::ApiService { code, .. } => assert_eq!(code, ApiErrorCode::ServiceUnavailable),
        other => panic!("expected ApiService, got {:?}", other),
    }
}

#[tokio::test]
async fn rejects_non_json_success_body() {
    let stub = StubApi::spawn();
    let err = stub
        .client()
        .fetch_snapshot(&PostId::new("garbled").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(_)), "got {:?}", err);
}
