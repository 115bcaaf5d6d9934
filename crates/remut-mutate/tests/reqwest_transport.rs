//! `ReqwestTransport` against a one-shot local HTTP server.

#![cfg(feature = "reqwest")]

use remut_mutate::{
    Error, Headers, MutationConfig, Mutation, RequestDescriptor, ReqwestTransport, Scope,
    Transport, Verb,
};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serve one connection with `reply` and hand back the raw request text.
async fn serve_once(reply: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }
        stream.write_all(reply.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
    });

    (format!("http://{addr}"), rx)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(head_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..head_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    raw.len() >= head_end + 4 + content_length
}

#[tokio::test]
async fn test_sends_method_headers_and_body() {
    let (base, request) =
        serve_once("HTTP/1.1 201 Created\r\ncontent-length: 2\r\nx-trace: abc\r\n\r\nok").await;
    let transport = ReqwestTransport::new().unwrap();

    let headers: Headers = [("content-type", "application/json"), ("x-client", "remut")]
        .into_iter()
        .collect();
    let descriptor = RequestDescriptor {
        method: Verb::Put,
        url: format!("{base}/widgets/7"),
        headers,
        body: Some(json!({"name": "x"}).to_string()),
        timeout: None,
        credentials: None,
    };

    let response = transport.send(&descriptor).await.unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.status_text, "Created");
    assert_eq!(response.headers.get("x-trace").and_then(|v| v.to_str().ok()), Some("abc"));
    assert_eq!(response.text(), "ok");

    let raw = request.await.unwrap();
    assert!(raw.starts_with("PUT /widgets/7 HTTP/1.1"));
    assert!(raw.to_ascii_lowercase().contains("x-client: remut"));
    assert!(raw.ends_with(r#"{"name":"x"}"#));
}

#[tokio::test]
async fn test_error_status_flows_into_mutation_state() {
    let (base, _request) = serve_once(
        "HTTP/1.1 422 Unprocessable Entity\r\ncontent-type: application/json\r\ncontent-length: 16\r\n\r\n{\"field\":\"name\"}",
    )
    .await;
    let mutation = Mutation::new(
        ReqwestTransport::new().unwrap(),
        Scope::root(base),
        MutationConfig::new(Verb::Post).path("widgets"),
    );

    let err = mutation.mutate(Some(json!({}).into()), None).await.unwrap_err();
    assert!(matches!(err, Error::Status(_)));
    assert_eq!(err.status(), Some(422));

    let error = mutation.states().error.unwrap();
    assert_eq!(error.data, json!({"field": "name"}));
    assert_eq!(error.message, "Failed to fetch: 422 Unprocessable Entity");
}

#[tokio::test]
async fn test_custom_reason_phrase_is_published() {
    let (base, _request) =
        serve_once("HTTP/1.1 404 Widget Missing\r\ncontent-length: 0\r\n\r\n").await;
    let mutation = Mutation::new(
        ReqwestTransport::new().unwrap(),
        Scope::root(base),
        MutationConfig::new(Verb::Delete).path("widgets"),
    );

    let err = mutation.mutate(Some("7".into()), None).await.unwrap_err();
    assert_eq!(err.response().unwrap().status_text, "Widget Missing");
    assert_eq!(mutation.states().error.unwrap().message, "Failed to fetch: 404 Widget Missing");
}

#[tokio::test]
async fn test_reason_phrase_for_unregistered_status() {
    let (base, _request) =
        serve_once("HTTP/1.1 499 Client Closed\r\ncontent-length: 0\r\n\r\n").await;
    let descriptor = RequestDescriptor {
        method: Verb::Post,
        url: format!("{base}/widgets"),
        headers: Headers::new(),
        body: None,
        timeout: None,
        credentials: None,
    };

    let response = ReqwestTransport::new().unwrap().send(&descriptor).await.unwrap();
    assert_eq!(response.status, 499);
    assert_eq!(response.status_text, "Client Closed");
}

#[tokio::test]
async fn test_repeated_and_opaque_headers_are_kept() {
    let (base, _request) = serve_once(
        "HTTP/1.1 200 OK\r\nset-cookie: a=1\r\nset-cookie: b=2\r\nx-name: caf\u{e9}\r\ncontent-length: 0\r\n\r\n",
    )
    .await;
    let descriptor = RequestDescriptor {
        method: Verb::Post,
        url: format!("{base}/session"),
        headers: Headers::new(),
        body: None,
        timeout: None,
        credentials: None,
    };

    let response = ReqwestTransport::new().unwrap().send(&descriptor).await.unwrap();
    let cookies: Vec<_> = response.headers.get_all("set-cookie").iter().collect();
    assert_eq!(cookies, ["a=1", "b=2"]);
    assert_eq!(response.headers.get("x-name").unwrap().as_bytes(), "caf\u{e9}".as_bytes());
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mutation = Mutation::new(
        ReqwestTransport::new().unwrap(),
        Scope::root(format!("http://{addr}")),
        MutationConfig::new(Verb::Delete),
    );

    let err = mutation.mutate(Some("1".into()), None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
