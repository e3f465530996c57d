// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! BibleClient against a local canned HTTP responder.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use bible_mcp::bible::{BibleClient, ScriptureSource};
use bible_mcp::error::BibleError;

/// One canned reply: status line, content type, body.
type Reply = (&'static str, &'static str, &'static str);

/// Serve `reply` to every connection, recording request lines.
async fn responder(reply: Reply) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&seen);
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let log = Arc::clone(&log);
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&request);
                if let Some(line) = head.lines().next() {
                    log.lock().unwrap().push(line.to_string());
                }

                let (status, content_type, body) = reply;
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{addr}"), seen)
}

fn client(base: &str) -> BibleClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    BibleClient::with_http_client(http, base, &format!("{base}/data")).unwrap()
}

const JOHN_3_16: &str = r#"{"reference":"John 3:16","verses":[{"book_id":"JHN","book_name":"John","chapter":3,"verse":16,"text":"For God so loved the world\n"}],"text":"For God so loved the world\n","translation_id":"web","translation_name":"World English Bible"}"#;

// ============================================================================
// Success
// ============================================================================

#[tokio::test]
async fn test_passage_request_shape() {
    let (base, seen) = responder(("200 OK", "application/json", JOHN_3_16)).await;
    let value = client(&base)
        .fetch_passage("John 3:16", "kjv")
        .await
        .unwrap();

    assert_eq!(value["reference"], "John 3:16");
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], "GET /John%203:16?translation=kjv HTTP/1.1");
}

#[tokio::test]
async fn test_chapter_request_shape() {
    let body = r#"{"translation":{"identifier":"web","name":"World English Bible"},"verses":[{"book_id":"GEN","book":"Genesis","chapter":1,"verse":1,"text":"In the beginning"}]}"#;
    let (base, seen) = responder(("200 OK", "application/json", body)).await;
    let value = client(&base).fetch_chapter("web", "GEN", 1).await.unwrap();

    assert_eq!(value["verses"][0]["book"], "Genesis");
    assert_eq!(
        seen.lock().unwrap()[0],
        "GET /data/web/GEN/1 HTTP/1.1"
    );
}

#[tokio::test]
async fn test_structured_lookup_routes_single_chapter_books_to_passage() {
    let body = r#"{"reference":"Jude 1:1","text":"Jude, a servant of Jesus Christ\n","translation_name":"World English Bible"}"#;
    let (base, seen) = responder(("200 OK", "application/json", body)).await;
    let client = client(&base);

    let value = client
        .get_by_book_chapter_verse("web", "JUD", 1, None)
        .await
        .unwrap();
    assert_eq!(value["reference"], "Jude 1:1");

    client
        .get_by_book_chapter_verse("web", "jud", 1, Some(5))
        .await
        .unwrap();
    client
        .get_by_book_chapter_verse("kjv", "GEN", 1, None)
        .await
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "GET /JUD%201?translation=web HTTP/1.1",
            "GET /JUD%205?translation=web HTTP/1.1",
            "GET /data/kjv/GEN/1 HTTP/1.1",
        ]
    );
}

#[tokio::test]
async fn test_structured_lookup_validates_before_sending() {
    let (base, seen) = responder(("200 OK", "application/json", JOHN_3_16)).await;
    let client = client(&base);

    let err = client
        .get_by_book_chapter_verse("web", "GEN", 51, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BibleError::Validation(_)), "{err:?}");

    let err = client
        .get_by_book_chapter_verse("web", "JHN", 3, Some(0))
        .await
        .unwrap_err();
    assert!(matches!(err, BibleError::Validation(_)), "{err:?}");

    assert!(seen.lock().unwrap().is_empty());
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_not_found_uses_upstream_message() {
    let (base, _) = responder((
        "404 Not Found",
        "application/json",
        r#"{"error":"not found"}"#,
    ))
    .await;
    let err = client(&base)
        .fetch_passage("Hezekiah 1:1", "web")
        .await
        .unwrap_err();

    match err {
        BibleError::Upstream { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_keeps_raw_body() {
    let (base, _) = responder(("500 Internal Server Error", "text/plain", "boom")).await;
    let err = client(&base).fetch_chapter("web", "GEN", 1).await.unwrap_err();

    assert!(matches!(err, BibleError::Upstream { status: 500, ref body } if body == "boom"));
    assert_eq!(err.to_string(), "Upstream returned HTTP 500: boom");
}

#[tokio::test]
async fn test_html_body_is_decode_error() {
    let (base, _) = responder(("200 OK", "text/html", "<html>maintenance</html>")).await;
    let err = client(&base)
        .fetch_passage("John 3:16", "web")
        .await
        .unwrap_err();

    assert!(matches!(err, BibleError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn test_non_object_body_is_decode_error() {
    let (base, _) = responder(("200 OK", "application/json", "[1,2,3]")).await;
    let err = client(&base)
        .fetch_passage("John 3:16", "web")
        .await
        .unwrap_err();

    assert!(matches!(err, BibleError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .fetch_passage("John 3:16", "web")
        .await
        .unwrap_err();

    assert!(matches!(err, BibleError::Network(_)), "{err:?}");
}
