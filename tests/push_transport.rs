//! Pushgateway client behavior against a real local socket.

use etlsim::domain::errors::PushError;
use etlsim::infrastructure::observability::{EtlMetrics, MetricsPusher, PushgatewayClient};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::oneshot;

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// Accepts exactly one HTTP request, replies with the given status line,
// and hands the raw request back to the test.
async fn one_shot_server(status: &'static str) -> (SocketAddr, oneshot::Receiver<String>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            if let Some(pos) = find_subsequence(&data, b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&data[..pos]).to_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= pos + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        let _ = tx.send(String::from_utf8_lossy(&data).to_string());
    });

    (addr, rx)
}

#[tokio::test]
async fn accepted_push_posts_the_text_exposition() {
    let (addr, request_rx) = one_shot_server("200 OK").await;
    let client = PushgatewayClient::new(&format!("http://{addr}"), "pushgateway");

    let metrics = EtlMetrics::new().expect("Failed to create metrics");
    metrics.records.set(42.0);

    client
        .push_add(&metrics.snapshot())
        .await
        .expect("push should succeed");

    let request = request_rx.await.expect("request captured");
    assert!(request.starts_with("POST /metrics/job/pushgateway "));
    assert!(request.contains("text/plain; version=0.0.4"));
    assert!(request.contains("fs_etl_records_processed 42"));
    assert!(request.contains("fs_etl_success_timestamp_seconds"));
}

#[tokio::test]
async fn rejected_push_surfaces_the_status() {
    let (addr, _request_rx) = one_shot_server("400 Bad Request").await;
    let client = PushgatewayClient::new(&format!("http://{addr}"), "pushgateway");

    let metrics = EtlMetrics::new().expect("Failed to create metrics");
    let err = client
        .push_add(&metrics.snapshot())
        .await
        .expect_err("push should be rejected");

    match err {
        PushError::Rejected { status } => assert_eq!(status.as_u16(), 400),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_gateway_is_a_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = PushgatewayClient::new(&format!("http://{addr}"), "pushgateway");
    let metrics = EtlMetrics::new().expect("Failed to create metrics");

    let err = client
        .push_add(&metrics.snapshot())
        .await
        .expect_err("push should fail");
    assert!(matches!(err, PushError::Transport(_)));
}
