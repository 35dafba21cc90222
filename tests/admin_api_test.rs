use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tidewire::{admin, server, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[tokio::test]
async fn api_versions_endpoint_lists_advertised_table() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let admin = tokio::spawn(async move {
        admin::run_admin_api_on_listener(listener).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(150)).await;

    let apis: Vec<Value> = reqwest::get(format!("http://{}/api-versions", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(apis.len(), 2);
    assert_eq!(apis[0]["api_key"], 18);
    assert_eq!(apis[0]["name"], "ApiVersions");
    assert_eq!(apis[0]["max_version"], 4);
    assert_eq!(apis[1]["api_key"], 75);
    assert_eq!(apis[1]["min_version"], 0);
    assert_eq!(apis[1]["max_version"], 0);

    admin.abort();
}

#[tokio::test]
async fn metrics_endpoint_counts_served_requests() {
    let kafka_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let kafka_addr = kafka_listener.local_addr().unwrap();
    let kafka = tokio::spawn(async move {
        server::run_server_on_listener(Arc::new(ServerConfig::default()), kafka_listener)
            .await
            .unwrap();
    });

    let admin_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let admin_addr = admin_listener.local_addr().unwrap();
    let admin = tokio::spawn(async move {
        admin::run_admin_api_on_listener(admin_listener).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(150)).await;

    // ApiVersions v99 -> unsupported version response
    let mut stream = TcpStream::connect(kafka_addr).await.unwrap();
    stream
        .write_all(&[0, 0, 0, 10, 0, 18, 0, 99, 0, 0, 0, 1, 0, 0])
        .await
        .unwrap();
    let len = stream.read_u32().await.unwrap();
    assert_eq!(len, 6);
    let mut resp = [0u8; 6];
    stream.read_exact(&mut resp).await.unwrap();

    let body = reqwest::get(format!("http://{}/metrics", admin_addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("# TYPE tidewire_requests_total counter"));
    assert!(body.contains("tidewire_frames_dropped_total"));
    assert!(body.contains("tidewire_request_latency_p99_us"));
    let unsupported: u64 = body
        .lines()
        .find_map(|l| l.strip_prefix("tidewire_unsupported_version_responses_total "))
        .and_then(|v| v.parse().ok())
        .unwrap();
    assert!(unsupported >= 1);

    kafka.abort();
    admin.abort();
}
