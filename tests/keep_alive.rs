//! Keep-alive pinger against a mock backend.
#![cfg(feature = "async")]

use std::sync::Arc;
use std::time::Duration;

use finanzas_rs::client::FinanzasClient;
use finanzas_rs::keep_alive::KeepAlive;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn health_hits(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/health")
        .count()
}

fn client_for(server: &MockServer) -> Arc<FinanzasClient> {
    Arc::new(
        FinanzasClient::builder()
            .token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap(),
    )
}

#[tokio::test]
async fn pings_immediately_and_repeatedly_until_stopped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let keep_alive = KeepAlive::start(client_for(&server), Duration::from_millis(50));
    assert!(keep_alive.is_running());
    tokio::time::sleep(Duration::from_millis(180)).await;
    keep_alive.stop().await;

    let hits = health_hits(&server).await;
    assert!(hits >= 2, "expected at least two pings, got {hits}");

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(health_hits(&server).await, hits);
}

#[tokio::test]
async fn failed_pings_do_not_stop_the_loop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let keep_alive = KeepAlive::start(client_for(&server), Duration::from_millis(40));
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(keep_alive.is_running());
    keep_alive.stop().await;

    assert!(health_hits(&server).await >= 2);
}

#[tokio::test]
async fn dropping_the_handle_stops_pinging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let keep_alive = KeepAlive::start(client_for(&server), Duration::from_millis(30));
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(keep_alive);
    tokio::time::sleep(Duration::from_millis(20)).await;

    let hits = health_hits(&server).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(health_hits(&server).await, hits);
}

#[tokio::test]
async fn stop_interrupts_a_stalled_ping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let keep_alive = KeepAlive::start(client_for(&server), Duration::from_secs(60));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(health_hits(&server).await, 1);

    let started = tokio::time::Instant::now();
    keep_alive.stop().await;
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "stop took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn zero_interval_keeps_pinging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let keep_alive = KeepAlive::start(client_for(&server), Duration::ZERO);
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(keep_alive.is_running());
    keep_alive.stop().await;

    assert!(health_hits(&server).await >= 2);
}
