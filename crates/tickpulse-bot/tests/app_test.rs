//! End-to-end: mock feed -> Application -> broadcaster subscriber.

mod integration;
use integration::common::mock_feed::{MockFeedServer, Script};

use std::time::Duration;
use tickpulse_bot::{AppConfig, Application};
use tokio::time::timeout;

#[tokio::test]
async fn test_ticks_become_published_events() {
    let server = MockFeedServer::start(vec![Script::stream(&[
        10.00, 10.11, 10.11, 10.20, 10.30, 10.40, 10.50,
    ])])
    .await;

    let mut config = AppConfig::default();
    config.feed.ws_url = server.url();
    config.feed.reconnect_delay_ms = 50;
    config.feed.heartbeat_interval_ms = 0;
    config.detector.cooldown_ms = 0;
    config.trade.ticks_per_trade = 3;
    config.dashboard.enabled = false;

    let app = Application::new(config).unwrap();
    let mut subscription = app.broadcaster().register();
    let shutdown = app.shutdown_token();
    let handle = tokio::spawn(app.run());

    let mut events = Vec::new();
    timeout(Duration::from_secs(5), async {
        while events.len() < 5 {
            let msg = subscription.receiver.recv().await.unwrap();
            let value: serde_json::Value = serde_json::from_str(&msg).unwrap();
            events.push(value);
        }
    })
    .await
    .expect("events not published in time");

    let kinds: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["SIGNAL", "SIGNAL", "SIGNAL", "TRADE_RESULT", "SIGNAL"]);

    assert_eq!(events[0]["price"], serde_json::json!(10.11));
    assert_eq!(events[0]["pattern"], serde_json::json!([1, 1]));

    let result = &events[3];
    assert_eq!(result["startPrice"], serde_json::json!(10.11));
    assert_eq!(result["prices"], serde_json::json!([10.2, 10.3, 10.4]));
    assert_eq!(result["upperBarrier"], serde_json::json!(12.11));
    assert_eq!(result["lowerBarrier"], serde_json::json!(9.21));
    assert_eq!(result["outcome"], "WIN");
    assert!(result["timestamp"].is_i64());

    shutdown.cancel();
    let outcome = timeout(Duration::from_secs(10), handle).await.unwrap().unwrap();
    assert!(outcome.is_ok());
    server.shutdown().await;
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = AppConfig::default();
    config.trade.ticks_per_trade = 0;
    assert!(Application::new(config).is_err());
}

#[tokio::test]
async fn test_out_of_range_quotes_are_skipped() {
    let server =
        MockFeedServer::start(vec![Script::stream(&[1e20, 1e20, 1e20, 10.00, 10.11, 10.11])]).await;

    let mut config = AppConfig::default();
    config.feed.ws_url = server.url();
    config.feed.heartbeat_interval_ms = 0;
    config.detector.cooldown_ms = 0;
    config.trade.ticks_per_trade = 1;
    config.dashboard.enabled = false;

    let app = Application::new(config).unwrap();
    let mut subscription = app.broadcaster().register();
    let shutdown = app.shutdown_token();
    let handle = tokio::spawn(app.run());

    let msg = timeout(Duration::from_secs(5), subscription.receiver.recv())
        .await
        .expect("no event published")
        .unwrap();
    let event: serde_json::Value = serde_json::from_str(&msg).unwrap();
    assert_eq!(event["type"], "SIGNAL");
    assert_eq!(event["price"], serde_json::json!(10.11));

    shutdown.cancel();
    let outcome = timeout(Duration::from_secs(10), handle).await.unwrap().unwrap();
    assert!(outcome.is_ok());
    server.shutdown().await;
}
