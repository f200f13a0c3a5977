//! `HttpBotApi` and `BotStore` against a mocked bot server.

use std::sync::Arc;
use std::time::Duration;

use metron::adapter::outbound::HttpBotApi;
use metron::application::{ActionOutcome, BotStore};
use metron::domain::{BotConfig, BotRunStatus, ExchangeKind, StrategyMode};
use metron::error::ApiError;
use metron::port::{BotApi, Endpoint, NotificationLevel};
use metron::testkit::notifier::RecordingNotifier;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpBotApi {
    HttpBotApi::new(&server.uri()).unwrap()
}

fn store_for(server: &MockServer) -> (BotStore, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let store = BotStore::new(Arc::new(api_for(server)), notifier.clone());
    (store, notifier)
}

// ==================== Adapter ====================

#[tokio::test]
async fn fetch_status_decodes_wire_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "botStatus": "running",
            "pnL": -12.5,
            "marketOpen": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = api_for(&server).fetch_status().await.unwrap();

    assert_eq!(report.status, BotRunStatus::Running);
    assert_eq!(report.pnl, dec!(-12.5));
    assert!(!report.market_open);
}

#[tokio::test]
async fn fetch_config_decodes_camel_case() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "exchangeType": "forex",
            "exchangeName": "OANDA",
            "riskLimit": 1.5,
            "maxDrawdown": 10,
            "strategyMode": "ai"
        })))
        .mount(&server)
        .await;

    let config = api_for(&server).fetch_config().await.unwrap();

    assert_eq!(config.exchange_type, ExchangeKind::Forex);
    assert_eq!(config.exchange_name, "OANDA");
    assert_eq!(config.risk_limit, dec!(1.5));
    assert_eq!(config.max_drawdown, dec!(10));
    assert_eq!(config.strategy_mode, StrategyMode::Ai);
}

#[tokio::test]
async fn save_config_posts_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/config"))
        .and(body_json(json!({
            "exchangeType": "crypto",
            "exchangeName": "Binance",
            "riskLimit": 2.0,
            "maxDrawdown": 20.0,
            "strategyMode": "hybrid"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = api_for(&server).save_config(&BotConfig::default()).await.unwrap();

    assert_eq!(reply["message"], "ok");
}

#[tokio::test]
async fn non_success_status_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bot/start"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = api_for(&server).start_bot().await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Status {
            endpoint: Endpoint::StartBot,
            status: 500
        }
    ));
}

#[tokio::test]
async fn missing_field_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "botStatus": "running" })))
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_status().await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Decode {
            endpoint: Endpoint::Status,
            ..
        }
    ));
}

#[tokio::test]
async fn unknown_status_label_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "botStatus": "paused",
            "pnL": 0,
            "marketOpen": true
        })))
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_status().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn base_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/metron/api/bot/kill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpBotApi::new(&format!("{}/metron", server.uri())).unwrap();

    api.kill_bot().await.unwrap();
}

// ==================== Store over HTTP ====================

#[tokio::test]
async fn failed_start_goes_initializing_then_stopped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bot/start"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;
    let (store, notifier) = store_for(&server);
    assert_eq!(store.status(), BotRunStatus::Stopped);

    let (outcome, ()) = tokio::join!(store.start_bot(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.status(), BotRunStatus::Initializing);
        assert!(store.is_loading_bot());
    });

    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(store.status(), BotRunStatus::Stopped);
    assert!(!store.is_loading_bot());
    assert_eq!(
        notifier.messages(),
        vec![(NotificationLevel::Error, "Failed to start bot".to_string())]
    );
}

#[tokio::test]
async fn successful_kill_notifies_and_stops() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bot/kill"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Kill switch activated" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (store, notifier) = store_for(&server);
    store.set_status(BotRunStatus::Running);

    let outcome = store.kill_bot().await;

    assert!(outcome.is_completed());
    assert_eq!(store.status(), BotRunStatus::Stopped);
    assert_eq!(
        notifier.messages(),
        vec![(NotificationLevel::Success, "Kill switch activated!".to_string())]
    );
}

#[tokio::test]
async fn poll_applies_server_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "botStatus": "error",
            "pnL": 7.25,
            "marketOpen": false
        })))
        .mount(&server)
        .await;
    let (store, notifier) = store_for(&server);

    assert!(store.poll_status().await.is_completed());

    assert_eq!(store.status(), BotRunStatus::Error);
    assert_eq!(store.pnl(), dec!(7.25));
    assert!(!store.is_market_open());
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn poll_server_error_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (store, notifier) = store_for(&server);
    let before = store.snapshot();

    assert_eq!(store.poll_status().await, ActionOutcome::Failed);

    assert_eq!(store.snapshot(), before);
    assert!(notifier.is_empty());
}
