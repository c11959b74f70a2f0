/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for mexc-futures-adapter tests

use mexc_futures_adapter::{ClientConfig, Credentials, MexcClient};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "mx0-test-key";
pub const TEST_API_SECRET: &str = "test_secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_API_SECRET)
}

/// Client pointed at the mock server
pub fn mock_client(server: &MockServer, credentials: Option<Credentials>) -> MexcClient {
    MexcClient::with_config_and_base_url(ClientConfig::default(), &server.uri(), credentials)
        .expect("client init")
}

/// `count` ascending 15 minute kline rows starting at `start`
#[allow(dead_code)]
pub fn kline_rows(start: i64, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let open = 100.0 + i as f64 * 0.1;
            json!([
                start + i as i64 * 900,
                format!("{open:.1}"),
                format!("{:.1}", open + 0.5),
                format!("{:.1}", open - 0.5),
                format!("{:.2}", open + 0.05),
                format!("{}", 1000 + i)
            ])
        })
        .collect()
}

/// Success envelope around `data`
pub fn ok_envelope(data: Value) -> Value {
    json!({"code": 200, "msg": "success", "data": data})
}
