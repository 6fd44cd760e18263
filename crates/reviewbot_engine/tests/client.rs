use std::time::Duration;

use pretty_assertions::assert_eq;
use reviewbot_engine::{ApiFailure, ClientSettings, ReqwestStatusApi, StatusApi};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestStatusApi {
    let settings = ClientSettings {
        endpoint: format!("{}/statuses", server.uri()),
        ..ClientSettings::default()
    };
    ReqwestStatusApi::new(settings, "secret").expect("client builds")
}

#[tokio::test]
async fn sends_oauth_header_and_cursor_query() {
    let server = MockServer::start().await;
    let payload = json!({"homeworks": [], "current_date": 1_700_000_005});
    Mock::given(method("GET"))
        .and(path("/statuses"))
        .and(header("Authorization", "OAuth secret"))
        .and(query_param("from_date", "1700000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let value = api.fetch_statuses(1_700_000_000).await.expect("fetch ok");

    assert_eq!(value, payload);
}

#[tokio::test]
async fn non_ok_status_carries_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/statuses"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.fetch_statuses(0).await.unwrap_err();

    assert_eq!(err.kind, ApiFailure::HttpStatus(503));
    assert_eq!(err.message, "maintenance");
}

#[tokio::test]
async fn undecodable_body_is_reported_with_its_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.fetch_statuses(0).await.unwrap_err();

    assert_eq!(err.kind, ApiFailure::Decode);
    assert_eq!(err.message, "<html>oops</html>");
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/statuses"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        endpoint: format!("{}/statuses", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    };
    let api = ReqwestStatusApi::new(settings, "secret").expect("client builds");
    let err = api.fetch_statuses(0).await.unwrap_err();

    assert_eq!(err.kind, ApiFailure::Timeout);
}

#[tokio::test]
async fn refused_connection_is_a_network_failure() {
    let settings = ClientSettings {
        // Nothing listens on the discard port.
        endpoint: "http://127.0.0.1:9/statuses".to_string(),
        ..ClientSettings::default()
    };
    let api = ReqwestStatusApi::new(settings, "secret").expect("client builds");

    let err = api.fetch_statuses(0).await.unwrap_err();

    assert_eq!(err.kind, ApiFailure::Network);
}
