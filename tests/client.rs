use chrono::NaiveDate;
use serde_json::json;
use stepdiary::{ApiError, Client, StepError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-access-token";

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn client_for(server: &MockServer) -> Client {
    Client::new(TOKEN)
        .unwrap()
        .with_base_url(format!("{}/1/user/-", server.uri()))
}

#[tokio::test]
async fn fetches_step_series_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/user/-/activities/log/steps/date/2024-04-01/2024-04-03.json"))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "activities-log-steps": [
                { "dateTime": "2024-04-01", "value": "5400" },
                { "dateTime": "2024-04-02", "value": "12034" },
                { "dateTime": "2024-04-03", "value": "8000" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client_for(&server)
        .fetch_step_series(d(2024, 4, 1), d(2024, 4, 3))
        .await
        .expect("series should load");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].date, d(2024, 4, 2));
    assert_eq!(entries[1].steps, 12_034);
}

#[tokio::test]
async fn fetches_lifetime_and_daily_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/user/-/activities.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lifetime": { "tracker": { "steps": 9876543 } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1/user/-/activities/date/2024-04-03.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": { "steps": 8000 }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.fetch_lifetime_steps().await.unwrap(), 9_876_543);
    assert_eq!(client.fetch_daily_summary(d(2024, 4, 3)).await.unwrap(), 8000);
}

#[tokio::test]
async fn unauthorized_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{ "errorType": "expired_token", "message": "Access token expired" }],
            "success": false
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_lifetime_steps().await.unwrap_err();
    assert!(matches!(err, StepError::Api(ApiError::Unauthorized)));
}

#[tokio::test]
async fn rate_limit_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_daily_summary(d(2024, 4, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, StepError::Api(ApiError::RateLimited)));
}

#[tokio::test]
async fn inverted_range_is_rejected_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_step_series(d(2024, 4, 3), d(2024, 4, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, StepError::InvalidDateRange { .. }));
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_step_series(d(2024, 4, 1), d(2024, 4, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, StepError::InvalidResponse));
}

#[test]
fn parses_series_through_client() {
    let client = Client::new(TOKEN).unwrap();
    let entries = client
        .parse_step_series(r#"{"activities-log-steps":[{"dateTime":"2024-04-01","value":"77"}]}"#)
        .unwrap();
    assert_eq!(entries[0].steps, 77);
}
