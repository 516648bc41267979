use std::time::Duration;

use codecraft::runner::{Executor, HttpExecutor, TransportError};
use codecraft::types::RunRequest;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{closed_endpoint, endpoint, mock_service, slow_service};

fn request() -> RunRequest {
    RunRequest {
        code: "#include <iostream>\nint main() { int x; std::cin >> x; std::cout << x; }"
            .to_owned(),
        language: "cpp".to_owned(),
        inputs: "5\n".to_owned(),
    }
}

#[tokio::test]
async fn test_sends_code_language_and_inputs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/run"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "code": request().code,
            "language": "cpp",
            "inputs": "5\n",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"output": "5"})))
        .expect(1)
        .mount(&server)
        .await;

    let executor = HttpExecutor::new(endpoint(&server), None).unwrap();
    let response = executor.execute(&request()).await.expect("Request failed");

    assert_eq!(response.output.as_deref(), Some("5"));
    server.verify().await;
}

#[tokio::test]
async fn test_error_field_is_returned() {
    let server = mock_service(200, r#"{"error": "syntax error at line 3"}"#).await;
    let executor = HttpExecutor::new(endpoint(&server), None).unwrap();

    let response = executor.execute(&request()).await.expect("Request failed");
    assert_eq!(response.error.as_deref(), Some("syntax error at line 3"));
    assert!(response.output.is_none());
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let server = mock_service(500, r#"{"output": "ignored"}"#).await;
    let executor = HttpExecutor::new(endpoint(&server), None).unwrap();

    let err = executor.execute(&request()).await.unwrap_err();
    match err {
        TransportError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("ignored"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_transport_error() {
    let server = mock_service(200, "<html>gateway</html>").await;
    let executor = HttpExecutor::new(endpoint(&server), None).unwrap();

    let err = executor.execute(&request()).await.unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let executor = HttpExecutor::new(closed_endpoint().await, None).unwrap();

    let err = executor.execute(&request()).await.unwrap_err();
    assert!(matches!(err, TransportError::Request(_)));
    assert!(!err.describe().is_empty());
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = slow_service(Duration::from_secs(5)).await;
    let executor =
        HttpExecutor::new(endpoint(&server), Some(Duration::from_millis(200))).unwrap();

    let err = executor.execute(&request()).await.unwrap_err();
    match err {
        TransportError::Request(ref e) => assert!(e.is_timeout()),
        ref other => panic!("expected Request error, got {other:?}"),
    }
}
