use std::sync::Arc;
use std::time::Duration;

use codecraft::runner::{Executor, HttpExecutor, RunController};
use codecraft::types::{RunOutcome, RunResult};

use super::{
    closed_endpoint, endpoint, memory_session, mock_service, received_body, slow_service,
};

#[tokio::test]
async fn test_hello_world_output() {
    let server = mock_service(200, r#"{"output": "Hello, World!"}"#).await;
    let controller = RunController::new(HttpExecutor::new(endpoint(&server), None).unwrap());
    let session = memory_session();

    let outcome = controller.run(&session).await;

    let session = session.lock().await;
    let result = session.result().expect("result should be stored");
    assert_eq!(outcome, RunOutcome::Completed(result.clone()));
    assert_eq!(result, &RunResult::Success("Hello, World!".to_owned()));
    assert_eq!(result.render(), "Hello, World!");
    assert!(!result.is_error_styled());
    assert!(!session.is_running());
}

#[tokio::test]
async fn test_compilation_error() {
    let server = mock_service(200, r#"{"error": "syntax error at line 3"}"#).await;
    let controller = RunController::new(HttpExecutor::new(endpoint(&server), None).unwrap());
    let session = memory_session();

    controller.run(&session).await;

    let session = session.lock().await;
    let result = session.result().expect("result should be stored");
    assert!(matches!(result, RunResult::CompilationError(_)));
    assert!(result.render().contains("syntax error at line 3"));
    assert!(result.render().starts_with("Compilation Error:"));
    assert!(result.is_error_styled());
    assert!(!session.is_running());
}

#[tokio::test]
async fn test_unreachable_service() {
    let endpoint = closed_endpoint().await;
    let executor = HttpExecutor::new(endpoint, None).unwrap();

    // Capture the failure description the controller will see
    let session = memory_session();
    let probe = session.lock().await.source_text().to_owned();
    let expected = executor
        .execute(&codecraft::RunRequest {
            code: probe,
            language: "cpp".to_owned(),
            inputs: String::new(),
        })
        .await
        .unwrap_err()
        .describe();

    let controller = RunController::new(executor);
    controller.run(&session).await;

    let session = session.lock().await;
    let result = session.result().expect("result should be stored");
    assert!(matches!(result, RunResult::TransportError(_)));
    assert!(result.render().starts_with("Error executing code: "));
    assert!(result.render().contains(&expected));
    assert!(result.is_error_styled());
    assert!(!session.is_running());
}

#[tokio::test]
async fn test_server_error_status() {
    let server = mock_service(503, "busy").await;
    let controller = RunController::new(HttpExecutor::new(endpoint(&server), None).unwrap());
    let session = memory_session();

    controller.run(&session).await;

    let session = session.lock().await;
    let result = session.result().expect("result should be stored");
    assert!(matches!(result, RunResult::TransportError(_)));
    assert!(result.render().contains("503"));
    assert!(!session.is_running());
}

#[tokio::test]
async fn test_second_run_rejected_while_request_outstanding() {
    let server = slow_service(Duration::from_secs(5)).await;
    let controller = Arc::new(RunController::new(
        HttpExecutor::new(endpoint(&server), Some(Duration::from_millis(500))).unwrap(),
    ));
    let session = memory_session();

    let first = controller.spawn(session.clone());

    // Wait until the first run has claimed the session
    while !session.lock().await.is_running() {
        tokio::task::yield_now().await;
    }

    assert_eq!(controller.run(&session).await, RunOutcome::AlreadyRunning);
    assert!(session.lock().await.result().is_none());

    // The timeout resolves the first run as a transport error
    let outcome = first.await.unwrap();
    assert!(matches!(
        outcome,
        RunOutcome::Completed(RunResult::TransportError(_))
    ));
    assert!(!session.lock().await.is_running());
}

#[tokio::test]
async fn test_program_input_reaches_service() {
    let server = mock_service(200, r#"{"output": "10"}"#).await;
    let controller = RunController::new(HttpExecutor::new(endpoint(&server), None).unwrap());
    let session = memory_session();
    {
        let mut session = session.lock().await;
        session.set_language("java").unwrap();
        session.set_program_input("4 6\n");
    }

    controller.run(&session).await;

    let body = received_body(&server).await;
    assert_eq!(body["language"], "java");
    assert_eq!(body["inputs"], "4 6\n");
    assert!(body["code"].as_str().unwrap().contains("public class Main"));
}
