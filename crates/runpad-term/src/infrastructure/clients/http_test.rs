use mockito::Matcher;

use super::HttpRunner;
use crate::domain::models::RunJob;
use crate::domain::models::RunnerClient;

fn job() -> RunJob {
    RunJob {
        code: "int main() {}".to_string(),
        input: "20\n3".to_string(),
    }
}

#[tokio::test]
async fn test_run_returns_output_field() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/run")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "code": "int main() {}",
            "input": "20\n3"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"output": "Quotient = 6\nRemainder = 2\n"}"#)
        .create_async()
        .await;

    let runner = HttpRunner::with_url(&server.url());
    let output = runner.run(job()).await.unwrap();

    assert_eq!(output, "Quotient = 6\nRemainder = 2\n");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_run_substitutes_no_output_when_field_missing() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/run")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"exit_code": 0}"#)
        .create_async()
        .await;

    let runner = HttpRunner::with_url(&server.url());
    assert_eq!(runner.run(job()).await.unwrap(), "No output");
}

#[tokio::test]
async fn test_run_substitutes_no_output_when_field_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/run")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"output": ""}"#)
        .create_async()
        .await;

    let runner = HttpRunner::with_url(&server.url());
    assert_eq!(runner.run(job()).await.unwrap(), "No output");
}

#[tokio::test]
async fn test_run_tolerates_malformed_timeout_value() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/run")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"output": "ok"}"#)
        .create_async()
        .await;

    let runner = HttpRunner {
        url: server.url(),
        timeout: "soon".to_string(),
    };

    assert_eq!(runner.run(job()).await.unwrap(), "ok");
}

#[tokio::test]
async fn test_run_maps_error_status_regardless_of_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/run")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"output": "ignored"}"#)
        .create_async()
        .await;

    let runner = HttpRunner::with_url(&server.url());
    let err = runner.run(job()).await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! Status: 500");
}

#[tokio::test]
async fn test_run_fails_on_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/run")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json")
        .create_async()
        .await;

    let runner = HttpRunner::with_url(&server.url());
    assert!(runner.run(job()).await.is_err());
}

#[tokio::test]
async fn test_health_check_passes_on_success_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let runner = HttpRunner::with_url(&server.url());
    assert!(runner.health_check().await.is_ok());
}

#[tokio::test]
async fn test_health_check_fails_on_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(503)
        .create_async()
        .await;

    let runner = HttpRunner::with_url(&server.url());
    let err = runner.health_check().await.unwrap_err();

    assert_eq!(err.to_string(), "runner health check failed");
}

#[tokio::test]
async fn test_health_check_requires_url() {
    let runner = HttpRunner {
        url: "".to_string(),
        timeout: "1000".to_string(),
    };

    assert!(runner.health_check().await.is_err());
}
