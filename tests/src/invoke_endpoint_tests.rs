//! Tests of the function-platform `POST /invoke` surface and `GET /health`.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use webhook_relay::{Config, OutboundResponse};
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

use crate::utils::{app_with, bearer, relay_app, relay_body, send};

fn invoke(event: serde_json::Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri("/invoke")
        .header("content-type", "application/json")
        .body(Body::from(event.to_string()))?)
}

async fn invoke_result(app: axum::Router, event: serde_json::Value) -> Result<OutboundResponse> {
    let (status, body) = send(app, invoke(event)?).await?;
    assert_eq!(status, StatusCode::OK, "invoke transport status");
    Ok(serde_json::from_str(&body)?)
}

#[tokio::test]
async fn test_invoke_relays_and_wraps_result() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/hook"))
        .and(matchers::body_json(serde_json::json!({ "content": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let event = serde_json::json!({
        "headers": { "authorization": bearer() },
        "body": relay_body(&format!("{}/hook", server.uri()), "hello"),
    });

    let result = invoke_result(relay_app()?, event).await?;
    assert_eq!(result, OutboundResponse::new(200, "ok"));
    Ok(())
}

#[tokio::test]
async fn test_invoke_header_name_case_is_ignored() -> Result<()> {
    let event = serde_json::json!({
        "headers": { "Authorization": bearer() },
        "body": "{}",
    });

    let result = invoke_result(relay_app()?, event).await?;
    assert_eq!(
        result,
        OutboundResponse::new(400, "Bad Request: missing field `webhook_url`")
    );
    Ok(())
}

#[tokio::test]
async fn test_invoke_without_headers_is_forbidden() -> Result<()> {
    let result = invoke_result(relay_app()?, serde_json::json!({})).await?;
    assert_eq!(result, OutboundResponse::new(403, "403 Forbidden"));
    Ok(())
}

#[tokio::test]
async fn test_invoke_null_body_reads_as_empty_object() -> Result<()> {
    let event = serde_json::json!({
        "headers": { "authorization": bearer() },
        "body": null,
    });

    let result = invoke_result(relay_app()?, event).await?;
    assert_eq!(result.status_code, 400);
    assert!(result.body.contains("webhook_url"));
    Ok(())
}

#[tokio::test]
async fn test_invoke_empty_string_body_is_parse_error() -> Result<()> {
    let event = serde_json::json!({
        "headers": { "authorization": bearer() },
        "body": "",
    });

    let result = invoke_result(relay_app()?, event).await?;
    assert_eq!(result.status_code, 400);
    assert!(result.body.starts_with("Bad Request: "));
    assert!(!result.body.contains("missing field"), "{}", result.body);
    Ok(())
}

#[tokio::test]
async fn test_invoke_exact_authorization_key_wins() -> Result<()> {
    let event = serde_json::json!({
        "headers": {
            "Authorization": "Bearer wrong",
            "authorization": bearer(),
        },
        "body": "{}",
    });

    for _ in 0..16 {
        let result = invoke_result(relay_app()?, event.clone()).await?;
        assert_eq!(
            result,
            OutboundResponse::new(400, "Bad Request: missing field `webhook_url`")
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_invoke_unset_secret() -> Result<()> {
    let event = serde_json::json!({ "headers": { "authorization": "Bearer " } });
    let result = invoke_result(app_with(Config::default())?, event).await?;
    assert_eq!(result, OutboundResponse::new(500, "Server configuration error"));
    Ok(())
}

#[tokio::test]
async fn test_invoke_rejects_malformed_event() -> Result<()> {
    let request = Request::builder()
        .method("POST")
        .uri("/invoke")
        .header("content-type", "application/json")
        .body(Body::from("not json"))?;

    let (status, _) = send(relay_app()?, request).await?;
    assert!(status.is_client_error());
    Ok(())
}

#[tokio::test]
async fn test_health_reports_configuration() -> Result<()> {
    let get = || Request::builder().uri("/health").body(Body::empty());

    let (status, body) = send(relay_app()?, get()?).await?;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["requests"], 0);

    let (_, body) = send(app_with(Config::default())?, get()?).await?;
    let json: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(json["status"], "misconfigured");
    Ok(())
}
