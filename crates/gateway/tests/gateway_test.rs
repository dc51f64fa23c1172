use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use clinic_core::AnswerSegment;
use clinic_gateway::{
    clinic_catalog, ConversationScript, GatewayConfig, GatewayServer, KeywordResolver, Normalizer,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn server(config: GatewayConfig) -> GatewayServer {
    let resolver = Arc::new(KeywordResolver::new(
        clinic_catalog().unwrap(),
        Normalizer::default(),
    ));
    GatewayServer::new(config, resolver)
}

fn app() -> Router {
    server(GatewayConfig::default()).build_router()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_intent_endpoint() {
    let app = app();

    let (status, json) = send(&app, "POST", "/v1/intent", Some(json!({"message": "Kde jste?"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["intent"], "adresa");
    assert!(json["trace_id"].is_string());

    let (_, json) = send(&app, "POST", "/v1/intent", Some(json!({"message": "   "}))).await;
    assert!(json["intent"].is_null());
}

#[tokio::test]
async fn test_quick_replies_endpoint() {
    let (status, json) = send(&app(), "GET", "/v1/intents", None).await;
    assert_eq!(status, StatusCode::OK);
    let replies = json.as_array().unwrap();
    assert_eq!(replies.len(), 5);
    assert_eq!(replies[0]["id"], "adresa");
    assert_eq!(replies[2]["title"], "Ordinační hodiny");
}

#[tokio::test]
async fn test_answer_endpoint() {
    let app = app();

    let (status, json) = send(&app, "GET", "/v1/intents/kontakt/answer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["segments"][1]["type"], "link");
    assert_eq!(json["segments"][1]["href"], "tel:+420773595504");
    assert_eq!(json["rendered"][1]["kind"], "telephone");

    let (status, json) = send(&app, "GET", "/v1/intents/parkovani/answer", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "INTENT_NOT_FOUND");
}

#[tokio::test]
async fn test_session_greets_once() {
    let app = app();

    let (status, json) = send(&app, "POST", "/v1/sessions/s1/open", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "open");
    assert_eq!(json["messages"].as_array().unwrap().len(), 1);
    assert_eq!(json["messages"][0]["role"], "bot");

    let (_, json) = send(&app, "POST", "/v1/sessions/s1/close", None).await;
    assert_eq!(json["state"], "closed");

    let (_, json) = send(&app, "POST", "/v1/sessions/s1/open", None).await;
    assert!(json["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_session_messages() {
    let app = app();
    send(&app, "POST", "/v1/sessions/s2/open", None).await;

    let (status, json) = send(
        &app,
        "POST",
        "/v1/sessions/s2/messages",
        Some(json!({"text": "Jaké máte ordinační hodiny?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "bot");
    assert_eq!(messages[1]["content"].as_array().unwrap().last().unwrap()["href"], "hodiny.html");

    let (_, json) = send(
        &app,
        "POST",
        "/v1/sessions/s2/messages",
        Some(json!({"text": "xyzzy not a real topic"})),
    )
    .await;
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[1]["content"][0]["value"]
        .as_str()
        .unwrap()
        .starts_with("Tomu zatím nerozumím"));

    let (_, json) = send(
        &app,
        "POST",
        "/v1/sessions/s2/messages",
        Some(json!({"quick_reply": "zastup", "label": "Zastupování"})),
    )
    .await;
    assert_eq!(json["messages"][0]["content"][0]["value"], "Zastupování");

    let (status, json) = send(&app, "GET", "/v1/sessions/s2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["messages"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_blank_message_appends_nothing() {
    let app = app();
    let (status, json) = send(&app, "POST", "/v1/sessions/s3/messages", Some(json!({"text": "  "}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_message_without_payload_is_rejected() {
    let (status, json) = send(&app(), "POST", "/v1/sessions/s4/messages", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_unknown_session() {
    let (status, json) = send(&app(), "GET", "/v1/sessions/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn test_session_cap_evicts_least_recently_used() {
    let app = server(GatewayConfig {
        max_sessions: 2,
        ..Default::default()
    })
    .build_router();

    send(&app, "POST", "/v1/sessions/s0/open", None).await;
    send(&app, "POST", "/v1/sessions/s1/open", None).await;
    // Touch s0 so s1 becomes the least recently used.
    let (status, _) = send(&app, "GET", "/v1/sessions/s0", None).await;
    assert_eq!(status, StatusCode::OK);

    send(&app, "POST", "/v1/sessions/s2/open", None).await;

    let (status, _) = send(&app, "GET", "/v1/sessions/s1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", "/v1/sessions/s0", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/v1/sessions/s2", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_many_sessions_stay_bounded() {
    let app = server(GatewayConfig {
        max_sessions: 50,
        ..Default::default()
    })
    .build_router();

    for i in 0..500 {
        send(&app, "POST", &format!("/v1/sessions/s{i}/open"), None).await;
    }

    let (status, _) = send(&app, "GET", "/v1/sessions/s0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", "/v1/sessions/s499", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_idle_sessions_expire() {
    let app = server(GatewayConfig {
        session_ttl: Duration::ZERO,
        ..Default::default()
    })
    .build_router();

    let (_, json) = send(&app, "POST", "/v1/sessions/idle/open", None).await;
    assert_eq!(json["messages"].as_array().unwrap().len(), 1);

    let (status, json) = send(&app, "GET", "/v1/sessions/idle", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "SESSION_NOT_FOUND");

    // An expired session starts over and greets again.
    let (_, json) = send(&app, "POST", "/v1/sessions/idle/open", None).await;
    assert_eq!(json["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_script_applies_after_router_was_built() {
    let server = server(GatewayConfig::default());
    let _first = server.build_router();

    let app = server
        .with_script(ConversationScript {
            greeting: vec![AnswerSegment::text("Vítejte")],
            fallback: vec![AnswerSegment::text("Nevím.")],
        })
        .build_router();

    let (_, json) = send(&app, "POST", "/v1/sessions/s5/open", None).await;
    assert_eq!(json["messages"][0]["content"][0]["value"], "Vítejte");
}
