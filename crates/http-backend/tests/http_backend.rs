use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, post};
use axum::{Json, Router};
use little_chat_backend::{
    Backend, BackendError, ChatRequest, ErrorKind, SendOutcome, SessionId,
};
use little_chat_http_backend::{HttpBackend, HttpBackendConfigBuilder};
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn chat(Json(body): Json<Value>) -> impl IntoResponse {
    let message = body["message"].as_str().unwrap_or_default();
    let user_id = body["user_id"].as_str().unwrap_or_default();
    match message {
        "2+2?" => (StatusCode::OK, Json(json!({ "response": "4" })))
            .into_response(),
        "hello" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "overloaded" })),
        )
            .into_response(),
        "quiet" => (StatusCode::BAD_REQUEST, Json(json!({}))).into_response(),
        "garbage" => (StatusCode::OK, "<html>oops</html>").into_response(),
        _ => (
            StatusCode::OK,
            Json(json!({ "response": format!("{user_id} said {message}") })),
        )
            .into_response(),
    }
}

async fn delete_conversation(Path(user_id): Path<String>) -> StatusCode {
    if user_id.starts_with("user_") {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn spawn_server() -> SocketAddr {
    let router = Router::new()
        .route("/api/chat", post(chat))
        .route("/api/conversation/{user_id}", delete(delete_conversation));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn backend_at(addr: SocketAddr) -> HttpBackend {
    let config = HttpBackendConfigBuilder::new()
        .with_base_url(format!("http://{addr}/api"))
        .build();
    HttpBackend::new(config)
}

fn request(message: &str) -> ChatRequest {
    ChatRequest {
        message: message.to_owned(),
        session_id: "user_1700000000000".into(),
    }
}

#[tokio::test]
async fn test_success() {
    let backend = backend_at(spawn_server().await);

    let outcome = backend.send_message(&request("2+2?")).await;
    assert!(matches!(outcome, SendOutcome::Success(text) if text == "4"));

    // The wire shape carries both the message and the session.
    let outcome = backend.send_message(&request("good morning")).await;
    assert!(matches!(
        outcome,
        SendOutcome::Success(text) if text == "user_1700000000000 said good morning"
    ));
}

#[tokio::test]
async fn test_application_failure() {
    let backend = backend_at(spawn_server().await);

    let outcome = backend.send_message(&request("hello")).await;
    assert!(matches!(
        outcome,
        SendOutcome::ApplicationFailure(Some(text)) if text == "overloaded"
    ));

    let outcome = backend.send_message(&request("quiet")).await;
    assert!(matches!(outcome, SendOutcome::ApplicationFailure(None)));
}

#[tokio::test]
async fn test_malformed_response() {
    let backend = backend_at(spawn_server().await);

    match backend.send_message(&request("garbage")).await {
        SendOutcome::TransportFailure(err) => {
            assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        }
        other => panic!("expected a transport failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable() {
    // Grab a free port and release it, nothing listens there afterwards.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let backend = backend_at(addr);

    match backend.send_message(&request("hello")).await {
        SendOutcome::TransportFailure(err) => {
            assert_eq!(err.kind(), ErrorKind::Unreachable);
        }
        other => panic!("expected a transport failure, got {other:?}"),
    }

    let err = backend
        .delete_conversation(&SessionId::from("user_1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unreachable);
}

#[tokio::test]
async fn test_delete_conversation() {
    let backend = backend_at(spawn_server().await);

    backend
        .delete_conversation(&SessionId::from("user_1700000000000"))
        .await
        .unwrap();

    let err = backend
        .delete_conversation(&SessionId::from("someone_else"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert_eq!(err.message(), "unexpected status: 404 Not Found");
}
