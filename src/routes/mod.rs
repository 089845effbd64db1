//! API routes
//!
//! Thin HTTP front for the conversation tree. Each handler maps onto one
//! session registry call and returns what the page needs to re-render.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::conversation::{render_transcript, GraphElements, Message, NodeId, TreeError};
use crate::core::{SessionError, SessionView, UiEvent};
use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedSession {
    pub session_id: String,
    #[serde(flatten)]
    pub view: SessionView,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub node_id: NodeId,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub node_id: Option<NodeId>,
}

/// Session errors rendered as `{"error": ...}` with a matching status
#[derive(Debug)]
pub struct ApiError(SessionError);

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
            SessionError::LimitReached(_) => StatusCode::SERVICE_UNAVAILABLE,
            SessionError::Tree(TreeError::UnknownNode(_)) => StatusCode::NOT_FOUND,
            SessionError::Tree(TreeError::DuplicateNode(_))
            | SessionError::Tree(TreeError::UnknownParent { .. }) => StatusCode::CONFLICT,
            SessionError::Tree(TreeError::CycleDetected { .. }) => {
                tracing::error!(error = %self.0, "conversation tree is corrupt");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.sessions.len().await,
    })
}

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedSession>), ApiError> {
    let (session_id, view) = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(CreatedSession { session_id, view })))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.sessions.view(&session_id).await?))
}

async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.sessions.close(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(
        state.sessions.send_message(&session_id, request.message).await?,
    ))
}

async fn select_node(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.sessions.select(&session_id, request.node_id).await?))
}

async fn apply_event(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(event): Json<UiEvent>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.sessions.apply(&session_id, event).await?))
}

async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.sessions.history(&session_id, query.node_id).await?))
}

async fn graph(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<GraphElements>, ApiError> {
    Ok(Json(state.sessions.graph(&session_id).await?))
}

async fn transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state.sessions.history(&session_id, None).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_transcript(&history),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/:id", get(get_session).delete(close_session))
        .route("/v1/sessions/:id/messages", post(send_message))
        .route("/v1/sessions/:id/select", post(select_node))
        .route("/v1/sessions/:id/events", post(apply_event))
        .route("/v1/sessions/:id/history", get(history))
        .route("/v1/sessions/:id/graph", get(graph))
        .route("/v1/sessions/:id/transcript", get(transcript))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::SessionSettings;
    use crate::core::{EchoResponder, SessionManager};

    fn app(seed_demo: bool) -> Router {
        app_with_limit(seed_demo, 16)
    }

    fn app_with_limit(seed_demo: bool, max_sessions: usize) -> Router {
        let state = AppState {
            sessions: Arc::new(SessionManager::new(
                Arc::new(EchoResponder::default()),
                SessionSettings {
                    seed_demo,
                    max_sessions,
                    label_max_chars: None,
                },
            )),
        };
        router().with_state(state)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, json)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = call(app, "POST", "/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(false);
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_send_then_rewind() {
        let app = app(false);
        let id = new_session(&app).await;

        let (status, first) = call(
            &app,
            "POST",
            &format!("/v1/sessions/{}/messages", id),
            Some(json!({ "message": "hi" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["history"][0], json!({ "role": "user", "content": "hi" }));
        assert_eq!(
            first["history"][1],
            json!({ "role": "assistant", "content": "Response to: hi" })
        );
        let first_id = first["current_tip"].as_str().unwrap().to_string();

        call(
            &app,
            "POST",
            &format!("/v1/sessions/{}/messages", id),
            Some(json!({ "message": "again" })),
        )
        .await;

        let (status, view) = call(
            &app,
            "POST",
            &format!("/v1/sessions/{}/events", id),
            Some(json!({ "type": "node_clicked", "id": first_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["history"].as_array().unwrap().len(), 2);
        assert_eq!(view["graph"]["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(view["graph"]["edges"][0]["data"]["target"], first_id.as_str());
    }

    #[tokio::test]
    async fn test_session_limit_is_503() {
        let app = app_with_limit(false, 1);
        new_session(&app).await;

        let (status, body) = call(&app, "POST", "/v1/sessions", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("limit"));
    }

    #[tokio::test]
    async fn test_select_unknown_node_is_404() {
        let app = app(true);
        let id = new_session(&app).await;

        let (status, body) = call(
            &app,
            "POST",
            &format!("/v1/sessions/{}/select", id),
            Some(json!({ "node_id": "nonexistent-id" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("nonexistent-id"));
    }

    #[tokio::test]
    async fn test_history_and_transcript() {
        let app = app(true);
        let id = new_session(&app).await;

        let (_, history) = call(
            &app,
            "GET",
            &format!(
                "/v1/sessions/{}/history?node_id=a3f1b6cf-561e-466d-b29f-876b64b1cfc2",
                id
            ),
            None,
        )
        .await;
        assert_eq!(history.as_array().unwrap().len(), 4);
        assert_eq!(history[2]["content"], "Can you explain recursion?");

        // No tip yet: the active branch is empty
        let (_, history) = call(&app, "GET", &format!("/v1/sessions/{}/history", id), None).await;
        assert!(history.as_array().unwrap().is_empty());

        call(
            &app,
            "POST",
            &format!("/v1/sessions/{}/select", id),
            Some(json!({ "node_id": "b1e77c5b-d582-4b78-bc2b-f82c54e1b10c" })),
        )
        .await;
        let (status, text) =
            call(&app, "GET", &format!("/v1/sessions/{}/transcript", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            text,
            Value::String(
                "**You:** Hello, how are you?\n\n**Assistant:** I'm good, thank you! How can I assist you today?"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_graph_and_close() {
        let app = app(true);
        let id = new_session(&app).await;

        let (status, graph) = call(&app, "GET", &format!("/v1/sessions/{}/graph", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(graph["nodes"].as_array().unwrap().len(), 14);
        assert_eq!(graph["edges"].as_array().unwrap().len(), 13);

        let (status, _) = call(&app, "DELETE", &format!("/v1/sessions/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&app, "GET", &format!("/v1/sessions/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
