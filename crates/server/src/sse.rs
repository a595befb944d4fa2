// SSE front-end: MCP's HTTP+SSE transport pairing.
//
// `GET /sse` opens the event stream. The first event names the per-session
// message endpoint; JSON-RPC responses follow as `message` events. Clients
// POST requests to `/messages?session_id=...` and get `202 Accepted`; the
// actual response arrives on the stream. The session map is transport
// plumbing only, nothing about a tool call lives in it.

use crate::handler::McpHandler;
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use crawl4ai_mcp_core::protocol::{JsonRpcRequest, JsonRpcResponse};
use futures::{stream, Stream, StreamExt};
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

const SESSION_BUFFER: usize = 16;

/// Start the SSE front-end.
pub async fn serve(port: u16, handler: McpHandler) -> Result<()> {
    let app = router(Arc::new(SseState::new(handler)));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Crawl4AI MCP server running on SSE port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<SseState>) -> Router {
    Router::new()
        .route("/sse", get(open_stream))
        .route("/messages", post(post_message))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

struct SseState {
    handler: McpHandler,
    sessions: Mutex<HashMap<Uuid, mpsc::Sender<JsonRpcResponse>>>,
}

impl SseState {
    fn new(handler: McpHandler) -> Self {
        Self {
            handler,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, mpsc::Sender<JsonRpcResponse>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self) -> (Uuid, mpsc::Receiver<JsonRpcResponse>) {
        let session_id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(SESSION_BUFFER);
        self.sessions().insert(session_id, tx);
        (session_id, rx)
    }

    fn sender(&self, session_id: &Uuid) -> Option<mpsc::Sender<JsonRpcResponse>> {
        self.sessions().get(session_id).cloned()
    }

    fn remove(&self, session_id: &Uuid) {
        self.sessions().remove(session_id);
    }
}

/// Unregisters the session when the event stream is dropped.
struct SessionGuard {
    session_id: Uuid,
    state: Arc<SseState>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.state.remove(&self.session_id);
        tracing::debug!(session_id = %self.session_id, "SSE session closed");
    }
}

async fn open_stream(
    State(state): State<Arc<SseState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (session_id, rx) = state.register();
    tracing::debug!(session_id = %session_id, "SSE session opened");

    let guard = SessionGuard {
        session_id,
        state: state.clone(),
    };

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/messages?session_id={session_id}"));

    let responses = ReceiverStream::new(rx).map(move |response| {
        let _guard = &guard;
        let data = serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string());
        Ok::<_, Infallible>(Event::default().event("message").data(data))
    });

    let stream = stream::once(async move { Ok::<_, Infallible>(endpoint) }).chain(responses);
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    session_id: Uuid,
}

async fn post_message(
    State(state): State<Arc<SseState>>,
    Query(query): Query<SessionQuery>,
    body: String,
) -> impl IntoResponse {
    let Some(tx) = state.sender(&query.session_id) else {
        return (StatusCode::NOT_FOUND, "unknown session");
    };

    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid JSON-RPC request"),
    };

    if let Some(response) = state.handler.handle(request).await {
        if tx.send(response).await.is_err() {
            state.remove(&query.session_id);
            return (StatusCode::GONE, "session closed");
        }
    }

    (StatusCode::ACCEPTED, "Accepted")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use crawl4ai_mcp_core::{Forwarder, ServerConfig};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let handler = McpHandler::new(Forwarder::new(ServerConfig::default()));
        router(Arc::new(SseState::new(handler)))
    }

    async fn next_chunk(body: &mut axum::body::BodyDataStream) -> String {
        let bytes = body.next().await.unwrap().unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn stream_opens_with_an_endpoint_event() {
        let request = Request::builder().uri("/sse").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .map(|v| v.to_str().unwrap()),
            Some("text/event-stream")
        );

        let mut body = response.into_body().into_data_stream();
        let first = next_chunk(&mut body).await;
        assert!(first.contains("event: endpoint"));
        assert!(first.contains("/messages?session_id="));
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/messages?session_id={}", Uuid::new_v4()))
            .body(Body::from(
                r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
            ))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn responses_arrive_on_the_session_stream() {
        let app = app();

        let request = Request::builder().uri("/sse").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let mut body = response.into_body().into_data_stream();

        // Pull the session id out of the endpoint event.
        let first = next_chunk(&mut body).await;
        let session_id = first
            .split("session_id=")
            .nth(1)
            .unwrap()
            .split_whitespace()
            .next()
            .unwrap()
            .to_string();

        let request = Request::builder()
            .method("POST")
            .uri(format!("/messages?session_id={session_id}"))
            .body(Body::from(
                r#"{"jsonrpc":"2.0","id":9,"method":"tools/list"}"#,
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let message = next_chunk(&mut body).await;
        assert!(message.contains("event: message"));
        let data = message
            .lines()
            .find_map(|line| line.strip_prefix("data: "))
            .unwrap();
        let value: Value = serde_json::from_str(data).unwrap();
        assert_eq!(value["id"], 9);
        assert_eq!(value["result"]["tools"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn malformed_message_is_400() {
        let app = app();

        let request = Request::builder().uri("/sse").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let mut body = response.into_body().into_data_stream();
        let first = next_chunk(&mut body).await;
        let session_id = first
            .split("session_id=")
            .nth(1)
            .unwrap()
            .split_whitespace()
            .next()
            .unwrap()
            .to_string();

        let request = Request::builder()
            .method("POST")
            .uri(format!("/messages?session_id={session_id}"))
            .body(Body::from("not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
