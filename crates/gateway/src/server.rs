//! Axum-based HTTP server exposing the resolver and chat sessions.

use axum::{
    extract::{Json, MatchedPath, Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use dashmap::DashMap;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use clinic_core::{
    config::ServerConfig,
    traits::IntentResolver,
    types::{AnswerSegment, IntentId, Message, QuickReply, RenderedMessage, Transcript},
    Error, Result,
};

use crate::conversation::{Conversation, ConversationScript, SurfaceState};
use crate::renderer::render;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Enable CORS.
    pub enable_cors: bool,
    /// Enable request tracing.
    pub enable_tracing: bool,
    /// Maximum number of live chat sessions.
    pub max_sessions: usize,
    /// Idle time after which a chat session is dropped.
    pub session_ttl: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
            enable_tracing: true,
            max_sessions: 1000,
            session_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl From<&ServerConfig> for GatewayConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.enable_cors,
            enable_tracing: config.enable_tracing,
            max_sessions: config.max_sessions,
            session_ttl: Duration::from_secs(config.session_ttl_secs),
        }
    }
}

/// A chat session and the last time a request touched it.
pub struct Session {
    conversation: Conversation<Transcript>,
    last_seen: Instant,
}

/// Shared application state.
pub struct AppState {
    /// Intent resolver over the immutable catalog.
    pub resolver: Arc<dyn IntentResolver>,
    /// Greeting and fallback texts for new sessions.
    pub script: ConversationScript,
    /// One conversation per session id, bounded by `max_sessions`.
    pub sessions: DashMap<String, Session>,
    max_sessions: usize,
    session_ttl: Duration,
}

impl AppState {
    fn is_live(&self, session_id: &str) -> bool {
        self.sessions
            .get(session_id)
            .is_some_and(|session| session.last_seen.elapsed() < self.session_ttl)
    }

    /// Drop idle sessions, then evict least recently used ones until a new
    /// session fits under the cap.
    fn make_room(&self) {
        let ttl = self.session_ttl;
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.last_seen.elapsed() < ttl);
        let expired = before - self.sessions.len();

        let mut evicted = 0;
        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.last_seen)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    self.sessions.remove(&key);
                    evicted += 1;
                }
                None => break,
            }
        }

        if expired + evicted > 0 {
            tracing::debug!(expired, evicted, live = self.sessions.len(), "Dropped chat sessions");
        }
    }
}

/// Gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    resolver: Arc<dyn IntentResolver>,
    script: ConversationScript,
    metrics_handle: Option<PrometheusHandle>,
}

impl GatewayServer {
    /// Create a new gateway server.
    pub fn new(config: GatewayConfig, resolver: Arc<dyn IntentResolver>) -> Self {
        Self {
            config,
            resolver,
            script: ConversationScript::default(),
            metrics_handle: None,
        }
    }

    /// Set the greeting and fallback texts.
    pub fn with_script(mut self, script: ConversationScript) -> Self {
        self.script = script;
        self
    }

    /// Set metrics handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Build the Axum router with a fresh session store.
    pub fn build_router(&self) -> Router {
        let state = Arc::new(AppState {
            resolver: self.resolver.clone(),
            script: self.script.clone(),
            sessions: DashMap::new(),
            max_sessions: self.config.max_sessions,
            session_ttl: self.config.session_ttl,
        });

        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/v1/intent", post(intent_handler))
            .route("/v1/intents", get(quick_replies_handler))
            .route("/v1/intents/:id/answer", get(answer_handler))
            .route("/v1/sessions/:id", get(session_handler))
            .route("/v1/sessions/:id/open", post(open_handler))
            .route("/v1/sessions/:id/close", post(close_handler))
            .route("/v1/sessions/:id/messages", post(message_handler))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state);

        if let Some(handle) = &self.metrics_handle {
            let handle = handle.clone();
            router = router.route("/metrics", get(move || async move { handle.render() }));
        }

        if self.config.enable_cors {
            router = router.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any));
        }

        if self.config.enable_tracing {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::gateway(format!("Failed to bind: {}", e)))?;

        tracing::info!(addr = %addr, "Gateway server starting");

        axum::serve(listener, self.build_router())
            .await
            .map_err(|e| Error::gateway(format!("Server error: {}", e)))?;

        Ok(())
    }
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Intent-only request.
#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    /// Message to resolve.
    pub message: String,
}

/// Intent response.
#[derive(Debug, Serialize)]
pub struct IntentResponse {
    /// Trace ID.
    pub trace_id: String,
    /// Resolved intent, `null` when nothing matched.
    pub intent: Option<IntentId>,
}

/// Answer lookup response.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub id: String,
    pub segments: Vec<AnswerSegment>,
    pub rendered: RenderedMessage,
}

/// Chat message request: typed text or a quick-reply token.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: Option<String>,
    pub quick_reply: Option<String>,
    /// Button label echoed for quick replies.
    pub label: Option<String>,
}

/// Session response.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub state: SurfaceState,
    /// Messages appended by this call, or the full log for `GET`.
    pub messages: Vec<Message>,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Trace ID.
    pub trace_id: Option<String>,
}

fn error_response(status: StatusCode, error: Error) -> Response {
    let trace_id = Uuid::new_v4().to_string();
    tracing::warn!(trace_id = %trace_id, error = %error, "Request failed");
    (
        status,
        Json(ErrorResponse {
            code: error.code().to_string(),
            message: error.to_string(),
            trace_id: Some(trace_id),
        }),
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    clinic_governance::track_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Intent resolution handler.
async fn intent_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IntentRequest>,
) -> impl IntoResponse {
    let trace_id = Uuid::new_v4().to_string();
    let intent = state.resolver.resolve(&payload.message);

    tracing::info!(
        trace_id = %trace_id,
        message_len = payload.message.len(),
        intent = ?intent,
        "Resolved intent"
    );

    Json(IntentResponse { trace_id, intent })
}

async fn quick_replies_handler(State(state): State<Arc<AppState>>) -> Json<Vec<QuickReply>> {
    Json(state.resolver.quick_replies())
}

async fn answer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.resolver.lookup_answer(&id) {
        Some(segments) => Json(AnswerResponse {
            rendered: render(segments),
            segments: segments.to_vec(),
            id,
        })
        .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            Error::intent_not_found(id),
        ),
    }
}

/// Run `action` against the session's conversation, creating it on first use,
/// and return the messages it appended.
fn with_session<F>(state: &AppState, session_id: String, action: F) -> SessionResponse
where
    F: FnOnce(&mut Conversation<Transcript>),
{
    if !state.is_live(&session_id) {
        state.make_room();
    }

    let mut session = state.sessions.entry(session_id.clone()).or_insert_with(|| {
        tracing::info!(session_id = %session_id, "Creating chat session");
        Session {
            conversation: Conversation::new(
                state.resolver.clone(),
                Transcript::new(),
                state.script.clone(),
            ),
            last_seen: Instant::now(),
        }
    });
    session.last_seen = Instant::now();

    let before = session.conversation.view().messages().len();
    action(&mut session.conversation);

    SessionResponse {
        state: session.conversation.state(),
        messages: session.conversation.view().messages_since(before).to_vec(),
        session_id,
    }
}

async fn open_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Json<SessionResponse> {
    Json(with_session(&state, session_id, |conversation| conversation.open()))
}

async fn close_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Json<SessionResponse> {
    Json(with_session(&state, session_id, |conversation| conversation.close()))
}

async fn message_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(payload): Json<MessageRequest>,
) -> Response {
    let response = match (payload.quick_reply, payload.text) {
        (Some(token), _) => {
            let label = payload.label.unwrap_or_default();
            with_session(&state, session_id, |conversation| {
                conversation.quick_reply(&token, &label);
            })
        }
        (None, Some(text)) => with_session(&state, session_id, |conversation| {
            conversation.submit(&text);
        }),
        (None, None) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                Error::invalid_request("expected `text` or `quick_reply`"),
            )
        }
    };

    tracing::info!(
        session_id = %response.session_id,
        appended = response.messages.len(),
        "Processed chat message"
    );
    Json(response).into_response()
}

async fn session_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Response {
    if !state.is_live(&session_id) {
        state.sessions.remove(&session_id);
        return error_response(StatusCode::NOT_FOUND, Error::session_not_found(session_id));
    }

    match state.sessions.get_mut(&session_id) {
        Some(mut session) => {
            session.last_seen = Instant::now();
            Json(SessionResponse {
                state: session.conversation.state(),
                messages: session.conversation.view().messages().to_vec(),
                session_id,
            })
            .into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, Error::session_not_found(session_id)),
    }
}
