use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use super::page;
use crate::config::WebchatConfig;
use crate::error::ChatError;
use crate::prompt;
use crate::provider::ReplyGenerator;
use crate::store::SessionStore;
use crate::types::{ChatRequest, ChatResponse, Turn};

pub struct AppState {
    pub store: RwLock<SessionStore>,
    pub generator: Arc<dyn ReplyGenerator>,
}

impl AppState {
    pub fn new(store: SessionStore, generator: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            store: RwLock::new(store),
            generator,
        }
    }
}

/// Build the HTTP routes: the chat page and the chat endpoint.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/api/chat", post(chat_handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: WebchatConfig) -> anyhow::Result<()> {
    crate::config::validate(&config)?;

    let generator = crate::provider::from_config(&config.generator)?;
    info!(
        generator = generator.name(),
        id_scheme = ?config.sessions.id_scheme,
        "chat backend configured"
    );

    let state = Arc::new(AppState::new(
        SessionStore::new(config.sessions.id_scheme),
        generator,
    ));

    let addr = format!("{}:{}", config.gateway.bind, config.gateway.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;

    info!("webchat listening on http://{addr}");
    serve(listener, state).await
}

/// Serve on an already-bound listener until the process exits.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

/// Turn a panic inside a handler (usually the generator) into a 500 with a
/// `detail` body instead of a dropped connection.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    error!("request handler panicked: {detail}");
    ChatError::Internal(detail).into_response()
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let Json(request) = payload.map_err(|e| {
        debug!("rejected chat body: {e}");
        ChatError::Validation(e.body_text())
    })?;
    handle_chat(&state, request).await.map(Json)
}

/// Run one chat turn against the store and generator.
///
/// 1. Resolve the session (unknown ids start a new one)
/// 2. Append the user turn
/// 3. Flatten the whole transcript into a prompt
/// 4. Generate a reply
/// 5. Append the assistant turn
///
/// The store lock is released while the generator runs. If generation
/// fails, the user turn stays in the transcript.
pub async fn handle_chat(state: &AppState, request: ChatRequest) -> Result<ChatResponse, ChatError> {
    if request.message.is_empty() {
        debug!("rejected empty message");
        return Err(ChatError::Validation("message must not be empty".into()));
    }

    let requested = request.conversation_id.as_deref();
    let started;

    let (session_id, prompt) = {
        let mut store = state.store.write().await;
        let (session_id, _) = store.resolve_or_create(requested);
        if requested != Some(session_id.as_str()) {
            info!(session = %session_id, sessions = store.count(), "created session");
        }

        let user_turn = Turn::user(request.message);
        started = user_turn.timestamp();
        store.append(&session_id, user_turn)?;

        let transcript = store
            .get(&session_id)
            .ok_or_else(|| ChatError::NotFound(session_id.clone()))?;
        (session_id, prompt::flatten(transcript))
    };

    let reply = match state.generator.generate(&prompt, Some(&session_id)).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(session = %session_id, generator = state.generator.name(), "{e}");
            return Err(e.into());
        }
    };

    let assistant_turn = Turn::assistant(reply.clone());
    let elapsed = assistant_turn.timestamp() - started;
    let mut store = state.store.write().await;
    store.append(&session_id, assistant_turn)?;
    debug!(
        session = %session_id,
        turns = store.get(&session_id).map_or(0, |t| t.len()),
        elapsed_ms = elapsed.num_milliseconds(),
        "reply appended"
    );

    Ok(ChatResponse {
        response: reply,
        conversation_id: session_id,
    })
}
