use crate::cli::Args;
use crate::config::ChatMode;
use crate::error::ChatError;
use crate::llm::chat::TokenStream;
use crate::models::api::{CannedReply, ChatPayload, HealthResponse, StreamFragment};
use crate::reply::{Reply, ReplyStrategy};
use crate::sse::DONE_SENTINEL;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
    extract::{rejection::JsonRejection, State},
    response::{sse::{Event, Sse}, IntoResponse, Response},
    Json,
};
use futures::{stream, Stream, StreamExt};
use tower_http::cors::{Any, CorsLayer};
use log::{info, warn, error};

#[derive(Clone)]
struct AppState {
    strategy: Arc<dyn ReplyStrategy>,
}

pub fn router(strategy: Arc<dyn ReplyStrategy>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(AppState { strategy })
}

pub async fn start_http_server(
    addr: &str,
    strategy: Arc<dyn ReplyStrategy>,
    args: &Args,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;
    let app = router(strategy);

    if args.enable_tls {
        let (cert_path, key_path) = match (&args.tls_cert_path, &args.tls_key_path) {
            (Some(cert), Some(key)) => (cert, key),
            _ => {
                error!("Both --tls-cert-path and --tls-key-path must be provided to enable TLS.");
                return Err("TLS enabled without cert/key".into());
            }
        };
        info!(
            "TLS enabled. Loading certificate from '{}' and key from '{}'",
            cert_path,
            key_path
        );
        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
            cert_path,
            key_path
        ).await?;

        info!("Starting HTTPS server on: https://{}", addr);
        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await?;
    } else {
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            format!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e)
        })?;
        info!("Starting HTTP server on: http://{}", addr);
        axum::serve(listener, app.into_make_service()).await?;
    }

    Ok(())
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            warn!("Rejected chat request: {}", rejection.body_text());
            return ChatError::InvalidRequest(rejection.body_text()).into_response();
        }
    };

    // The single-message shape is the canned client's; upstream mode needs
    // the whole conversation.
    if matches!(payload, ChatPayload::Single(_)) && state.strategy.mode() == ChatMode::Upstream {
        warn!("Rejected single-message body in upstream mode");
        return ChatError::InvalidRequest("expected a `messages` array".into()).into_response();
    }

    match state.strategy.generate_reply(&payload.into_turns()).await {
        Ok(Reply::Stream(tokens)) => event_stream(tokens).into_response(),
        Ok(Reply::Single(text)) => Json(CannedReply { response: text }).into_response(),
        Err(e) => {
            error!("Chat API error: {}", e);
            e.into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".into(),
        mode: state.strategy.mode().to_string(),
    })
}

/// Relays fragments as `data: {"text": ...}` events and closes with
/// `data: [DONE]`. An upstream error ends the body with an error instead, so
/// the client never sees the sentinel after a broken stream.
fn event_stream(tokens: TokenStream) -> Sse<impl Stream<Item = Result<Event, ChatError>>> {
    let events = stream::unfold(Some(tokens), |state| async move {
        let mut tokens = state?;
        loop {
            match tokens.next().await {
                Some(Ok(text)) if text.is_empty() => continue,
                Some(Ok(text)) => {
                    let event = Event::default()
                        .json_data(StreamFragment { text: Some(text) })
                        .map_err(|e| ChatError::Upstream(e.to_string()));
                    return Some((event, Some(tokens)));
                }
                Some(Err(e)) => {
                    error!("Upstream stream failed mid-reply: {}", e);
                    return Some((Err(e), None));
                }
                None => {
                    return Some((Ok(Event::default().data(DONE_SENTINEL)), None));
                }
            }
        }
    });

    Sse::new(events)
}
