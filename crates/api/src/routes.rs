use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Request, State},
    http::{Method, StatusCode, header::CONTENT_TYPE},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use dialogue::Transcript;
use ingest::SourceDocument;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::error::ApiError;
use crate::input::{PaperSource, PodcastRequest};
use crate::metrics::{MetricsSnapshot, TimedOperation};
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    // Outermost first. The CORS layer answers every OPTIONS request itself,
    // so the 204 rewrite has to sit outside it.
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(options_no_content))
        .layer(cors)
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes));

    Router::new()
        .route("/api/test", get(health_check))
        .route("/api/generate-podcast", post(generate_podcast))
        .route("/api/metrics", get(get_metrics))
        .layer(layers)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "Backend server is running" }))
}

/// OPTIONS short-circuits with 204, preflight or not. CORS headers set by
/// the inner layer are kept.
async fn options_no_content(req: Request, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;
    if is_options && response.status().is_success() {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

async fn get_metrics(State(state): State<SharedState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

async fn generate_podcast(
    State(state): State<SharedState>,
    request: Result<PodcastRequest, ApiError>,
) -> Result<Json<Transcript>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate_podcast", %request_id);

    let result = async {
        let request = request?;
        let document = load_document(request.source).await?;
        info!(
            kind = ?document.kind(),
            chars = document.char_count(),
            preferences = ?request.preferences,
            "Generating podcast"
        );

        let timer = TimedOperation::start();
        let transcript = state
            .generator
            .generate(&document, &request.preferences)
            .await?;

        let degraded = transcript.degraded_turns();
        state
            .metrics
            .record_transcript(timer.elapsed(), transcript.conversation.len(), degraded);
        info!(
            turns = transcript.conversation.len(),
            degraded,
            elapsed_ms = timer.elapsed().as_millis() as u64,
            "Podcast generated"
        );

        Ok::<_, ApiError>(Json(transcript))
    }
    .instrument(span)
    .await;

    state.metrics.record_request(result.is_ok());
    result
}

async fn load_document(source: PaperSource) -> Result<SourceDocument, ApiError> {
    match source {
        PaperSource::Text(text) => Ok(SourceDocument::from_text(text)?),
        PaperSource::Pdf { filename, bytes } => {
            info!(%filename, bytes = bytes.len(), "Reading uploaded PDF");
            // lopdf parsing is CPU bound
            let document = tokio::task::spawn_blocking(move || SourceDocument::from_pdf(&bytes))
                .await
                .map_err(|e| ApiError::Internal(e.into()))??;
            Ok(document)
        }
    }
}
