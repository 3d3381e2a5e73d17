//! The bundled mock backend: static files plus the chat and upload stubs
//! the client talks to during local development. Replies are hard-coded;
//! uploads are a pass-through to disk with no index and no retrieval.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderName, StatusCode},
    response::{AppendHeaders, Html, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

pub struct ServeOptions {
    pub port: u16,
    pub static_dir: PathBuf,
    pub uploads_dir: PathBuf,
}

struct ServeState {
    static_dir: PathBuf,
    uploads_dir: PathBuf,
}

pub fn configure_logging() {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub async fn run(options: ServeOptions) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(&options.uploads_dir).await?;

    let state = Arc::new(ServeState {
        static_dir: options.static_dir.clone(),
        uploads_dir: options.uploads_dir,
    });

    let app = Router::new()
        .route("/", get(index))
        .route("/chat", post(chat_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/upload", post(upload_handler))
        .nest_service("/static", ServeDir::new(&options.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], options.port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

async fn index(
    State(state): State<Arc<ServeState>>,
) -> (
    StatusCode,
    AppendHeaders<Vec<(HeaderName, &'static str)>>,
    Html<String>,
) {
    match std::fs::read_to_string(state.static_dir.join("index.html")) {
        Ok(html) => (
            StatusCode::OK,
            AppendHeaders(vec![
                (header::CACHE_CONTROL, "no-cache, no-store"),
                (header::EXPIRES, "-1"),
            ]),
            Html(html),
        ),
        Err(err) => (
            StatusCode::NOT_FOUND,
            AppendHeaders(vec![]),
            Html(err.to_string()),
        ),
    }
}

#[derive(Deserialize)]
struct ChatQuery {
    #[serde(default)]
    query: String,
}

async fn chat_handler(Json(payload): Json<ChatQuery>) -> (StatusCode, Json<Value>) {
    let query = payload.query.trim();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing 'query' in request." })),
        );
    }

    tracing::info!("query received: {query}");

    (
        StatusCode::OK,
        Json(json!({
            "reply": mock_reply(query),
            "sources": ["Mock Database", "Mock Document"],
        })),
    )
}

/// Canned reply shaped like real inventory answers so the client pipeline
/// has headers, lists, prices, and units to chew on.
fn mock_reply(query: &str) -> String {
    format!(
        "I received your query: \"{query}\". Here is what a live backend would match.\n\
         \n\
         Best matches in our inventory:\n\
         - EQA 250 | AED 185,000 | 429 km range\n\
         - EQB 350 | AED 219,000 | 423 km range\n\
         - EQS 450 | AED 399,000 | 640 km range\n\
         - EQE 300 | AED 289,000 | 550 km range\n\
         \n\
         This is a mock response. Point the client at a real backend for live data."
    )
}

async fn upload_handler(
    State(state): State<Arc<ServeState>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "No file uploaded" })),
                );
            }
            Err(err) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": err.to_string() })),
                );
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload.bin".to_string());

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": err.to_string() })),
                );
            }
        };

        let file_id = Utc::now().timestamp_millis();
        let destination = state
            .uploads_dir
            .join(format!("{file_id}-{}", sanitize_file_name(&file_name)));

        return match tokio::fs::write(&destination, &bytes).await {
            Ok(()) => {
                tracing::info!(
                    "stored upload {} ({} bytes)",
                    destination.display(),
                    bytes.len()
                );
                (
                    StatusCode::OK,
                    Json(json!({
                        "message": "File processed successfully",
                        "fileName": file_name,
                        "fileId": file_id.to_string(),
                    })),
                )
            }
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            ),
        };
    }
}

/// Uploads land in one flat directory; client-supplied names lose their
/// path components and any character that is not safe in a file name.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['.', '_']).is_empty() {
        "upload.bin".to_string()
    } else {
        cleaned
    }
}
