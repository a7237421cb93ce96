use crate::config::Config;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use frame_ocr::engines::RecognizerRegistry;
use frame_ocr::{
    decode_frame, map_result, scan_frame, OcrFrame, RawRecognitionResult, ScanError, Size,
    TextRecognizer, Viewport,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recognizers: Arc<RecognizerRegistry>,
    pub config: Arc<Config>,
}

/// Normalize request: a recognizer result already in capture coordinates
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeRequest {
    pub raw: RawRecognitionResult,
    pub capture_size: Size,
    #[serde(flatten)]
    pub viewport: Viewport,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct RecognizerInfoResponse {
    pub name: String,
    pub description: String,
    pub supported_languages: Vec<String>,
}

/// Server info response
#[derive(Serialize)]
pub struct InfoResponse {
    pub version: String,
    pub default_recognizer: Option<String>,
    pub available_recognizers: Vec<RecognizerInfoResponse>,
    pub max_file_size_bytes: usize,
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    let recognizers = if config.disable_recognizer {
        tracing::warn!("Recognizer disabled; /scan will answer 503");
        RecognizerRegistry::empty()
    } else {
        RecognizerRegistry::new(&config.recognizer_options())?
    };
    tracing::info!("Available recognizers: {:?}", recognizers.list());

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState {
        recognizers: Arc::new(recognizers),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .route("/scan", post(handle_scan))
        .route("/scan/:recognizer", post(handle_scan_with))
        .route("/normalize", post(handle_normalize))
        .route("/health", get(handle_health))
        .route("/info", get(handle_info))
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle normalization of a caller-supplied recognition result
async fn handle_normalize(
    Json(request): Json<NormalizeRequest>,
) -> Result<Json<OcrFrame>, ScanError> {
    let frame = map_result(&request.raw, request.capture_size, &request.viewport)?;

    tracing::debug!(
        "Normalized {} blocks against crop origin ({}, {})",
        frame.result.blocks.len(),
        frame.result.x_axis,
        frame.result.y_axis
    );

    Ok(Json(frame))
}

/// Handle scan requests with the default recognizer
async fn handle_scan(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OcrFrame>, ScanError> {
    let recognizer = state.recognizers.default_recognizer().ok_or_else(|| {
        ScanError::RecognizerUnavailable("no recognizer is loaded".to_string())
    })?;
    scan_upload(&state, recognizer, multipart).await
}

/// Handle scan requests naming a recognizer
async fn handle_scan_with(
    State(state): State<AppState>,
    Path(name): Path<String>,
    multipart: Multipart,
) -> Result<Json<OcrFrame>, ScanError> {
    let recognizer = state.recognizers.get(&name).ok_or_else(|| {
        ScanError::RecognizerUnavailable(format!(
            "unknown recognizer '{}', available: {:?}",
            name,
            state.recognizers.list()
        ))
    })?;
    scan_upload(&state, recognizer, multipart).await
}

async fn scan_upload(
    state: &AppState,
    recognizer: Arc<dyn TextRecognizer>,
    mut multipart: Multipart,
) -> Result<Json<OcrFrame>, ScanError> {
    let start = Instant::now();

    let mut file_data: Option<Bytes> = None;
    let mut preview_size: Option<Size> = None;
    let mut target_size: Option<Size> = None;

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ScanError::InvalidRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                file_data = Some(field.bytes().await.map_err(|e| {
                    ScanError::InvalidRequest(format!("Failed to read file data: {}", e))
                })?);
            }
            "previewSize" | "targetSize" => {
                let text = field.text().await.map_err(|e| {
                    ScanError::InvalidRequest(format!("Invalid {}: {}", name, e))
                })?;
                let size: Size = serde_json::from_str(&text).map_err(|e| {
                    ScanError::InvalidRequest(format!("Invalid {}: {}", name, e))
                })?;
                if name == "previewSize" {
                    preview_size = Some(size);
                } else {
                    target_size = Some(size);
                }
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let data = file_data.ok_or(ScanError::MissingFile)?;

    if data.len() > state.config.max_file_size {
        return Err(ScanError::ImageTooLarge {
            size: data.len(),
            max: state.config.max_file_size,
        });
    }

    let preview_size = preview_size
        .ok_or_else(|| ScanError::InvalidRequest("Missing previewSize field".to_string()))?;
    let viewport = Viewport {
        preview_size,
        target_size,
    };

    // Decoding and recognition are CPU-bound
    let frame = tokio::task::spawn_blocking(move || {
        let image = decode_frame(&data)?;
        scan_frame(recognizer.as_ref(), &image, &viewport)
    })
    .await
    .map_err(|e| ScanError::Internal(format!("Scan task failed: {}", e)))??;

    tracing::info!(
        "Scan completed in {}ms, {} blocks, text length: {}",
        start.elapsed().as_millis(),
        frame.result.blocks.len(),
        frame.result.text.len()
    );

    Ok(Json(frame))
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle info requests
async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    let default_recognizer = Some(state.recognizers.default_name())
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_recognizer,
        available_recognizers: state
            .recognizers
            .info()
            .into_iter()
            .map(|info| RecognizerInfoResponse {
                name: info.name.to_string(),
                description: info.description.to_string(),
                supported_languages: info.supported_languages,
            })
            .collect(),
        max_file_size_bytes: state.config.max_file_size,
    })
}
