use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chartinfo::chart::{Chart, ChartAssembler, ChartError, ChartRequest};
use chartinfo::document;
use chartinfo::EphemerisProvider;
use log::{error, info};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tower_http::services::ServeDir;

use crate::transform::{TransformError, Transformer};

/// Swiss Ephemeris keeps global state: one provider, one chart at a time.
pub type SharedProvider = Arc<Mutex<Box<dyn EphemerisProvider + Send>>>;

#[derive(Clone)]
pub struct AppState {
    provider: SharedProvider,
    assembler: Arc<ChartAssembler>,
    transformer: Arc<dyn Transformer>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(provider: Box<dyn EphemerisProvider + Send>, transformer: Arc<dyn Transformer>) -> Self {
        Self {
            provider: Arc::new(Mutex::new(provider)),
            assembler: Arc::new(ChartAssembler::new()),
            transformer,
            http: reqwest::Client::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Ephemeris provider lock poisoned")]
    ProviderPoisoned,
    #[error("Chart task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("Failed to render chart: {0}")]
    Render(#[from] std::fmt::Error),
    #[error("Failed to render chart: {0}")]
    RenderJson(#[from] serde_json::Error),
    #[error("Missing query parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Failed to fetch document: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::Transform(TransformError::InvalidStylesheet(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Fetch(_) | ApiError::Transform(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!("Request failed ({}): {}", status, self);
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/chartinfo", get(chartinfo_handler))
        .route("/chartinfo.json", get(chartinfo_json_handler))
        .route("/transform", get(transform_handler))
        .with_state(state);

    match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}

async fn compute_chart(state: &AppState, query: HashMap<String, String>) -> Result<Chart, ApiError> {
    let request = ChartRequest::from_query(&query);
    let provider = state.provider.clone();
    let assembler = state.assembler.clone();

    tokio::task::spawn_blocking(move || {
        let mut provider = provider.lock().map_err(|_| ApiError::ProviderPoisoned)?;
        assembler.assemble(&mut **provider, &request).map_err(ApiError::from)
    })
    .await?
}

async fn chartinfo_handler(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    info!("GET /chartinfo {:?}", query);
    let chart = compute_chart(&state, query).await?;
    let xml = document::to_xml(&chart)?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}

async fn chartinfo_json_handler(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    info!("GET /chartinfo.json {:?}", query);
    let chart = compute_chart(&state, query).await?;
    let json = document::to_json(&chart)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
}

async fn transform_handler(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let xml_url = query.get("xml").ok_or(ApiError::MissingParameter("xml"))?;
    let stylesheet = query.get("xsl").ok_or(ApiError::MissingParameter("xsl"))?;
    info!("GET /transform xml={} xsl={}", xml_url, stylesheet);

    let document = state
        .http
        .get(xml_url.as_str())
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let output = state.transformer.transform(document.to_vec(), stylesheet).await?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], output).into_response())
}
