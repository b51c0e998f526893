//! HTTP endpoint server using Axum
//!
//! Exposes the filter store mutations, the static catalog and the rendered
//! dashboard panels for one in-process session.

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, patch, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{watch, RwLock};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, warn, Level};

use crate::catalog;
use crate::config::GatewayConfig;
use crate::metrics::Metrics;
use crate::models::catalog::{Region, SroOffice, Zone};
use crate::models::filter::{AdvancedFilterKind, AdvancedFiltersPatch, FilterState, Timeframe};
use crate::services::market_data::{MarketDataGateway, OfflineGateway};
use crate::services::marketpulse::MarketPulseGateway;
use crate::store::{FilterSnapshot, FilterStore, LocalClock, StoreError};
use crate::views::{Dashboard, DashboardView};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub store: Arc<RwLock<FilterStore>>,
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    /// Wires the store to the dashboard: every mutation re-fetches the
    /// filter-dependent panels in the background. Must be called from within
    /// a Tokio runtime.
    pub fn new(mut store: FilterStore, dashboard: Dashboard, metrics: Arc<Metrics>) -> Self {
        let dashboard = Arc::new(dashboard);
        let (changes, receiver) = watch::channel(store.get_state());
        store.subscribe(move |snapshot| {
            changes.send_replace(snapshot.clone());
        });
        spawn_view_refresh(dashboard.clone(), receiver);

        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            store: Arc::new(RwLock::new(store)),
            dashboard,
        }
    }
}

/// Refresh the panels for the latest snapshot; bursts of mutations coalesce
/// into one fetch. Stops once the store (and its sender) is dropped.
fn spawn_view_refresh(dashboard: Arc<Dashboard>, mut changes: watch::Receiver<FilterSnapshot>) {
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let snapshot = changes.borrow_and_update().clone();
            debug!(revision = snapshot.revision, "Filters changed, refreshing panels");
            dashboard.refresh(&snapshot).await;
        }
        debug!("Filter store closed, view refresh stopped");
    });
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Handler failure rendered as `{ "error": ... }`
#[derive(Debug)]
pub enum ApiError {
    InvalidFilter(StoreError),
    NotFound(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::InvalidFilter(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidFilter(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "marketpulse-dashboard"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilterResponse {
    revision: u64,
    active_filter_count: usize,
    search_active: bool,
    #[serde(flatten)]
    state: FilterState,
}

impl From<FilterSnapshot> for FilterResponse {
    fn from(snapshot: FilterSnapshot) -> Self {
        Self {
            revision: snapshot.revision,
            active_filter_count: snapshot.active_filter_count(),
            search_active: snapshot.is_search_active(),
            state: FilterState::clone(&snapshot.state),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TimeframeRequest {
    timeframe: Timeframe,
}

#[derive(Debug, Deserialize)]
struct DateRangeRequest {
    from: NaiveDate,
    to: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
struct RegionsRequest {
    regions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RemoveFilterQuery {
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegionsQuery {
    /// Comma-separated zone ids
    zones: Option<String>,
}

async fn get_filters(State(state): State<AppState>) -> Json<FilterResponse> {
    Json(state.store.read().await.get_state().into())
}

async fn reset_filters(State(state): State<AppState>) -> Json<FilterResponse> {
    Json(state.store.write().await.reset_all().into())
}

async fn toggle_zone(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FilterResponse>, ApiError> {
    if catalog::zone_by_id(&id).is_none() {
        return Err(ApiError::NotFound(format!("zone '{}'", id)));
    }
    Ok(Json(state.store.write().await.toggle_zone(&id).into()))
}

async fn clear_zones(State(state): State<AppState>) -> Json<FilterResponse> {
    Json(state.store.write().await.clear_zones().into())
}

async fn toggle_region(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<FilterResponse> {
    Json(state.store.write().await.toggle_region(&id).into())
}

async fn set_regions(
    State(state): State<AppState>,
    Json(request): Json<RegionsRequest>,
) -> Json<FilterResponse> {
    Json(
        state
            .store
            .write()
            .await
            .set_selected_regions(request.regions)
            .into(),
    )
}

async fn clear_regions(State(state): State<AppState>) -> Json<FilterResponse> {
    Json(state.store.write().await.clear_regions().into())
}

async fn set_timeframe(
    State(state): State<AppState>,
    Json(request): Json<TimeframeRequest>,
) -> Json<FilterResponse> {
    Json(state.store.write().await.set_timeframe(request.timeframe).into())
}

async fn set_date_range(
    State(state): State<AppState>,
    Json(request): Json<DateRangeRequest>,
) -> Result<Json<FilterResponse>, ApiError> {
    let snapshot = state
        .store
        .write()
        .await
        .set_date_range(request.from, request.to)?;
    Ok(Json(snapshot.into()))
}

async fn set_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<FilterResponse> {
    Json(state.store.write().await.set_search_query(request.query).into())
}

async fn clear_search(State(state): State<AppState>) -> Json<FilterResponse> {
    Json(state.store.write().await.clear_search().into())
}

async fn patch_advanced(
    State(state): State<AppState>,
    Json(patch): Json<AdvancedFiltersPatch>,
) -> Result<Json<FilterResponse>, ApiError> {
    let snapshot = state.store.write().await.set_advanced_filters(patch)?;
    Ok(Json(snapshot.into()))
}

async fn clear_advanced(State(state): State<AppState>) -> Json<FilterResponse> {
    Json(state.store.write().await.clear_advanced_filters().into())
}

async fn remove_advanced(
    State(state): State<AppState>,
    Path(kind): Path<AdvancedFilterKind>,
    Query(params): Query<RemoveFilterQuery>,
) -> Json<FilterResponse> {
    Json(
        state
            .store
            .write()
            .await
            .remove_advanced_filter(kind, params.value.as_deref())
            .into(),
    )
}

async fn list_zones() -> Json<&'static [Zone]> {
    Json(&catalog::ZONES[..])
}

async fn list_regions(Query(params): Query<RegionsQuery>) -> Json<Vec<&'static Region>> {
    let zones: Vec<&str> = params
        .zones
        .as_deref()
        .map(|raw| raw.split(',').map(str::trim).filter(|z| !z.is_empty()).collect())
        .unwrap_or_default();
    Json(catalog::regions_for_zones(&zones))
}

async fn list_sro_offices() -> Json<&'static [SroOffice]> {
    Json(&catalog::SRO_OFFICES[..])
}

/// Refresh every panel against the current filters and render them
async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    let snapshot = state.store.read().await.get_state();
    tokio::join!(
        state.dashboard.refresh(&snapshot),
        state.dashboard.refresh_digest()
    );
    Json(state.dashboard.view().await)
}

/// Render the panels as they stand, without fetching
async fn peek_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.dashboard.view().await)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/filters", get(get_filters).delete(reset_filters))
        .route("/api/filters/zones", delete(clear_zones))
        .route("/api/filters/zones/{id}/toggle", post(toggle_zone))
        .route("/api/filters/regions", put(set_regions).delete(clear_regions))
        .route("/api/filters/regions/{id}/toggle", post(toggle_region))
        .route("/api/filters/timeframe", put(set_timeframe))
        .route("/api/filters/date-range", put(set_date_range))
        .route("/api/filters/search", put(set_search).delete(clear_search))
        .route("/api/filters/advanced", patch(patch_advanced).delete(clear_advanced))
        .route("/api/filters/advanced/{kind}", delete(remove_advanced))
        .route("/api/catalog/zones", get(list_zones))
        .route("/api/catalog/regions", get(list_regions))
        .route("/api/catalog/sro-offices", get(list_sro_offices))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/dashboard/current", get(peek_dashboard))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);

    let config = GatewayConfig::from_env();
    let gateway: Arc<dyn MarketDataGateway> =
        match MarketPulseGateway::new(config.clone(), Some(metrics.clone())) {
            Ok(gateway) => {
                info!(base_url = %config.base_url, "Analytics API gateway ready");
                Arc::new(gateway)
            }
            Err(e) => {
                warn!(error = %e, "Analytics API gateway unavailable - serving fallback data only");
                Arc::new(OfflineGateway)
            }
        };

    let state = AppState::new(
        FilterStore::new(Arc::new(LocalClock)),
        Dashboard::new(gateway),
        metrics,
    );
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
