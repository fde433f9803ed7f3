use crate::config::AppConfig;
use crate::presentation::{build_map, render_error_page, render_page, MapBuild, Statistics};
use crate::render::{to_geojson, MapView};
use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Read-only per-process state. Attraction data is reloaded on every request.
pub struct AppState {
    pub config: AppConfig,
}

#[derive(Serialize)]
pub struct MapResponse {
    map: MapView,
    statistics: Statistics,
}

pub fn router(config: AppConfig) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/", get(index_handler))
        .route("/api/map", get(map_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/attractions.geojson", get(geojson_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: AppConfig) -> Result<()> {
    let port = config.server.port;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    println!("Starting server on http://{}", addr);

    let app = router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Loading and parsing the CSV is blocking file I/O, so it runs off the async workers.
async fn run_pipeline(state: Arc<AppState>) -> Result<MapBuild, String> {
    match tokio::task::spawn_blocking(move || build_map(&state.config)).await {
        Ok(Ok(build)) => Ok(build),
        Ok(Err(e)) => {
            error!("Failed to build map: {}", e);
            Err(e.to_string())
        }
        Err(e) => {
            error!("Map build task failed: {}", e);
            Err(e.to_string())
        }
    }
}

fn json_error(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let page = &state.config.page;
    let build = match run_pipeline(state.clone()).await {
        Ok(build) => build,
        Err(message) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(render_error_page(page, &message))).into_response()
        }
    };

    match render_page(page, &build.view, &build.statistics) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(render_error_page(page, &e.to_string()))).into_response()
        }
    }
}

async fn map_handler(State(state): State<Arc<AppState>>) -> Response {
    match run_pipeline(state.clone()).await {
        Ok(build) => Json(MapResponse {
            map: build.view,
            statistics: build.statistics,
        })
        .into_response(),
        Err(message) => json_error(message),
    }
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> Response {
    match run_pipeline(state.clone()).await {
        Ok(build) => Json(build.statistics).into_response(),
        Err(message) => json_error(message),
    }
}

async fn geojson_handler(State(state): State<Arc<AppState>>) -> Response {
    match run_pipeline(state.clone()).await {
        Ok(build) => {
            info!("Serving {} attractions as GeoJSON", build.statistics.total);
            (
                [(header::CONTENT_TYPE, "application/geo+json")],
                Json(to_geojson(&build.grouped)),
            )
                .into_response()
        }
        Err(message) => json_error(message),
    }
}
