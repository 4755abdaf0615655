use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{clear_cache, device_page, device_qr, device_sheet, devices, health, index, select};
use super::state::{AppState, PHOTOS_MOUNT};

pub fn app_router(state: AppState, static_dir: &std::path::Path) -> Router {
    let photos = ServeDir::new(state.cache.images_dir());
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/devices", get(devices))
        .route("/select", get(select))
        .route("/device/:id", get(device_page))
        .route("/device/:id/sheet", get(device_sheet))
        .route("/device/:id/qr", get(device_qr))
        .route("/cache/clear", post(clear_cache))
        .nest_service(PHOTOS_MOUNT, photos)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
