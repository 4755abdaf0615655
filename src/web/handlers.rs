use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use tracing::{error, info, warn};

use super::models::{DeviceCard, DeviceDetail, ListParams, SelectParams};
use super::session::{SessionView, ViewParams};
use super::state::AppState;
use super::templates::{DeviceTemplate, DevicesListTemplate, IndexTemplate, NotFoundTemplate};
use crate::catalog::Catalog;
use crate::constants::{get_filter_programs, ITEM_NOT_FOUND};
use crate::error::CatalogError;
use crate::export::DeviceSheet;
use crate::filter::filter_devices;
use crate::share::canonical_link;
use crate::urls::{attachment_disposition, device_path};

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("<h1>Template rendering failed: {}</h1>", e)))
                .into_response()
        }
    }
}

fn catalog_error(e: CatalogError) -> Response {
    error!("Catalog unavailable: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!("<h1>Error loading catalog: {}</h1>", e)),
    )
        .into_response()
}

fn not_found(session: SessionView) -> Response {
    let mut response = render(NotFoundTemplate {
        session,
        message: ITEM_NOT_FOUND,
    });
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let devices = state.cache.get().map(|s| s.catalog.len()).ok();
    Json(serde_json::json!({
        "status": if devices.is_some() { "healthy" } else { "degraded" },
        "service": "subsidy_lookup",
        "devices": devices,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

fn device_cards(state: &AppState, catalog: &Catalog, params: &ListParams) -> Vec<DeviceCard> {
    let query = params.query();
    let program = query.program_filter();
    filter_devices(catalog.devices(), &program, query.text())
        .into_iter()
        .map(|d| DeviceCard::build(d, state.widths.list_width, state.probe.as_ref(), &state.links))
        .collect()
}

pub async fn index(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let session = SessionView::from_params(&params.view());
    let snapshot = match state.cache.get() {
        Ok(snapshot) => snapshot,
        Err(e) => return catalog_error(e),
    };
    let query = params.query();

    render(IndexTemplate {
        session,
        query: query.text().to_string(),
        program: query.program_filter().as_str().to_string(),
        programs: get_filter_programs(),
        options: snapshot.catalog.select_options(),
        devices: device_cards(&state, &snapshot.catalog, &params),
    })
}

/// Filtered list: the partial for HTMX requests, otherwise the whole page.
pub async fn devices(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Response {
    if headers.get("HX-Request").is_none() {
        return index(State(state), Query(params)).await;
    }
    let session = SessionView::from_params(&params.view());
    match state.cache.get() {
        Ok(snapshot) => render(DevicesListTemplate {
            session,
            devices: device_cards(&state, &snapshot.catalog, &params),
        }),
        Err(e) => catalog_error(e),
    }
}

/// Direct selection by device name or alias.
pub async fn select(Query(params): Query<SelectParams>) -> Redirect {
    let session = SessionView::from_params(&params.view());
    match params.device.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => {
            Redirect::to(&format!("{}?{}", device_path(id), session.query()))
        }
        _ => Redirect::to(&format!("/?{}", session.query())),
    }
}

pub async fn device_page(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(view): Query<ViewParams>,
) -> Response {
    let session = SessionView::from_params(&view);
    let snapshot = match state.cache.get() {
        Ok(snapshot) => snapshot,
        Err(e) => return catalog_error(e),
    };
    let Some(device) = snapshot.catalog.get(&device_id) else {
        warn!("Device {} not found", device_id);
        return not_found(session);
    };

    let detail = DeviceDetail::build(
        device,
        state.widths.detail_width,
        state.probe.as_ref(),
        &state.links,
    );
    render(DeviceTemplate { session, device: detail })
}

pub async fn device_sheet(State(state): State<AppState>, Path(device_id): Path<String>) -> Response {
    let snapshot = match state.cache.get() {
        Ok(snapshot) => snapshot,
        Err(e) => return catalog_error(e),
    };
    let Some(device) = snapshot.catalog.get(&device_id) else {
        return not_found(SessionView::default());
    };

    let sheet = DeviceSheet::build(device, state.widths.detail_width, state.probe.as_ref());
    match state.renderer.render(&sheet) {
        Ok(bytes) => {
            info!("Exported sheet for {}", device_id);
            let disposition = attachment_disposition(&state.renderer.file_name(&sheet));
            (
                [
                    (header::CONTENT_TYPE, state.renderer.content_type().to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            error!("Sheet export failed for {}: {}", device_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn device_qr(State(state): State<AppState>, Path(device_id): Path<String>) -> Response {
    let snapshot = match state.cache.get() {
        Ok(snapshot) => snapshot,
        Err(e) => return catalog_error(e),
    };
    let Some(device) = snapshot.catalog.get(&device_id) else {
        return not_found(SessionView::default());
    };

    let link = canonical_link(device);
    match state.encoder.encode(&link) {
        Ok(bytes) => ([(header::CONTENT_TYPE, state.encoder.content_type())], bytes).into_response(),
        Err(e) => {
            error!("Link encoding failed for {}: {}", device_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn clear_cache(State(state): State<AppState>, Query(view): Query<ViewParams>) -> Response {
    let session = SessionView::from_params(&view);
    match state.cache.invalidate() {
        Ok(()) => Redirect::to(&format!("/?{}", session.query())).into_response(),
        Err(e) => catalog_error(e),
    }
}
