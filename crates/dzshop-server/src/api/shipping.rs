//! The aggregated zones endpoint and the wilaya query endpoint.
//!
//! `GET /api/shipping` mirrors what WooCommerce scatters across three
//! endpoints into one envelope: every zone with its location rules and its
//! enabled methods, dropping zones that end up with no methods at all.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::future::join_all;

use dzshop_shipping::{ZoneSnapshot, ZonesEnvelope};
use dzshop_woo::{WooClient, WooError};

use super::AppState;

/// `GET /api/shipping` — the envelope consumed by the zone repository.
pub(super) async fn get_shipping_zones(State(state): State<AppState>) -> Response {
    match aggregate_zones(&state.woo).await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to aggregate shipping zones");
            (
                upstream_status(&err),
                Json(serde_json::json!({ "error": "Failed to fetch shipping zones" })),
            )
                .into_response()
        }
    }
}

/// `GET /api/shipping/wilaya/{wilaya}` — resolved prices for one wilaya.
pub(super) async fn get_wilaya_shipping(
    State(state): State<AppState>,
    Path(wilaya): Path<String>,
) -> Response {
    Json(state.wilaya.resolve(Some(&wilaya)).await).into_response()
}

/// A concrete upstream status on the zone list is forwarded to the caller;
/// anything else (network failure, bad body) is an internal error.
fn upstream_status(err: &WooError) -> StatusCode {
    match err {
        WooError::UnexpectedStatus { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn aggregate_zones(woo: &WooClient) -> Result<ZonesEnvelope, WooError> {
    let zone_infos = woo.get_shipping_zones().await?;
    let total_zones = zone_infos.len();

    let snapshots = join_all(zone_infos.into_iter().map(|info| async move {
        // One broken zone must not break the whole envelope; its sub-fetch
        // failures degrade to empty lists and the zone filters out below.
        let locations = match woo.get_zone_locations(info.id).await {
            Ok(locations) => locations,
            Err(err) => {
                tracing::warn!(zone_id = info.id, error = %err, "failed to fetch zone locations");
                Vec::new()
            }
        };
        let methods = match woo.get_zone_methods(info.id).await {
            Ok(methods) => methods,
            Err(err) => {
                tracing::warn!(zone_id = info.id, error = %err, "failed to fetch zone methods");
                Vec::new()
            }
        };

        ZoneSnapshot {
            id: info.id,
            name: info.name,
            order: info.order,
            locations,
            methods: methods.into_iter().filter(|m| m.enabled).collect(),
        }
    }))
    .await;

    let zones: Vec<ZoneSnapshot> = snapshots
        .into_iter()
        .filter(|z| !z.methods.is_empty())
        .collect();
    let active_zones = zones.len();

    Ok(ZonesEnvelope {
        success: true,
        zones,
        total_zones,
        active_zones,
    })
}
