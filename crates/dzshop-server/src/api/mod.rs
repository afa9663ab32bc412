mod shipping;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use dzshop_shipping::WilayaShipping;
use dzshop_woo::WooClient;

#[derive(Clone)]
pub struct AppState {
    pub woo: Arc<WooClient>,
    pub wilaya: Arc<WilayaShipping>,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/shipping", get(shipping::get_shipping_zones))
        .route(
            "/api/shipping/wilaya/{wilaya}",
            get(shipping::get_wilaya_shipping),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
