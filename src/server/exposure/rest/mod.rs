//! REST API exposure for the payment service
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`.

use super::super::host::ServerHost;
use crate::server::handlers::AppState;
use crate::server::router::build_payment_routes;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Service index at `/`
    /// - Payment routes
    /// - Custom routes
    ///
    /// wrapped in request tracing and a permissive CORS layer.
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let state = AppState {
            service: host.service.clone(),
        };

        let mut app = Self::health_routes()
            .route("/", get(Self::index))
            .merge(build_payment_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Ok(app.layer(cors).layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "payments-rs"
        }))
    }

    async fn index() -> Json<Value> {
        tracing::info!("Request for Root URL");
        Json(json!({
            "name": "Payment REST API Service",
            "version": env!("CARGO_PKG_VERSION"),
            "paths": "/payments"
        }))
    }
}
