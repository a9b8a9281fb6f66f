//! Router builder for payment routes

use crate::server::handlers::{
    AppState, create_payment, delete_payment, get_payment, list_payments, toggle_payment,
    update_payment,
};
use axum::{
    Router,
    routing::{get, patch},
};

/// Build the payment resource routes
///
/// - GET /payments - List or query payments
/// - POST /payments - Create a payment
/// - GET /payments/{id} - Get a payment
/// - PUT /payments/{id} - Replace a payment's availability and info
/// - DELETE /payments/{id} - Delete a payment
/// - PATCH /payments/{id}/toggle - Flip availability
pub fn build_payment_routes(state: AppState) -> Router {
    Router::new()
        .route("/payments", get(list_payments).post(create_payment))
        .route(
            "/payments/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
        .route("/payments/{id}/toggle", patch(toggle_payment))
        .with_state(state)
}
