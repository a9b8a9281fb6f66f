//! HTTP handlers for payment operations
//!
//! Handlers are thin: they turn path, query and body input into the plain
//! values the [`PaymentService`] expects, and turn its results back into
//! HTTP responses. Boolean-like form values (`"Yes"` / `"No"`) are
//! normalized here and never reach the service.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::{Map, Value};

use crate::core::error::{PaymentError, Result};
use crate::core::flag::parse_flag;
use crate::core::{PaymentId, PaymentQuery, PaymentRecord, PaymentRequest, PaymentService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: PaymentService,
}

/// Path of a single payment resource
pub fn payment_location(id: &PaymentId) -> String {
    format!("/payments/{}", id)
}

/// Decode a raw request body as JSON
///
/// The body is read as bytes rather than through the `Json` extractor, so a
/// malformed body or a missing content type is reported like any other
/// validation failure, on field `body`.
pub fn decode_json_body(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PaymentError::validation("body", "is required"));
    }
    serde_json::from_slice(body)
        .map_err(|e| PaymentError::validation("body", format!("must be valid JSON ({})", e)))
}

/// Parse a create/update body into a [`PaymentRequest`]
///
/// Body shape: `{customer_id, order_id, available, type, info}`. Ids may be
/// numbers or numeric strings, `available` a boolean or a boolean-like
/// string. `info` is passed through untouched for the codec to check.
pub fn parse_payment_body(body: Value) -> Result<PaymentRequest> {
    let Value::Object(mut fields) = body else {
        return Err(PaymentError::validation(
            "body",
            "must be a JSON object with customer_id, order_id, available, type and info",
        ));
    };

    let customer_id = body_integer(&fields, "customer_id")?;
    let order_id = body_integer(&fields, "order_id")?;

    let available = match fields.get("available") {
        None | Some(Value::Null) => {
            return Err(PaymentError::validation("available", "is required"));
        }
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => parse_flag(s).ok_or_else(|| {
            PaymentError::validation("available", "must be true/false or Yes/No")
        })?,
        Some(_) => {
            return Err(PaymentError::validation(
                "available",
                "must be true/false or Yes/No",
            ));
        }
    };

    let payment_type = match fields.get("type") {
        None | Some(Value::Null) => return Err(PaymentError::validation("type", "is required")),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(PaymentError::validation("type", "must be a string")),
    };

    let info = fields.remove("info").unwrap_or(Value::Null);

    Ok(PaymentRequest {
        customer_id,
        order_id,
        available,
        payment_type,
        info,
    })
}

fn body_integer(fields: &Map<String, Value>, field: &'static str) -> Result<i64> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(PaymentError::validation(field, "is required")),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| PaymentError::validation(field, "must be a positive integer")),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| PaymentError::validation(field, "must be a positive integer")),
        Some(_) => Err(PaymentError::validation(field, "must be a positive integer")),
    }
}

/// GET /payments - list payments, optionally filtered
///
/// Query params: `customer_id`, `order_id`, `available`, `type`
pub async fn list_payments(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<PaymentRecord>>> {
    tracing::info!("Request for payments list");

    let query = PaymentQuery::from_pairs(params)?;
    let payments = if query.is_empty() {
        state.service.list().await?
    } else {
        state.service.query(&query).await?
    };
    Ok(Json(payments))
}

/// GET /payments/{id}
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentRecord>> {
    tracing::info!(payment_id = %id, "Request for payment");

    let id: PaymentId = id.parse()?;
    Ok(Json(state.service.get(&id).await?))
}

/// POST /payments - 201 with a Location header
pub async fn create_payment(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    tracing::info!("Request to create a payment");

    let request = parse_payment_body(decode_json_body(&body)?)?;
    let created = state.service.create(request).await?;
    let location = payment_location(&created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /payments/{id} - full replacement body
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<PaymentRecord>> {
    tracing::info!(payment_id = %id, "Request to update payment");

    let id: PaymentId = id.parse()?;
    let request = parse_payment_body(decode_json_body(&body)?)?;
    Ok(Json(state.service.update(&id, request).await?))
}

/// PATCH /payments/{id}/toggle - flip availability
pub async fn toggle_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentRecord>> {
    tracing::info!(payment_id = %id, "Request to toggle payment availability");

    let id: PaymentId = id.parse()?;
    Ok(Json(state.service.toggle_availability(&id).await?))
}

/// DELETE /payments/{id} - 204, or 404 when already gone
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    tracing::info!(payment_id = %id, "Request to delete payment");

    let id: PaymentId = id.parse()?;
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> Value {
        json!({
            "customer_id": 1,
            "order_id": "10",
            "available": "Yes",
            "type": "PayPal",
            "info": {"email": "a@b.co", "phone_number": "5551234567", "token": "tok"}
        })
    }

    #[test]
    fn test_parse_body_normalizes_form_values() {
        let request = parse_payment_body(body()).unwrap();
        assert_eq!(request.customer_id, 1);
        assert_eq!(request.order_id, 10);
        assert!(request.available);
        assert_eq!(request.payment_type, "PayPal");
        assert_eq!(request.info["token"], "tok");
    }

    #[test]
    fn test_parse_body_missing_fields() {
        for field in ["customer_id", "order_id", "available", "type"] {
            let mut raw = body();
            raw.as_object_mut().unwrap().remove(field);
            let err = parse_payment_body(raw).unwrap_err();
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn test_parse_body_bad_available() {
        let mut raw = body();
        raw["available"] = json!("Maybe");
        assert_eq!(
            parse_payment_body(raw).unwrap_err().field(),
            Some("available")
        );
    }

    #[test]
    fn test_parse_body_missing_info_left_to_codec() {
        let mut raw = body();
        raw.as_object_mut().unwrap().remove("info");
        let request = parse_payment_body(raw).unwrap();
        assert!(request.info.is_null());
    }

    #[test]
    fn test_decode_body_reports_malformed_json_on_body() {
        let err = decode_json_body(br#"{"customer_id": 1,"#).unwrap_err();
        assert_eq!(err.field(), Some("body"));

        let err = decode_json_body(b"  \n").unwrap_err();
        assert_eq!(err.field(), Some("body"));

        let value = decode_json_body(br#"{"type": "paypal"}"#).unwrap();
        assert_eq!(value["type"], "paypal");
    }

    #[test]
    fn test_parse_body_rejects_non_object() {
        let err = parse_payment_body(json!([1, 2])).unwrap_err();
        assert_eq!(err.field(), Some("body"));
    }
}
