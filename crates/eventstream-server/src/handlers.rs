//! HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use eventstream_billing::{
    BillingError, CheckoutSession, LedgerSummary, PaymentMethod, Plan, TransactionId,
    TransactionRecord, TransactionStatus,
};
use eventstream_catalog::{Category, Event};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub transactions_recorded: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Card fields as submitted by the checkout form
#[derive(Deserialize)]
pub struct PaymentMethodPayload {
    pub holder_name: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

impl PaymentMethodPayload {
    fn into_method(self) -> PaymentMethod {
        PaymentMethod::new(self.holder_name, self.card_number, self.expiry, self.cvv)
    }
}

impl std::fmt::Debug for PaymentMethodPayload {
    // Redacted like PaymentMethod: card data must never reach logs
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentMethodPayload")
            .field("holder_name", &self.holder_name)
            .field("card_number", &"<redacted>")
            .field("expiry", &self.expiry)
            .field("cvv", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckoutPayload {
    pub plan_id: String,
    pub payment_method: PaymentMethodPayload,
}

#[derive(Debug, Deserialize)]
pub struct RetryPayload {
    pub transaction_id: String,
    pub payment_method: PaymentMethodPayload,
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// A transaction record plus the customer-facing decline text, if any
#[derive(Serialize)]
pub struct PaymentOutcome {
    #[serde(flatten)]
    pub record: TransactionRecord,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_message: Option<&'static str>,
}

impl From<TransactionRecord> for PaymentOutcome {
    fn from(record: TransactionRecord) -> Self {
        let decline_message = record.decline_message();
        Self {
            record,
            decline_message,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn billing_error(err: BillingError) -> ApiError {
    let status = match &err {
        BillingError::InvalidPlan(_) | BillingError::TransactionNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        BillingError::InvalidPaymentMethod(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BillingError::SessionAlreadySubmitted | BillingError::NotRetryable { .. } => {
            StatusCode::CONFLICT
        }
    };

    tracing::warn!("Checkout rejected: {}", err);

    (
        status,
        Json(ErrorResponse {
            error: err.user_message().into(),
            code: err.code().into(),
        }),
    )
}

fn not_found_error(what: &str, code: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("{what} not found"),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        transactions_recorded: state.ledger.len(),
    })
}

/// List subscription plans
pub async fn list_plans(State(state): State<AppState>) -> Json<Vec<Plan>> {
    Json(state.plans.list().to_vec())
}

/// List events, optionally filtered by category
///
/// An unknown category filter is a 404, same as the path-param routes.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = match query.category.as_deref() {
        Some(category) => {
            if state.categories.get(category).is_none() {
                return Err(not_found_error("Category", "CATEGORY_NOT_FOUND"));
            }
            state
                .events
                .by_category(category)
                .into_iter()
                .cloned()
                .collect()
        }
        None => state.events.events().to_vec(),
    };
    Ok(Json(events))
}

/// Events promoted on the home page
pub async fn featured_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.events.featured().into_iter().cloned().collect())
}

/// Single event by id
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    state
        .events
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found_error("Event", "EVENT_NOT_FOUND"))
}

/// List event categories
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.categories.list().to_vec())
}

/// Events belonging to one category
pub async fn category_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Event>>, ApiError> {
    if state.categories.get(&id).is_none() {
        return Err(not_found_error("Category", "CATEGORY_NOT_FOUND"));
    }

    let events = state.events.by_category(&id).into_iter().cloned().collect();
    Ok(Json(events))
}

/// Create a checkout session for a plan and submit it
///
/// The response is the terminal transaction record: a declined payment is
/// a 200 with `"status": "failed"`, not an error status.
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutPayload>,
) -> Result<Json<PaymentOutcome>, ApiError> {
    let session = CheckoutSession::new(
        &state.plans,
        &payload.plan_id,
        payload.payment_method.into_method(),
    )
    .map_err(billing_error)?;

    let record = state
        .processor
        .submit(&session)
        .await
        .map_err(billing_error)?;

    Ok(Json(PaymentOutcome::from(record)))
}

/// Retry a failed payment with fresh card details
pub async fn retry_checkout(
    State(state): State<AppState>,
    Json(payload): Json<RetryPayload>,
) -> Result<Json<PaymentOutcome>, ApiError> {
    let id = TransactionId::from_string(&payload.transaction_id);

    let mut session = state.ledger.retry(&id).map_err(billing_error)?;
    session
        .replace_payment_method(payload.payment_method.into_method())
        .map_err(billing_error)?;

    let record = state
        .processor
        .submit(&session)
        .await
        .map_err(billing_error)?;

    Ok(Json(PaymentOutcome::from(record)))
}

/// Payment history, most recent first, optionally filtered by status
pub async fn payment_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<TransactionRecord>>, ApiError> {
    let filter = match query.status.as_deref() {
        None | Some("all") => None,
        Some(value) => Some(TransactionStatus::from_str(value).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown status filter: {value}"),
                    code: "INVALID_STATUS".into(),
                }),
            )
        })?),
    };

    let mut records = state.ledger.query(filter);
    records.reverse();
    Ok(Json(records))
}

/// Totals for the history page's summary cards
pub async fn payment_summary(State(state): State<AppState>) -> Json<LedgerSummary> {
    Json(state.ledger.summary())
}

/// Single transaction by id (receipt view)
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentOutcome>, ApiError> {
    let id = TransactionId::from_string(id);
    state
        .ledger
        .get(&id)
        .map(PaymentOutcome::from)
        .map(Json)
        .ok_or_else(|| not_found_error("Transaction", "TRANSACTION_NOT_FOUND"))
}

/// JSON 404 for unknown routes
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found", "code": "NOT_FOUND" })),
    )
}
