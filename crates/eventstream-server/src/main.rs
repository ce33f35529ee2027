//! EventStream HTTP Server
//!
//! Axum-based server exposing the event catalog, subscription plans,
//! and the checkout/payment API backed by the simulated gateway.

mod handlers;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventstream_billing::{
    ApprovalRate, PaymentProcessor, PlanCatalog, SimulatedGateway, TransactionLedger,
    DEFAULT_APPROVAL_RATE, DEFAULT_GATEWAY_LATENCY,
};
use eventstream_catalog::{CategoryCatalog, EventCatalog};

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Gateway tuning from environment
    let approval_rate = std::env::var("EVENTSTREAM_APPROVAL_RATE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_APPROVAL_RATE);
    let latency = std::env::var("EVENTSTREAM_GATEWAY_LATENCY_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_GATEWAY_LATENCY);

    tracing::info!(
        approval_rate,
        latency_ms = latency.as_millis() as u64,
        "Simulated gateway configured"
    );

    // Catalogs and billing core
    let plans = Arc::new(PlanCatalog::new());
    let ledger = Arc::new(TransactionLedger::new());
    let gateway = Arc::new(SimulatedGateway::new(
        latency,
        ApprovalRate::new(approval_rate),
    ));
    let processor = Arc::new(PaymentProcessor::new(
        plans.clone(),
        gateway,
        ledger.clone(),
    ));

    tracing::info!("Loaded {} subscription plans", plans.list().len());

    // Build application state
    let state = AppState {
        plans,
        events: Arc::new(EventCatalog::new()),
        categories: Arc::new(CategoryCatalog::new()),
        processor,
        ledger,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(handlers::health_check))
        // Catalog API
        .route("/api/plans", get(handlers::list_plans))
        .route("/api/events", get(handlers::list_events))
        .route("/api/events/featured", get(handlers::featured_events))
        .route("/api/events/{id}", get(handlers::get_event))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/{id}/events", get(handlers::category_events))
        // Checkout & payments
        .route("/api/checkout", post(handlers::create_checkout))
        .route("/api/checkout/retry", post(handlers::retry_checkout))
        .route("/api/payments", get(handlers::payment_history))
        .route("/api/payments/summary", get(handlers::payment_summary))
        .route("/api/payments/{id}", get(handlers::get_payment))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 EventStream server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                    - Health check");
    tracing::info!("  GET  /api/plans                 - List subscription plans");
    tracing::info!("  GET  /api/events                - List events (?category=)");
    tracing::info!("  GET  /api/events/featured       - Featured events");
    tracing::info!("  GET  /api/events/{{id}}           - Event details");
    tracing::info!("  GET  /api/categories            - List categories");
    tracing::info!("  GET  /api/categories/{{id}}/events - Events in a category");
    tracing::info!("  POST /api/checkout              - Submit a checkout");
    tracing::info!("  POST /api/checkout/retry        - Retry a failed payment");
    tracing::info!("  GET  /api/payments              - Payment history (?status=)");
    tracing::info!("  GET  /api/payments/summary      - Spending summary");
    tracing::info!("  GET  /api/payments/{{id}}         - Payment receipt");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
