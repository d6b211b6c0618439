//! Quote handler
//!
//! Mounted as the router fallback, so it answers every path and method.

use crate::config::FaultPolicy;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cotacao_core::QuoteError;
use tracing::{error, info};

pub async fn handle(State(state): State<AppState>) -> Response {
    match state.quotes.refresh().await {
        Ok(quote) => {
            info!("Responding with bid {:?}", quote.bid);
            (StatusCode::OK, Json(quote.bid)).into_response()
        }
        Err(e) => fault(state.fault_policy, e),
    }
}

/// The single place where a non-deadline failure becomes an outcome.
fn fault(policy: FaultPolicy, err: QuoteError) -> Response {
    error!("Quote request failed: {}", err);

    match policy {
        FaultPolicy::Abort => {
            error!("Fault policy is abort, terminating");
            std::process::exit(1);
        }
        FaultPolicy::Respond => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}
