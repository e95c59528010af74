// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP trigger endpoint.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | runs the pipeline; `200 OK` or `500 ERROR <kind>` |
//! | `GET /healthz` | `200 ok` |
//! | `GET /metrics` | Prometheus text exposition |
//!
//! A request to `/` blocks until its run has finished. Runs are serialized:
//! a trigger that arrives during a run waits for it, then starts its own.

use crate::constants::TRIGGER_OK_BODY;
use crate::inventory::InventorySource;
use crate::metrics::gather_metrics;
use crate::sync::ZoneSync;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

/// Shared state of the trigger server.
pub struct AppState<S> {
    sync: ZoneSync<S>,
    run_lock: Mutex<()>,
}

impl<S> AppState<S> {
    /// Wrap a pipeline for serving.
    pub fn new(sync: ZoneSync<S>) -> Self {
        Self {
            sync,
            run_lock: Mutex::new(()),
        }
    }
}

/// Build the trigger router.
pub fn router<S>(state: Arc<AppState<S>>) -> Router
where
    S: InventorySource + 'static,
{
    Router::new()
        .route("/", get(trigger::<S>))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn trigger<S>(State(state): State<Arc<AppState<S>>>) -> Response
where
    S: InventorySource + 'static,
{
    let _guard = state.run_lock.lock().await;
    debug!("Trigger received, starting run");

    match state.sync.run().await {
        Ok(_) => (StatusCode::OK, TRIGGER_OK_BODY).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("ERROR {}", e.kind()),
        )
            .into_response(),
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn metrics() -> Response {
    match gather_metrics() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod server_tests;
