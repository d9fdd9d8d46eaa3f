//! Route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::error::ApiError;
use super::AppState;
use crate::types::summarize::{
    input_schema, output_schema, BatchMetadata, BatchRequest, BatchResponse, InvokeRequest,
    InvokeResponse, RunMetadata, SummarizeInput, SummarizeOutput,
};

#[derive(Serialize)]
pub(super) struct Health {
    ok: bool,
    service: &'static str,
}

pub(super) async fn healthz() -> Json<Health> {
    Json(Health {
        ok: true,
        service: env!("CARGO_PKG_NAME"),
    })
}

/// `POST {base}` with a bare `{"text": ...}` body.
pub(super) async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SummarizeOutput>, ApiError> {
    let Json(body) = payload?;
    let input = SummarizeInput::from_value(&body, "")?;

    let run_id = Uuid::new_v4();
    let output = state
        .chain
        .invoke(&input)
        .instrument(tracing::info_span!("summarize", %run_id))
        .await?;

    Ok(Json(SummarizeOutput { output }))
}

/// `POST {base}/invoke` with an `{"input": {...}}` envelope.
pub(super) async fn invoke(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InvokeResponse>, ApiError> {
    let Json(body) = payload?;
    let request = InvokeRequest::from_value(&body)?;

    let run_id = Uuid::new_v4();
    let output = state
        .chain
        .invoke(&request.input)
        .instrument(tracing::info_span!("invoke", %run_id))
        .await?;

    tracing::info!(%run_id, "Invoke completed");

    Ok(Json(InvokeResponse {
        output,
        metadata: RunMetadata { run_id },
    }))
}

/// `POST {base}/batch` with an `{"inputs": [...]}` envelope.
pub(super) async fn batch(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(body) = payload?;
    let request = BatchRequest::from_value(&body)?;

    let run_ids: Vec<Uuid> = request.inputs.iter().map(|_| Uuid::new_v4()).collect();
    let batch_span = tracing::info_span!("batch", size = run_ids.len());
    let runs = run_ids.iter().zip(&request.inputs).map(|(run_id, input)| {
        state
            .chain
            .invoke(input)
            .instrument(tracing::info_span!(parent: &batch_span, "invoke", %run_id))
    });
    let output = futures::future::try_join_all(runs)
        .instrument(batch_span.clone())
        .await?;

    tracing::info!(run_ids = ?run_ids, "Batch completed");

    Ok(Json(BatchResponse {
        output,
        metadata: BatchMetadata { run_ids },
    }))
}

pub(super) async fn get_input_schema() -> Json<Value> {
    Json(input_schema())
}

pub(super) async fn get_output_schema() -> Json<Value> {
    Json(output_schema())
}
