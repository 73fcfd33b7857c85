//! HTTP handlers for entry endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::EntryService;
use crate::domain::entry::EntryError;
use crate::domain::foundation::EntryId;

use super::dto::{
    AnalysisResponse, CreateEntryRequest, CreateEntryResponse, DeleteAllResponse, EntryListResponse,
    EntryResponse, ErrorResponse, UpdateEntryRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct EntryAppState {
    service: Arc<EntryService>,
}

impl EntryAppState {
    pub fn new(service: Arc<EntryService>) -> Self {
        Self { service }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /entries - Create an entry
pub async fn create_entry(
    State(state): State<EntryAppState>,
    body: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return handle_body_rejection(rejection),
    };

    match state.service.create_entry(req.into()).await {
        Ok(entry) => {
            let response = CreateEntryResponse {
                detail: "Entry created successfully".to_string(),
                entry: entry.into(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_entry_error(e),
    }
}

/// GET /entries - List all entries
pub async fn list_entries(State(state): State<EntryAppState>) -> Response {
    match state.service.get_all_entries().await {
        Ok(entries) => {
            let response: EntryListResponse = entries.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_entry_error(e),
    }
}

/// GET /entries/:id - Get one entry
pub async fn get_entry(
    State(state): State<EntryAppState>,
    Path(entry_id): Path<String>,
) -> Response {
    let Some(id) = parse_entry_id(&entry_id) else {
        return entry_not_found();
    };

    match state.service.get_entry(&id).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(EntryResponse::from(entry))).into_response(),
        Ok(None) => handle_entry_error(EntryError::not_found(id)),
        Err(e) => handle_entry_error(e),
    }
}

/// PATCH /entries/:id - Partially update an entry
pub async fn update_entry(
    State(state): State<EntryAppState>,
    Path(entry_id): Path<String>,
    body: Result<Json<UpdateEntryRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return handle_body_rejection(rejection),
    };
    let Some(id) = parse_entry_id(&entry_id) else {
        return entry_not_found();
    };

    match state.service.update_entry(&id, req.into()).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(EntryResponse::from(entry))).into_response(),
        Ok(None) => handle_entry_error(EntryError::not_found(id)),
        Err(e) => handle_entry_error(e),
    }
}

/// DELETE /entries/:id - Delete one entry
pub async fn delete_entry(
    State(state): State<EntryAppState>,
    Path(entry_id): Path<String>,
) -> Response {
    let Some(id) = parse_entry_id(&entry_id) else {
        return entry_not_found();
    };

    match state.service.delete_entry(&id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => handle_entry_error(EntryError::not_found(id)),
        Err(e) => handle_entry_error(e),
    }
}

/// DELETE /entries - Delete every entry
pub async fn delete_all_entries(State(state): State<EntryAppState>) -> Response {
    match state.service.delete_all_entries().await {
        Ok(deleted) => {
            let response = DeleteAllResponse {
                detail: "All entries deleted".to_string(),
                deleted,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_entry_error(e),
    }
}

/// POST /entries/:id/analyze - Analyze one entry
pub async fn analyze_entry(
    State(state): State<EntryAppState>,
    Path(entry_id): Path<String>,
) -> Response {
    let Some(id) = parse_entry_id(&entry_id) else {
        return entry_not_found();
    };

    match state.service.analyze_entry(&id).await {
        Ok(analysis) => (StatusCode::OK, Json(AnalysisResponse::from(analysis))).into_response(),
        Err(e) => handle_entry_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Unparseable ids cannot name an existing entry.
fn parse_entry_id(raw: &str) -> Option<EntryId> {
    raw.parse::<EntryId>().ok()
}

fn entry_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("ENTRY_NOT_FOUND", "Entry not found")),
    )
        .into_response()
}

fn handle_body_rejection(rejection: JsonRejection) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::invalid_body(rejection.body_text())),
    )
        .into_response()
}

fn handle_entry_error(error: EntryError) -> Response {
    let status = match &error {
        EntryError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EntryError::NotFound(_) => StatusCode::NOT_FOUND,
        EntryError::Conflict(_) | EntryError::DuplicateDay(_) => StatusCode::CONFLICT,
        EntryError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EntryError::Store(msg) => {
            tracing::error!(error = %msg, "Entry store failure");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Storage is unavailable")),
            )
                .into_response();
        }
    };

    (status, Json(ErrorResponse::from(&error))).into_response()
}
