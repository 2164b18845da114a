//! Label CRUD and label-to-image association handlers.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;
use uuid::Uuid;

use medtag_core::ImageAssociation;

use crate::auth::AuthContext;
use crate::dto::{
    AssociateLabelRequest, CreateLabelRequest, DeleteLabelsRequest, LabelDto, LabelsResponse,
    MessageResponse,
};
use crate::error::AppError;
use crate::ServerState;

/// GET /api/labels - List all labels.
pub async fn list(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<LabelsResponse>, AppError> {
    let labels = state.labels.list()?;

    Ok(Json(LabelsResponse {
        labels: labels.into_iter().map(LabelDto::from).collect(),
    }))
}

/// POST /api/labels - Create a label.
///
/// No de-duplication: the same text can be inserted any number of times.
pub async fn create(
    State(state): State<Arc<ServerState>>,
    _auth: AuthContext,
    Json(req): Json<CreateLabelRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let text = req.text.unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::Validation("Text field is required".into()));
    }

    let label = state.labels.insert(&text)?;
    info!("Created label {} ({})", label.text, label.id);

    Ok(Json(MessageResponse::new("Label added successfully")))
}

/// DELETE /api/labels - Delete labels by id in one batch.
///
/// A malformed id is fatal for the whole batch and surfaces as a server
/// error; nothing is deleted in that case.
pub async fn delete(
    State(state): State<Arc<ServerState>>,
    _auth: AuthContext,
    Json(req): Json<DeleteLabelsRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let ids = req.ids.unwrap_or_default();
    if ids.is_empty() {
        return Err(AppError::Validation("Label IDs are required".into()));
    }

    let ids = ids
        .iter()
        .map(|id| {
            Uuid::parse_str(id)
                .map_err(|e| AppError::Internal(format!("Invalid label id {}: {}", id, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let removed = state.labels.delete_many(&ids)?;
    info!("Deleted {} label(s)", removed);

    Ok(Json(MessageResponse::new("Labels deleted successfully")))
}

/// POST /api/associateLabel - Attach a set of labels to an image on a user.
///
/// Three existence checks run in sequence (user, image file, every label
/// text), each short-circuiting with a 404. The checks and the final
/// update are separate store round-trips, not a transaction.
pub async fn associate(
    State(state): State<Arc<ServerState>>,
    _auth: AuthContext,
    Json(req): Json<AssociateLabelRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = req.user_email.unwrap_or_default();
    let Some(user) = state.users.find_by_email(&email)? else {
        return Err(AppError::NotFound("User not found".into()));
    };

    let image = req.image.unwrap_or_default();
    if !state.images.exists(&image) {
        return Err(AppError::NotFound("Image not found".into()));
    }

    let found: HashSet<String> = state
        .labels
        .find_by_texts(&req.labels)?
        .into_iter()
        .map(|l| l.text)
        .collect();
    let mut missing: Vec<&str> = req
        .labels
        .iter()
        .map(String::as_str)
        .filter(|t| !found.contains(*t))
        .collect();
    missing.sort();
    missing.dedup();
    if !missing.is_empty() {
        return Err(AppError::NotFound(format!(
            "Labels not found: {}",
            missing.join(", ")
        )));
    }

    state.users.add_image(
        &user.email,
        ImageAssociation {
            filename: image,
            labels: req.labels,
        },
    )?;
    info!("Associated labels with image for {}", user.email);

    Ok(Json(MessageResponse::new(
        "Labels associated with image successfully",
    )))
}
