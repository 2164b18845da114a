//! Image upload, listing, retrieval, and deletion handlers.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info};

use medtag_store::ImageDir;

use crate::auth::AuthContext;
use crate::dto::{DeleteImagesRequest, ImagesResponse, MessageResponse};
use crate::error::AppError;
use crate::ServerState;

/// POST /upload - Store a multipart `image` field under its own filename.
///
/// Any failure on this endpoint answers 400 with the error message,
/// including write failures.
pub async fn upload(
    State(state): State<Arc<ServerState>>,
    _auth: AuthContext,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        // Only parts carrying a filename are files.
        if field.name() == Some("image") && field.file_name().is_some() {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?;
            image = Some((filename, bytes));
            break;
        }
    }

    let Some((filename, bytes)) = image else {
        return Err(AppError::Validation("No image provided".into()));
    };
    if filename.is_empty() {
        return Err(AppError::Validation("No selected file".into()));
    }

    state
        .images
        .save(&filename, &bytes)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    info!("Uploaded image {} ({} bytes)", filename, bytes.len());

    Ok(Json(MessageResponse::new("Image uploaded successfully")))
}

/// GET /images - List image filenames in the configured directory.
pub async fn list(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ImagesResponse>, AppError> {
    let images = state.images.list().map_err(|e| {
        error!("Failed to list images: {}", e);
        AppError::Internal(e.to_string())
    })?;

    Ok(Json(ImagesResponse { images }))
}

/// GET /images/{filename} - Stream the named file's bytes.
///
/// A missing file surfaces as a generic server error, matching the
/// directory-missing case.
pub async fn fetch(
    State(state): State<Arc<ServerState>>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.images.read(&filename).map_err(|e| {
        error!("Failed to fetch image {}: {}", filename, e);
        AppError::Internal(e.to_string())
    })?;

    let content_type = ImageDir::content_type(&filename);
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// POST /images/delete - Remove the named files in order.
///
/// The batch aborts on the first missing file; files removed before the
/// abort stay removed.
pub async fn delete(
    State(state): State<Arc<ServerState>>,
    _auth: AuthContext,
    Json(req): Json<DeleteImagesRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let filenames = req.filenames.unwrap_or_default();
    if filenames.is_empty() {
        return Err(AppError::Validation("Image filenames are required".into()));
    }

    for name in &filenames {
        if !state.images.exists(name) {
            return Err(AppError::NotFound(format!("Image {} not found", name)));
        }
        state.images.remove(name)?;
    }
    info!("Deleted {} image(s)", filenames.len());

    Ok(Json(MessageResponse::new("Images deleted successfully")))
}
