use serde::{Deserialize, Serialize};

use medtag_core::Label;

// === Auth DTOs ===
//
// Request fields are Options: validation is a presence check performed in
// the handler, which answers 400 with the field list instead of a
// deserialization rejection.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub admin_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub email: String,
    pub is_admin: bool,
}

// === Image DTOs ===

#[derive(Debug, Serialize)]
pub struct ImagesResponse {
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteImagesRequest {
    pub filenames: Option<Vec<String>>,
}

// === Label DTOs ===

#[derive(Debug, Serialize)]
pub struct LabelDto {
    /// Identifier serialized to its displayable string form.
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
}

impl From<Label> for LabelDto {
    fn from(label: Label) -> Self {
        Self {
            id: label.id.to_string(),
            text: label.text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LabelsResponse {
    pub labels: Vec<LabelDto>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLabelRequest {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteLabelsRequest {
    pub ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociateLabelRequest {
    pub user_email: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

// === Shared ===

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
