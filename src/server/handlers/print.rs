//! Image upload and printing handler.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::super::filename::secure_filename;
use super::super::state::AppState;

pub const NO_IMAGE_PART: &str = "No image part in the request";
pub const NO_FILE_SELECTED: &str = "No file selected";
pub const PRINTED: &str = "Image printed successfully";

type JsonResponse = (StatusCode, Json<Value>);

fn error_response(status: StatusCode, message: impl Into<String>) -> JsonResponse {
    (status, Json(json!({ "error": message.into() })))
}

/// An `image` file part pulled out of the multipart body.
struct Upload {
    filename: String,
    contents: Vec<u8>,
}

/// Find the first file part named `image`.
///
/// A part named `image` without a filename is a plain form field, not a
/// file, and is skipped.
async fn read_image_part(multipart: &mut Multipart) -> Result<Option<Upload>, JsonResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_response(e.status(), e.body_text()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        if filename.is_empty() {
            return Err(error_response(StatusCode::BAD_REQUEST, NO_FILE_SELECTED));
        }

        let contents = field
            .bytes()
            .await
            .map_err(|e| error_response(e.status(), e.body_text()))?;

        return Ok(Some(Upload {
            filename,
            contents: contents.to_vec(),
        }));
    }

    Ok(None)
}

/// POST /print - save the uploaded `image` file and print it.
pub async fn print(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> JsonResponse {
    let Ok(mut multipart) = multipart else {
        return error_response(StatusCode::BAD_REQUEST, NO_IMAGE_PART);
    };

    let upload = match read_image_part(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return error_response(StatusCode::BAD_REQUEST, NO_IMAGE_PART),
        Err(response) => return response,
    };

    let filename = secure_filename(&upload.filename).unwrap_or_else(|| {
        let generated = format!("upload-{}", Uuid::new_v4());
        warn!(
            "filename {:?} has no usable characters, saving as {}",
            upload.filename, generated
        );
        generated
    });

    info!(filename = %filename, bytes = upload.contents.len(), "[print] received upload");

    let print_result = tokio::task::spawn_blocking(move || {
        state.save_and_print(&filename, &upload.contents)
    })
    .await;

    match print_result {
        Ok(Ok(path)) => {
            info!("[print] printed {}", path.display());
            (StatusCode::OK, Json(json!({ "message": PRINTED })))
        }
        Ok(Err(e)) => {
            error!("[print] failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => {
            error!("[print] task error: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Task error: {}", e),
            )
        }
    }
}
