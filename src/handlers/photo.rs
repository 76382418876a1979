use crate::error::AppError;
use crate::models::*;
use crate::services::PhotoService;
use actix_multipart::Multipart;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use futures_util::TryStreamExt;
use serde_json::json;

const FILES_FIELD: &str = "files[]";
const MAX_FILE_BYTES: usize = 25 * 1024 * 1024;

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

/// Collects every `files[]` part. Other fields are drained and ignored.
async fn read_files(mut payload: Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid multipart body: {e}")))?
    {
        let disposition = field.content_disposition();
        let is_file = matches!(disposition.get_name(), Some(FILES_FIELD) | Some("files"));
        let file_name = disposition.get_filename().unwrap_or_default().to_string();
        let content_type = field.content_type().map(|m| m.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::ValidationError(format!("Invalid multipart body: {e}")))?
        {
            if bytes.len() + chunk.len() > MAX_FILE_BYTES {
                return Err(AppError::ValidationError(format!(
                    "File {file_name} exceeds the {} MB limit",
                    MAX_FILE_BYTES / (1024 * 1024)
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        if is_file {
            files.push(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
        }
    }

    Ok(files)
}

#[utoipa::path(
    post,
    path = "/admin/evento/{event_id}/upload-fotos",
    tag = "photo",
    params(("event_id" = String, Path, description = "Event id")),
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "One or more `files[]` parts"),
    responses(
        (status = 201, description = "Photos uploaded", body = UploadPhotosResponse),
        (status = 400, description = "No files or a file over the size limit", body = ApiError),
        (status = 404, description = "Event not found", body = ApiError),
        (status = 500, description = "A file failed, nothing recorded", body = ApiError)
    )
)]
pub async fn upload_photos(
    photo_service: web::Data<PhotoService>,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();

    // Unknown events are rejected before the upload body is read
    if let Err(e) = photo_service.find_event(&event_id).await {
        return Ok(e.error_response());
    }

    let files = match read_files(payload).await {
        Ok(files) => files,
        Err(e) => return Ok(e.error_response()),
    };

    match photo_service.upload_photos(&event_id, files).await {
        Ok(urls) => Ok(HttpResponse::Created().json(UploadPhotosResponse {
            success: true,
            message: format!("{} photos uploaded successfully", urls.len()),
            urls,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/fotos/etiquetar",
    tag = "photo",
    request_body = TagPhotosRequest,
    responses(
        (status = 200, description = "Tags updated"),
        (status = 400, description = "Invalid action or empty id lists", body = ApiError),
        (status = 409, description = "Tag already exists", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    )
)]
pub async fn tag_photos(
    photo_service: web::Data<PhotoService>,
    request: web::Json<TagPhotosRequest>,
) -> Result<HttpResponse> {
    match photo_service.tag_photos(request.into_inner()).await {
        Ok(changed) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Tags updated successfully",
            "changed": changed
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/dashboard/evento/{event_id}",
    tag = "photo",
    params(("event_id" = String, Path, description = "Event id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Photos of the event showing the user's children", body = GalleryResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Unknown user", body = ApiError),
        (status = 404, description = "Event not found", body = ApiError)
    )
)]
pub async fn client_gallery(
    photo_service: web::Data<PhotoService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(user_id) = get_user_id_from_request(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };

    match photo_service
        .client_gallery(&path.into_inner(), user_id)
        .await
    {
        Ok(gallery) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": gallery
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn photo_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/admin/evento/{event_id}/upload-fotos",
        web::post().to(upload_photos),
    )
    .route("/api/fotos/etiquetar", web::post().to(tag_photos))
    .route("/dashboard/evento/{event_id}", web::get().to(client_gallery));
}
