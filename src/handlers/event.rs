use crate::models::*;
use crate::services::{EventService, SyncService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/api/sync-gallery-event",
    tag = "event",
    request_body = SyncGalleryEventRequest,
    responses(
        (status = 200, description = "Event created or updated"),
        (status = 400, description = "Missing id, name or contract_id", body = ApiError),
        (status = 404, description = "Contract unknown locally and remotely", body = ApiError),
        (status = 500, description = "Internal server error during sync", body = ApiError)
    )
)]
pub async fn sync_gallery_event(
    sync_service: web::Data<SyncService>,
    request: web::Json<SyncGalleryEventRequest>,
) -> Result<HttpResponse> {
    match sync_service.sync_gallery_event(request.into_inner()).await {
        Ok(event_id) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Event synced successfully",
            "evento_id": event_id
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/delete-event/{event_id}",
    tag = "event",
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted or already absent"),
        (status = 500, description = "Internal server error", body = ApiError)
    )
)]
pub async fn delete_event(
    event_service: web::Data<EventService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match event_service.delete_event(&path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new(
            "Event and related data deleted successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/evento/{event_id}",
    tag = "event",
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event detail view", body = EventDetailResponse),
        (status = 404, description = "Event not found", body = ApiError)
    )
)]
pub async fn event_detail(
    event_service: web::Data<EventService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match event_service.event_detail(&path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": detail
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/evento/{event_id}/add-turma",
    tag = "event",
    params(("event_id" = String, Path, description = "Event id")),
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Class created", body = ClassResponse),
        (status = 400, description = "Missing class name", body = ApiError),
        (status = 404, description = "Event not found", body = ApiError)
    )
)]
pub async fn add_class(
    event_service: web::Data<EventService>,
    path: web::Path<String>,
    request: web::Json<CreateClassRequest>,
) -> Result<HttpResponse> {
    match event_service
        .create_class(&path.into_inner(), request.into_inner())
        .await
    {
        Ok(class) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "message": "Class created successfully",
            "turma": class
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/turma/{class_id}/add-aluno",
    tag = "event",
    params(("class_id" = i64, Path, description = "Class id")),
    request_body = StudentClassRequest,
    responses(
        (status = 200, description = "Student assigned to the class"),
        (status = 400, description = "Missing aluno_id", body = ApiError),
        (status = 404, description = "Class or student not found", body = ApiError)
    )
)]
pub async fn add_student(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
    request: web::Json<StudentClassRequest>,
) -> Result<HttpResponse> {
    match event_service
        .assign_student(path.into_inner(), request.into_inner())
        .await
    {
        Ok(student) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": format!("Student {} added to the class", student.name)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/turma/{class_id}/remove-aluno",
    tag = "event",
    params(("class_id" = i64, Path, description = "Class id")),
    request_body = StudentClassRequest,
    responses(
        (status = 200, description = "Student removed from the class"),
        (status = 400, description = "Missing aluno_id or student not in the class", body = ApiError),
        (status = 404, description = "Class or student not found", body = ApiError)
    )
)]
pub async fn remove_student(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
    request: web::Json<StudentClassRequest>,
) -> Result<HttpResponse> {
    match event_service
        .unassign_student(path.into_inner(), request.into_inner())
        .await
    {
        Ok(student) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": format!("Student {} removed from the class", student.name)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/turma/{class_id}/delete",
    tag = "event",
    params(("class_id" = i64, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class deleted, its students unassigned"),
        (status = 404, description = "Class not found", body = ApiError)
    )
)]
pub async fn delete_class(
    event_service: web::Data<EventService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match event_service.delete_class(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("Class deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/evento/{event_id}/etiquetar",
    tag = "event",
    params(("event_id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Tagging view", body = TaggingViewResponse),
        (status = 404, description = "Event not found", body = ApiError)
    )
)]
pub async fn tagging_view(
    event_service: web::Data<EventService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match event_service.tagging_view(&path.into_inner()).await {
        Ok(view) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": view
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn event_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/sync-gallery-event", web::post().to(sync_gallery_event))
        .route("/api/delete-event/{event_id}", web::post().to(delete_event))
        .route("/admin/evento/{event_id}", web::get().to(event_detail))
        .route("/admin/evento/{event_id}/add-turma", web::post().to(add_class))
        .route("/admin/evento/{event_id}/etiquetar", web::get().to(tagging_view))
        .route("/admin/turma/{class_id}/add-aluno", web::post().to(add_student))
        .route("/admin/turma/{class_id}/remove-aluno", web::post().to(remove_student))
        .route("/admin/turma/{class_id}/delete", web::post().to(delete_class));
}
