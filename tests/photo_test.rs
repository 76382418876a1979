mod common;

use actix_web::{App, ResponseError, http::StatusCode, test, web};
use common::*;
use memoryschool_backend::entities::{
    photo_entity as photos, photo_student_entity as photo_students,
};
use memoryschool_backend::error::AppError;
use memoryschool_backend::handlers;
use memoryschool_backend::middlewares::AuthMiddleware;
use memoryschool_backend::models::{TagPhotosRequest, UploadedFile};
use memoryschool_backend::services::PhotoService;
use memoryschool_backend::utils::JwtService;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;

fn file(name: &str, content_type: Option<&str>) -> UploadedFile {
    UploadedFile {
        file_name: name.to_string(),
        content_type: content_type.map(str::to_string),
        bytes: b"fake image".to_vec(),
    }
}

fn tag(photo_ids: Vec<i64>, student_ids: Vec<i64>, action: &str) -> TagPhotosRequest {
    TagPhotosRequest {
        photo_ids,
        student_ids,
        action: Some(action.to_string()),
    }
}

async fn seeded_event(db: &DatabaseConnection) {
    seed_contract(db, "c-1", None, &[]).await;
    seed_event(db, "ev-1", "c-1").await;
}

async fn photo_ids(db: &DatabaseConnection) -> Vec<i64> {
    photos::Entity::find()
        .all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect()
}

#[tokio::test]
async fn upload_stores_objects_and_records_photos() {
    let db = setup_db().await;
    seeded_event(&db).await;
    let storage = Arc::new(InMemoryStorage::default());
    let service = PhotoService::new(db.clone(), storage.clone());

    let urls = service
        .upload_photos(
            "ev-1",
            vec![
                file("IMG_0001.JPG", Some("image/jpeg")),
                file("", None),
                file("raw.png", None),
            ],
        )
        .await
        .unwrap();

    assert_eq!(urls.len(), 2);
    let keys = storage.keys();
    assert_eq!(keys.len(), 2);
    assert!(keys[0].starts_with("ev-1/") && keys[0].ends_with(".jpg"));
    assert!(keys[1].ends_with(".png"));
    let objects = storage.objects.lock().unwrap().clone();
    assert_eq!(objects[1].1, "application/octet-stream");

    let stored = photos::Entity::find().all(&db).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|p| p.event_id == "ev-1"));
    assert!(urls.contains(&stored[0].url));
}

#[tokio::test]
async fn failing_second_file_leaves_no_photo_rows() {
    let db = setup_db().await;
    seeded_event(&db).await;
    let service = PhotoService::new(db.clone(), Arc::new(InMemoryStorage::failing_on(2)));

    let result = service
        .upload_photos(
            "ev-1",
            vec![
                file("a.jpg", None),
                file("b.jpg", None),
                file("c.jpg", None),
            ],
        )
        .await;

    match result {
        Err(AppError::UploadError(msg)) => assert!(msg.contains("b.jpg")),
        other => panic!("expected upload error, got {other:?}"),
    }
    assert_eq!(count::<photos::Entity>(&db).await, 0);
}

#[tokio::test]
async fn file_without_extension_fails_the_batch() {
    let db = setup_db().await;
    seeded_event(&db).await;
    let service = PhotoService::new(db.clone(), Arc::new(InMemoryStorage::default()));

    let result = service
        .upload_photos("ev-1", vec![file("ok.jpg", None), file("README", None)])
        .await;

    assert!(matches!(result, Err(AppError::UploadError(_))));
    assert_eq!(count::<photos::Entity>(&db).await, 0);
}

#[tokio::test]
async fn upload_requires_event_and_files() {
    let db = setup_db().await;
    seeded_event(&db).await;
    let service = PhotoService::new(db.clone(), Arc::new(InMemoryStorage::default()));

    assert!(matches!(
        service.upload_photos("ev-404", vec![file("a.jpg", None)]).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.upload_photos("ev-1", vec![]).await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        service.upload_photos("ev-1", vec![file("", None)]).await,
        Err(AppError::ValidationError(_))
    ));
}

#[tokio::test]
async fn tagging_add_is_idempotent_and_remove_tolerates_missing_pairs() {
    let db = setup_db().await;
    seeded_event(&db).await;
    let user = seed_user(&db, "m@example.com", "111").await;
    let leo = seed_student(&db, user.id, "Leo", None).await;
    let bia = seed_student(&db, user.id, "Bia", None).await;
    let service = PhotoService::new(db.clone(), Arc::new(InMemoryStorage::default()));
    service
        .upload_photos("ev-1", vec![file("a.jpg", None)])
        .await
        .unwrap();
    let ids = photo_ids(&db).await;

    assert_eq!(service.tag_photos(tag(ids.clone(), vec![leo.id], "add")).await.unwrap(), 1);
    assert_eq!(service.tag_photos(tag(ids.clone(), vec![leo.id], "add")).await.unwrap(), 0);
    assert_eq!(count::<photo_students::Entity>(&db).await, 1);

    assert_eq!(service.tag_photos(tag(ids.clone(), vec![bia.id], "remove")).await.unwrap(), 0);
    assert_eq!(count::<photo_students::Entity>(&db).await, 1);

    // unknown ids are ignored
    assert_eq!(
        service
            .tag_photos(tag(vec![ids[0], 9999], vec![leo.id, 8888], "remove"))
            .await
            .unwrap(),
        1
    );
    assert_eq!(count::<photo_students::Entity>(&db).await, 0);
}

#[tokio::test]
async fn tagging_validates_action_and_ids() {
    let db = setup_db().await;
    let service = PhotoService::new(db.clone(), Arc::new(InMemoryStorage::default()));

    assert!(matches!(
        service.tag_photos(tag(vec![1], vec![1], "toggle")).await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        service.tag_photos(tag(vec![], vec![1], "add")).await,
        Err(AppError::ValidationError(_))
    ));
    assert!(matches!(
        service
            .tag_photos(TagPhotosRequest {
                photo_ids: vec![1],
                student_ids: vec![1],
                action: None,
            })
            .await,
        Err(AppError::ValidationError(_))
    ));
}

#[tokio::test]
async fn client_gallery_returns_distinct_photos_of_own_children() {
    let db = setup_db().await;
    seeded_event(&db).await;
    seed_event(&db, "ev-2", "c-1").await;
    let parent = seed_user(&db, "p@example.com", "111").await;
    let other = seed_user(&db, "o@example.com", "222").await;
    let leo = seed_student(&db, parent.id, "Leo", None).await;
    let bia = seed_student(&db, parent.id, "Bia", None).await;
    let stranger = seed_student(&db, other.id, "Outro", None).await;

    let service = PhotoService::new(db.clone(), Arc::new(InMemoryStorage::default()));
    service
        .upload_photos(
            "ev-1",
            vec![file("both.jpg", None), file("stranger.jpg", None), file("untagged.jpg", None)],
        )
        .await
        .unwrap();
    service
        .upload_photos("ev-2", vec![file("elsewhere.jpg", None)])
        .await
        .unwrap();
    let ids = photo_ids(&db).await;
    let (both, only_stranger, elsewhere) = (ids[0], ids[1], ids[3]);

    service
        .tag_photos(tag(vec![both], vec![leo.id, bia.id, stranger.id], "add"))
        .await
        .unwrap();
    service
        .tag_photos(tag(vec![only_stranger], vec![stranger.id], "add"))
        .await
        .unwrap();
    service
        .tag_photos(tag(vec![elsewhere], vec![leo.id], "add"))
        .await
        .unwrap();

    let gallery = service.client_gallery("ev-1", parent.id).await.unwrap();
    let gallery_ids: Vec<i64> = gallery.photos.iter().map(|p| p.id).collect();
    assert_eq!(gallery_ids, vec![both]);
    assert_eq!(gallery.students.len(), 2);

    assert!(matches!(
        service.client_gallery("ev-1", 424242).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        service.client_gallery("ev-404", parent.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[actix_web::test]
async fn dashboard_route_requires_a_valid_token() {
    let db = setup_db().await;
    seeded_event(&db).await;
    let parent = seed_user(&db, "p@example.com", "111").await;
    let jwt = JwtService::new("test-secret", 3600);
    let app = test::init_service(
        App::new()
            .wrap(AuthMiddleware::new(jwt.clone()))
            .app_data(web::Data::new(PhotoService::new(
                db.clone(),
                Arc::new(InMemoryStorage::default()),
            )))
            .configure(handlers::photo_config),
    )
    .await;

    let req = test::TestRequest::get().uri("/dashboard/evento/ev-1").to_request();
    let resp = test::try_call_service(&app, req).await;
    let status = match resp {
        Ok(resp) => resp.status(),
        Err(e) => e.error_response().status(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = jwt.generate_access_token(parent.id, &parent.email).unwrap();
    let req = test::TestRequest::get()
        .uri("/dashboard/evento/ev-1")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["event"]["id"], "ev-1");

    let ghost = jwt.generate_access_token(9999, "ghost@example.com").unwrap();
    let req = test::TestRequest::get()
        .uri("/dashboard/evento/ev-1")
        .insert_header(("Authorization", format!("Bearer {ghost}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn upload_route_reads_multipart_files() {
    let db = setup_db().await;
    seeded_event(&db).await;
    let storage = Arc::new(InMemoryStorage::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(PhotoService::new(db.clone(), storage.clone())))
            .configure(handlers::photo_config),
    )
    .await;

    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"files[]\"; filename=\"one.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         first\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"files[]\"; filename=\"two.PNG\"\r\n\
         Content-Type: image/png\r\n\r\n\
         second\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let req = test::TestRequest::post()
        .uri("/admin/evento/ev-1/upload-fotos")
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["message"], "2 photos uploaded successfully");
    assert_eq!(json["urls"].as_array().unwrap().len(), 2);

    let objects = storage.objects.lock().unwrap().clone();
    assert_eq!(objects[0].1, "image/jpeg");
    assert_eq!(objects[0].2, "first".len());
    assert!(objects[1].0.ends_with(".png"));
}

#[tokio::test]
async fn duplicate_tag_pair_maps_to_conflict() {
    let db = setup_db().await;
    seeded_event(&db).await;
    let user = seed_user(&db, "m@example.com", "111").await;
    let leo = seed_student(&db, user.id, "Leo", None).await;
    let service = PhotoService::new(db.clone(), Arc::new(InMemoryStorage::default()));
    service
        .upload_photos("ev-1", vec![file("a.jpg", None)])
        .await
        .unwrap();
    let photo_id = photo_ids(&db).await[0];

    let pair = || photo_students::ActiveModel {
        photo_id: Set(photo_id),
        student_id: Set(leo.id),
    };
    photo_students::Entity::insert(pair())
        .exec_without_returning(&db)
        .await
        .unwrap();
    let err = photo_students::Entity::insert(pair())
        .exec_without_returning(&db)
        .await
        .unwrap_err();

    let mapped = AppError::from_db_conflict(err, "Photo is already tagged");
    assert!(matches!(mapped, AppError::Conflict(_)));
    assert_eq!(mapped.error_response().status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn tag_route_with_wrongly_typed_ids_returns_json_error() {
    let db = setup_db().await;
    let app = test::init_service(
        App::new()
            .app_data(handlers::json_config())
            .app_data(web::Data::new(PhotoService::new(
                db.clone(),
                Arc::new(InMemoryStorage::default()),
            )))
            .configure(handlers::photo_config),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/fotos/etiquetar")
        .set_json(serde_json::json!({"foto_ids": ["1"], "aluno_ids": [2], "action": "add"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn upload_route_rejects_unknown_event_before_storing() {
    let db = setup_db().await;
    let storage = Arc::new(InMemoryStorage::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(PhotoService::new(db.clone(), storage.clone())))
            .configure(handlers::photo_config),
    )
    .await;

    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"files[]\"; filename=\"one.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         first\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let req = test::TestRequest::post()
        .uri("/admin/evento/ev-404/upload-fotos")
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert!(storage.keys().is_empty());
}
