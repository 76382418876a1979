mod common;

use chrono::{NaiveDate, Utc};
use common::*;
use memoryschool_backend::entities::{contract_entity as contracts, event_entity as events};
use memoryschool_backend::error::AppError;
use memoryschool_backend::external::RemoteContract;
use memoryschool_backend::models::SyncGalleryEventRequest;
use memoryschool_backend::services::{ContractService, SyncService};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use std::sync::Arc;

fn sync_request(id: &str, name: &str, contract_id: &str) -> SyncGalleryEventRequest {
    SyncGalleryEventRequest {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        contract_id: Some(contract_id.to_string()),
    }
}

fn remote(id: &str) -> RemoteContract {
    RemoteContract {
        id: id.to_string(),
        name: "Escola Remota".to_string(),
        description: Some("Formatura 2025".to_string()),
        invite_link_id: Some("remote-invite".to_string()),
    }
}

#[tokio::test]
async fn sync_mirrors_remote_contract_and_creates_event() {
    let db = setup_db().await;
    let service = SyncService::new(db.clone(), Arc::new(StaticDirectory::with(remote("c-remote"))));

    let event_id = service
        .sync_gallery_event(sync_request("ev-1", "Formatura", "c-remote"))
        .await
        .unwrap();
    assert_eq!(event_id, "ev-1");

    let contract = contracts::Entity::find_by_id("c-remote".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(contract.name, "Escola Remota");
    assert_eq!(contract.invite_token.as_deref(), Some("remote-invite"));

    let event = events::Entity::find_by_id("ev-1".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.name, "Formatura");
    assert_eq!(event.contract_id, "c-remote");
    assert_eq!(event.date, Some(Utc::now().date_naive()));

    // mirrored token resolves like a local one
    let contract_service = ContractService::new(db.clone(), app_config());
    assert_eq!(
        contract_service.resolve_invite("remote-invite").await.unwrap().id,
        "c-remote"
    );
}

#[tokio::test]
async fn resync_updates_name_and_keeps_date() {
    let db = setup_db().await;
    seed_contract(&db, "c-1", None, &[]).await;
    let original = seed_event(&db, "ev-1", "c-1").await;
    let service = SyncService::new(db.clone(), Arc::new(StaticDirectory::default()));

    service
        .sync_gallery_event(sync_request("ev-1", "Festa Junina", "c-1"))
        .await
        .unwrap();

    let event = events::Entity::find_by_id("ev-1".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.name, "Festa Junina");
    assert_eq!(event.date, original.date);
    assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 6, 1));
}

#[tokio::test]
async fn resync_fills_missing_date_with_today() {
    let db = setup_db().await;
    seed_contract(&db, "c-1", None, &[]).await;
    let event = seed_event(&db, "ev-1", "c-1").await;
    let mut active = event.into_active_model();
    active.date = Set(None);
    active.update(&db).await.unwrap();
    let service = SyncService::new(db.clone(), Arc::new(StaticDirectory::default()));

    service
        .sync_gallery_event(sync_request("ev-1", "Evento", "c-1"))
        .await
        .unwrap();

    let event = events::Entity::find_by_id("ev-1".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.date, Some(Utc::now().date_naive()));
}

#[tokio::test]
async fn unknown_contract_everywhere_is_not_found() {
    let db = setup_db().await;
    let service = SyncService::new(db.clone(), Arc::new(StaticDirectory::default()));

    let result = service
        .sync_gallery_event(sync_request("ev-1", "Evento", "c-ghost"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(count::<events::Entity>(&db).await, 0);
}

#[tokio::test]
async fn failing_directory_is_not_found() {
    let db = setup_db().await;
    let directory = StaticDirectory {
        failing: true,
        ..Default::default()
    };
    let service = SyncService::new(db.clone(), Arc::new(directory));

    let result = service
        .sync_gallery_event(sync_request("ev-1", "Evento", "c-1"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(count::<contracts::Entity>(&db).await, 0);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let db = setup_db().await;
    let service = SyncService::new(db.clone(), Arc::new(StaticDirectory::default()));

    let result = service
        .sync_gallery_event(SyncGalleryEventRequest {
            id: Some("ev-1".to_string()),
            name: None,
            contract_id: Some("c-1".to_string()),
        })
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}
