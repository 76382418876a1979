use crate::entities::{
    event_entity as events, photo_entity as photos, photo_student_entity as photo_students,
    student_entity as students, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::external::ObjectStorage;
use crate::models::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, JoinType,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone)]
pub struct PhotoService {
    pool: DatabaseConnection,
    storage: Arc<dyn ObjectStorage>,
}

impl PhotoService {
    pub fn new(pool: DatabaseConnection, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { pool, storage }
    }

    pub async fn find_event(&self, event_id: &str) -> AppResult<events::Model> {
        events::Entity::find_by_id(event_id.to_string())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    /// Pushes every file to the object store and records one photo per file.
    /// The first failing file aborts the batch and no photo rows are kept.
    pub async fn upload_photos(
        &self,
        event_id: &str,
        files: Vec<UploadedFile>,
    ) -> AppResult<Vec<String>> {
        let event = self.find_event(event_id).await?;

        // Parts without a file name are skipped
        let files: Vec<UploadedFile> = files
            .into_iter()
            .filter(|f| !f.file_name.is_empty())
            .collect();
        if files.is_empty() {
            return Err(AppError::ValidationError(
                "No files were uploaded".to_string(),
            ));
        }

        // Sequential, the first failure rolls back every row of the batch
        let txn = self.pool.begin().await?;
        let mut urls = Vec::with_capacity(files.len());

        for file in &files {
            match self.store_photo(&txn, &event.id, file).await {
                Ok(url) => urls.push(url),
                Err(e) => {
                    log::error!(
                        "Upload batch for event {} aborted at {}: {e}",
                        event.id,
                        file.file_name
                    );
                    txn.rollback().await?;
                    return Err(AppError::UploadError(format!(
                        "Failed to process file {}: {e}",
                        file.file_name
                    )));
                }
            }
        }

        txn.commit().await?;

        log::info!("{} photos uploaded for event {}", urls.len(), event.id);
        Ok(urls)
    }

    async fn store_photo(
        &self,
        txn: &DatabaseTransaction,
        event_id: &str,
        file: &UploadedFile,
    ) -> AppResult<String> {
        let extension = file_extension(&file.file_name).ok_or_else(|| {
            AppError::ValidationError("file name has no extension".to_string())
        })?;
        let key = format!("{event_id}/{}.{extension}", Uuid::new_v4());
        let content_type = file
            .content_type
            .as_deref()
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        self.storage
            .upload(&key, file.bytes.clone(), content_type)
            .await?;
        let url = self.storage.public_url(&key).await?;

        photos::ActiveModel {
            url: Set(url.clone()),
            event_id: Set(event_id.to_string()),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        Ok(url)
    }

    /// Adds or removes the tag for every matched (photo, student) pair.
    /// Unknown ids are ignored.
    pub async fn tag_photos(&self, request: TagPhotosRequest) -> AppResult<u64> {
        let action = request
            .action
            .as_deref()
            .and_then(TagAction::parse)
            .ok_or_else(|| {
                AppError::ValidationError("action must be 'add' or 'remove'".to_string())
            })?;
        if request.photo_ids.is_empty() || request.student_ids.is_empty() {
            return Err(AppError::ValidationError(
                "foto_ids and aluno_ids must not be empty".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        // Unknown ids drop out here
        let photo_ids: Vec<i64> = photos::Entity::find()
            .select_only()
            .column(photos::Column::Id)
            .filter(photos::Column::Id.is_in(request.photo_ids))
            .into_tuple()
            .all(&txn)
            .await?;
        let student_ids: Vec<i64> = students::Entity::find()
            .select_only()
            .column(students::Column::Id)
            .filter(students::Column::Id.is_in(request.student_ids))
            .into_tuple()
            .all(&txn)
            .await?;

        let mut changed = 0;
        for &photo_id in &photo_ids {
            for &student_id in &student_ids {
                let existing = photo_students::Entity::find_by_id((photo_id, student_id))
                    .count(&txn)
                    .await?;

                match action {
                    TagAction::Add if existing == 0 => {
                        photo_students::Entity::insert(photo_students::ActiveModel {
                            photo_id: Set(photo_id),
                            student_id: Set(student_id),
                        })
                        .exec_without_returning(&txn)
                        .await
                        .map_err(|e| AppError::from_db_conflict(e, "Photo is already tagged"))?;
                        changed += 1;
                    }
                    TagAction::Remove if existing > 0 => {
                        photo_students::Entity::delete_by_id((photo_id, student_id))
                            .exec(&txn)
                            .await?;
                        changed += 1;
                    }
                    _ => {}
                }
            }
        }

        txn.commit().await?;

        log::info!(
            "Tagging {action:?}: {} photos x {} students, {changed} rows changed",
            photo_ids.len(),
            student_ids.len()
        );
        Ok(changed)
    }

    /// Photos of the event tagged with at least one of the user's students.
    pub async fn client_gallery(&self, event_id: &str, user_id: i64) -> AppResult<GalleryResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or(AppError::Forbidden)?;

        let event = self.find_event(event_id).await?;

        let children = user
            .find_related(students::Entity)
            .order_by_asc(students::Column::Name)
            .all(&self.pool)
            .await?;
        let child_ids: Vec<i64> = children.iter().map(|s| s.id).collect();

        // A photo showing two of the children appears once
        let gallery = photos::Entity::find()
            .join(JoinType::InnerJoin, photos::Relation::PhotoStudents.def())
            .filter(photos::Column::EventId.eq(event.id.as_str()))
            .filter(photo_students::Column::StudentId.is_in(child_ids))
            .distinct()
            .order_by_asc(photos::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(GalleryResponse {
            event: event.into(),
            photos: gallery.into_iter().map(PhotoResponse::from).collect(),
            students: children.into_iter().map(StudentResponse::from).collect(),
        })
    }
}

/// Lower-cased text after the last `.` of a file name.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (_, extension) = file_name.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension.to_lowercase())
}
