use crate::entities::{
    class_entity as classes, contract_entity as contracts, contract_plan_entity as contract_plans,
    event_entity as events, photo_entity as photos, photo_student_entity as photo_students,
    student_entity as students, subscription_entity as subscriptions, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    Value,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct EventService {
    pool: DatabaseConnection,
}

impl EventService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_class(
        &self,
        event_id: &str,
        request: CreateClassRequest,
    ) -> AppResult<ClassResponse> {
        let event = events::Entity::find_by_id(event_id.to_string())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        let name = non_blank(&request.name)
            .ok_or_else(|| AppError::ValidationError("Class name is required".to_string()))?;

        let class = classes::ActiveModel {
            name: Set(name.to_string()),
            event_id: Set(event.id),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(class.into())
    }

    pub async fn assign_student(
        &self,
        class_id: i64,
        request: StudentClassRequest,
    ) -> AppResult<StudentResponse> {
        let student_id = request
            .student_id
            .ok_or_else(|| AppError::ValidationError("aluno_id is required".to_string()))?;

        let txn = self.pool.begin().await?;
        let (class, student) = find_class_and_student(&txn, class_id, student_id).await?;

        let mut active = student.into_active_model();
        active.class_id = Set(Some(class.id));
        let student = active.update(&txn).await?;

        txn.commit().await?;

        Ok(student.into())
    }

    pub async fn unassign_student(
        &self,
        class_id: i64,
        request: StudentClassRequest,
    ) -> AppResult<StudentResponse> {
        let student_id = request
            .student_id
            .ok_or_else(|| AppError::ValidationError("aluno_id is required".to_string()))?;

        let txn = self.pool.begin().await?;
        let (class, student) = find_class_and_student(&txn, class_id, student_id).await?;

        if student.class_id != Some(class.id) {
            return Err(AppError::ValidationError(
                "Student does not belong to this class".to_string(),
            ));
        }

        let mut active = student.into_active_model();
        active.class_id = Set(None);
        let student = active.update(&txn).await?;

        txn.commit().await?;

        Ok(student.into())
    }

    pub async fn delete_class(&self, class_id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let class = classes::Entity::find_by_id(class_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

        unassign_class_students(&txn, class.id).await?;
        class.delete(&txn).await?;

        txn.commit().await?;

        log::info!("Class {class_id} deleted");
        Ok(())
    }

    /// Removes the event with its classes and photos. Absent events are not an error.
    pub async fn delete_event(&self, event_id: &str) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let Some(event) = events::Entity::find_by_id(event_id.to_string())
            .one(&txn)
            .await?
        else {
            log::info!("Event {event_id} not found locally, nothing to delete");
            return Ok(());
        };

        // Classes: students are unassigned, never deleted
        let event_classes = event.find_related(classes::Entity).all(&txn).await?;
        for class in event_classes {
            unassign_class_students(&txn, class.id).await?;
            class.delete(&txn).await?;
        }

        // Photos: tags first
        let event_photos = event.find_related(photos::Entity).all(&txn).await?;
        let photo_count = event_photos.len();
        for photo in event_photos {
            photo_students::Entity::delete_many()
                .filter(photo_students::Column::PhotoId.eq(photo.id))
                .exec(&txn)
                .await?;
            photo.delete(&txn).await?;
        }

        event.delete(&txn).await?;
        txn.commit().await?;

        log::info!("Event {event_id} deleted with {photo_count} photos");
        Ok(())
    }

    pub async fn event_detail(&self, event_id: &str) -> AppResult<EventDetailResponse> {
        let event = events::Entity::find_by_id(event_id.to_string())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        let contract = event
            .find_related(contracts::Entity)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Contract not found".to_string()))?;

        let event_classes = event
            .find_related(classes::Entity)
            .order_by_asc(classes::Column::Name)
            .all(&self.pool)
            .await?;
        let event_photos = event
            .find_related(photos::Entity)
            .order_by_asc(photos::Column::Id)
            .all(&self.pool)
            .await?;

        // Students whose guardian subscribed to one of the contract's plans
        let plan_ids: Vec<i64> = contract_plans::Entity::find()
            .select_only()
            .column(contract_plans::Column::PlanId)
            .filter(contract_plans::Column::ContractId.eq(contract.id.as_str()))
            .into_tuple()
            .all(&self.pool)
            .await?;

        let user_ids: Vec<i64> = subscriptions::Entity::find()
            .select_only()
            .column(subscriptions::Column::UserId)
            .filter(subscriptions::Column::PlanId.is_in(plan_ids))
            .distinct()
            .into_tuple()
            .all(&self.pool)
            .await?;

        let contract_students = students::Entity::find()
            .filter(students::Column::UserId.is_in(user_ids))
            .order_by_asc(students::Column::Name)
            .all(&self.pool)
            .await?;

        Ok(EventDetailResponse {
            event: event.into(),
            contract: contract.into(),
            classes: event_classes.into_iter().map(ClassResponse::from).collect(),
            photos: event_photos.into_iter().map(PhotoResponse::from).collect(),
            students_for_contract: contract_students
                .into_iter()
                .map(StudentResponse::from)
                .collect(),
        })
    }

    pub async fn tagging_view(&self, event_id: &str) -> AppResult<TaggingViewResponse> {
        let event = events::Entity::find_by_id(event_id.to_string())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        let event_classes = event
            .find_related(classes::Entity)
            .order_by_asc(classes::Column::Name)
            .all(&self.pool)
            .await?;
        let class_names: HashMap<i64, String> = event_classes
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();

        // Students assigned to the event's classes, with the guardian's CPF
        let class_students = students::Entity::find()
            .filter(students::Column::ClassId.is_in(class_names.keys().copied().collect::<Vec<_>>()))
            .find_also_related(users::Entity)
            .order_by_asc(students::Column::Name)
            .all(&self.pool)
            .await?;

        let event_photos = event
            .find_related(photos::Entity)
            .order_by_asc(photos::Column::Id)
            .all(&self.pool)
            .await?;

        // Existing tags grouped by photo
        let tags = photo_students::Entity::find()
            .filter(
                photo_students::Column::PhotoId
                    .is_in(event_photos.iter().map(|p| p.id).collect::<Vec<_>>()),
            )
            .all(&self.pool)
            .await?;
        let mut tagged: HashMap<i64, Vec<i64>> = HashMap::new();
        for tag in tags {
            tagged.entry(tag.photo_id).or_default().push(tag.student_id);
        }

        let students = class_students
            .into_iter()
            .map(|(student, guardian)| TaggingStudent {
                id: student.id,
                class_name: student
                    .class_id
                    .and_then(|id| class_names.get(&id).cloned())
                    .unwrap_or_default(),
                name: student.name,
                guardian_cpf: guardian.map(|u| u.cpf),
            })
            .collect();

        let photos = event_photos
            .into_iter()
            .map(|photo| {
                let mut tagged_student_ids = tagged.remove(&photo.id).unwrap_or_default();
                tagged_student_ids.sort_unstable();
                TaggedPhoto {
                    id: photo.id,
                    url: photo.url,
                    tagged_student_ids,
                }
            })
            .collect();

        Ok(TaggingViewResponse {
            event: event.into(),
            classes: event_classes.into_iter().map(ClassResponse::from).collect(),
            students,
            photos,
        })
    }
}

async fn find_class_and_student<C: ConnectionTrait>(
    db: &C,
    class_id: i64,
    student_id: i64,
) -> AppResult<(classes::Model, students::Model)> {
    let class = classes::Entity::find_by_id(class_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;
    let student = students::Entity::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    Ok((class, student))
}

/// Clears the class reference of every student in the class.
async fn unassign_class_students<C: ConnectionTrait>(db: &C, class_id: i64) -> AppResult<u64> {
    let result = students::Entity::update_many()
        .col_expr(students::Column::ClassId, Expr::value(Value::BigInt(None)))
        .filter(students::Column::ClassId.eq(class_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
