use super::contract::ContractSummary;
use super::photo::PhotoResponse;
use crate::entities::{class_entity as classes, event_entity as events, student_entity as students};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Gallery record pushed by the gallery product
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SyncGalleryEventRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub contract_id: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateClassRequest {
    #[serde(rename = "nome")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct StudentClassRequest {
    #[serde(rename = "aluno_id")]
    pub student_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub id: String,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub contract_id: String,
}

impl From<events::Model> for EventResponse {
    fn from(event: events::Model) -> Self {
        Self {
            id: event.id,
            name: event.name,
            date: event.date,
            contract_id: event.contract_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

impl From<classes::Model> for ClassResponse {
    fn from(class: classes::Model) -> Self {
        Self {
            id: class.id,
            name: class.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub shift: Option<String>,
    pub reference_photo_url: Option<String>,
    pub school_course: Option<String>,
    pub class_id: Option<i64>,
}

impl From<students::Model> for StudentResponse {
    fn from(student: students::Model) -> Self {
        Self {
            id: student.id,
            name: student.name,
            birth_date: student.birth_date,
            shift: student.shift,
            reference_photo_url: student.reference_photo_url,
            school_course: student.school_course,
            class_id: student.class_id,
        }
    }
}

/// Admin event page data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventDetailResponse {
    pub event: EventResponse,
    pub contract: ContractSummary,
    pub classes: Vec<ClassResponse>,
    pub photos: Vec<PhotoResponse>,
    /// Students whose guardian subscribed to one of the contract's plans
    pub students_for_contract: Vec<StudentResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaggingStudent {
    pub id: i64,
    pub name: String,
    pub guardian_cpf: Option<String>,
    pub class_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaggedPhoto {
    pub id: i64,
    pub url: String,
    pub tagged_student_ids: Vec<i64>,
}

/// Admin tagging page data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaggingViewResponse {
    pub event: EventResponse,
    pub classes: Vec<ClassResponse>,
    pub students: Vec<TaggingStudent>,
    pub photos: Vec<TaggedPhoto>,
}
