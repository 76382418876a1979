use super::event::{EventResponse, StudentResponse};
use crate::entities::photo_entity as photos;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoResponse {
    pub id: i64,
    pub url: String,
    pub event_id: String,
}

impl From<photos::Model> for PhotoResponse {
    fn from(photo: photos::Model) -> Self {
        Self {
            id: photo.id,
            url: photo.url,
            event_id: photo.event_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TagAction {
    Add,
    Remove,
}

impl TagAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "add" => Some(TagAction::Add),
            "remove" => Some(TagAction::Remove),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct TagPhotosRequest {
    #[serde(default, rename = "foto_ids")]
    pub photo_ids: Vec<i64>,
    #[serde(default, rename = "aluno_ids")]
    pub student_ids: Vec<i64>,
    /// "add" or "remove"
    pub action: Option<String>,
}

/// One file taken from the multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadPhotosResponse {
    pub success: bool,
    pub message: String,
    pub urls: Vec<String>,
}

/// Parent gallery page data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GalleryResponse {
    pub event: EventResponse,
    pub photos: Vec<PhotoResponse>,
    pub students: Vec<StudentResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_action_parse() {
        assert_eq!(TagAction::parse("add"), Some(TagAction::Add));
        assert_eq!(TagAction::parse("remove"), Some(TagAction::Remove));
        assert_eq!(TagAction::parse("ADD"), None);
        assert_eq!(TagAction::parse("toggle"), None);
    }

    #[test]
    fn test_tag_request_field_names() {
        let request: TagPhotosRequest =
            serde_json::from_str(r#"{"foto_ids":[1,2],"aluno_ids":[3],"action":"add"}"#).unwrap();

        assert_eq!(request.photo_ids, vec![1, 2]);
        assert_eq!(request.student_ids, vec![3]);
    }
}
