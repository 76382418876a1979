use crate::entities::user_entity as users;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registration form submitted from the invite page
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Invite token
    pub contract_slug: Option<String>,
    #[schema(example = "123.456.789-09")]
    pub cpf: Option<String>,
    #[schema(example = "Ana Souza")]
    pub parent_name: Option<String>,
    #[schema(example = "(11) 98765-4321")]
    pub phone: Option<String>,
    #[schema(example = "ana@example.com")]
    pub parent_email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub children: Vec<ChildRequest>,
    pub selected_plan: Option<i64>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChildRequest {
    pub name: Option<String>,
    /// dd/mm/yyyy
    #[schema(example = "05/03/2016")]
    pub dob: Option<String>,
    pub shift: Option<String>,
    pub photo_preview: Option<String>,
    pub school: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub expires_in: i64,
}
