use crate::entities::contract_entity as contracts;
use crate::error::AppResult;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

/// Draws UUIDv4 tokens until one is not held by any contract.
pub async fn generate_unique_invite_token<C: ConnectionTrait>(db: &C) -> AppResult<String> {
    loop {
        let token = Uuid::new_v4().to_string();

        let exists = contracts::Entity::find()
            .filter(contracts::Column::InviteToken.eq(token.as_str()))
            .count(db)
            .await?;

        if exists == 0 {
            return Ok(token);
        }
    }
}
