use crate::entities::{contract_entity as contracts, event_entity as events};
use crate::error::{AppError, AppResult};
use crate::external::ContractDirectory;
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, Set,
    TransactionTrait,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct SyncService {
    pool: DatabaseConnection,
    directory: Arc<dyn ContractDirectory>,
}

impl SyncService {
    pub fn new(pool: DatabaseConnection, directory: Arc<dyn ContractDirectory>) -> Self {
        Self { pool, directory }
    }

    /// Mirrors a gallery record as a local event, creating its contract locally if needed.
    /// Returns the event id.
    pub async fn sync_gallery_event(&self, request: SyncGalleryEventRequest) -> AppResult<String> {
        let (Some(event_id), Some(name), Some(contract_id)) = (
            non_blank(&request.id),
            non_blank(&request.name),
            non_blank(&request.contract_id),
        ) else {
            return Err(AppError::ValidationError(
                "id, name and contract_id are required".to_string(),
            ));
        };

        // Contract known only to the gallery store is fetched before the transaction
        let local_contract = contracts::Entity::find_by_id(contract_id.to_string())
            .one(&self.pool)
            .await?;

        let remote_contract = match local_contract {
            Some(_) => None,
            None => {
                let remote = match self.directory.fetch_contract(contract_id).await {
                    Ok(remote) => remote,
                    Err(e) => {
                        log::warn!("Fetching contract {contract_id} from the gallery store failed: {e}");
                        None
                    }
                };
                Some(remote.ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Contract {contract_id} not found in the gallery store"
                    ))
                })?)
            }
        };

        self.upsert(event_id, name, contract_id, remote_contract)
            .await
            .map_err(|e| {
                log::error!("Sync of event {event_id} failed: {e}");
                AppError::SyncError(e.to_string())
            })?;

        log::info!("Event {event_id} synced under contract {contract_id}");
        Ok(event_id.to_string())
    }

    async fn upsert(
        &self,
        event_id: &str,
        name: &str,
        contract_id: &str,
        remote_contract: Option<crate::external::RemoteContract>,
    ) -> Result<(), DbErr> {
        let txn = self.pool.begin().await?;

        if let Some(remote) = remote_contract {
            contracts::ActiveModel {
                id: Set(contract_id.to_string()),
                name: Set(remote.name),
                description: Set(remote.description),
                invite_token: Set(remote.invite_link_id),
            }
            .insert(&txn)
            .await?;
            log::info!("Contract {contract_id} mirrored from the gallery store");
        }

        let today = Utc::now().date_naive();

        match events::Entity::find_by_id(event_id.to_string())
            .one(&txn)
            .await?
        {
            Some(event) => {
                let date = event.date.unwrap_or(today);
                let mut active = event.into_active_model();
                active.name = Set(name.to_string());
                active.contract_id = Set(contract_id.to_string());
                active.date = Set(Some(date));
                active.update(&txn).await?;
            }
            None => {
                events::ActiveModel {
                    id: Set(event_id.to_string()),
                    name: Set(name.to_string()),
                    date: Set(Some(today)),
                    contract_id: Set(contract_id.to_string()),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await
    }
}
