use crate::config::AppConfig;
use crate::entities::{
    contract_entity as contracts, contract_plan_entity as contract_plans,
    contract_product_entity as contract_products, plan_entity as plans, product_entity as products,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::generate_unique_invite_token;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct ContractService {
    pool: DatabaseConnection,
    app: AppConfig,
}

impl ContractService {
    pub fn new(pool: DatabaseConnection, app: AppConfig) -> Self {
        Self { pool, app }
    }

    /// Rotates the contract's invite token. The previous token stops resolving.
    pub async fn generate_invite(&self, contract_id: &str) -> AppResult<InviteResponse> {
        let txn = self.pool.begin().await?;

        let contract = contracts::Entity::find_by_id(contract_id.to_string())
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Contract not found".to_string()))?;

        let token = generate_unique_invite_token(&txn).await?;

        let mut active = contract.into_active_model();
        active.invite_token = Set(Some(token.clone()));
        active.update(&txn).await?;

        txn.commit().await?;

        log::info!("Invite token rotated for contract {contract_id}");

        Ok(InviteResponse {
            message: "Invite link generated successfully".to_string(),
            invite_link: self.app.invite_link(&token),
        })
    }

    pub async fn resolve_invite(&self, token: &str) -> AppResult<contracts::Model> {
        contracts::Entity::find()
            .filter(contracts::Column::InviteToken.eq(token))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid or expired invite link".to_string()))
    }

    /// Registration page link for a resolved token.
    pub async fn registration_link(&self, token: &str) -> AppResult<String> {
        let contract = self.resolve_invite(token).await?;
        let token = contract.invite_token.unwrap_or_default();
        Ok(self.app.invite_link(&token))
    }

    pub async fn contract_details(&self, token: &str) -> AppResult<ContractDetailsResponse> {
        let contract = self.resolve_invite(token).await?;

        let plans = contract.find_related(plans::Entity).all(&self.pool).await?;
        let products = contract
            .find_related(products::Entity)
            .all(&self.pool)
            .await?;

        Ok(ContractDetailsResponse {
            id: contract.id,
            name: contract.name,
            plans: plans.into_iter().map(PlanResponse::from).collect(),
            products: products.into_iter().map(ProductResponse::from).collect(),
        })
    }

    pub async fn create_plan(&self, request: CreateCatalogItemRequest) -> AppResult<PlanResponse> {
        let (name, price_cents) = validate_catalog_item(&request)?;

        let plan = plans::ActiveModel {
            name: Set(name),
            description: Set(request.description),
            price_cents: Set(price_cents),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(plan.into())
    }

    pub async fn create_product(
        &self,
        request: CreateCatalogItemRequest,
    ) -> AppResult<ProductResponse> {
        let (name, price_cents) = validate_catalog_item(&request)?;

        let product = products::ActiveModel {
            name: Set(name),
            description: Set(request.description),
            price_cents: Set(price_cents),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(product.into())
    }

    pub async fn create_contract(
        &self,
        request: CreateContractRequest,
    ) -> AppResult<ContractResponse> {
        let name = non_blank(&request.name)
            .ok_or_else(|| AppError::ValidationError("Contract name is required".to_string()))?
            .to_string();
        let id = match non_blank(&request.id) {
            Some(id) if id.len() > 36 => {
                return Err(AppError::ValidationError(
                    "Contract id must be at most 36 characters".to_string(),
                ));
            }
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        let txn = self.pool.begin().await?;

        let plans = plans::Entity::find()
            .filter(plans::Column::Id.is_in(request.plan_ids.clone()))
            .all(&txn)
            .await?;
        if plans.len() != dedup_len(&request.plan_ids) {
            return Err(AppError::ValidationError("Unknown plan id".to_string()));
        }

        let products = products::Entity::find()
            .filter(products::Column::Id.is_in(request.product_ids.clone()))
            .all(&txn)
            .await?;
        if products.len() != dedup_len(&request.product_ids) {
            return Err(AppError::ValidationError("Unknown product id".to_string()));
        }

        let exists = contracts::Entity::find_by_id(id.clone()).count(&txn).await?;
        if exists > 0 {
            return Err(AppError::Conflict("Contract already exists".to_string()));
        }

        let invite_token = generate_unique_invite_token(&txn).await?;

        let contract = contracts::ActiveModel {
            id: Set(id),
            name: Set(name),
            description: Set(request.description),
            invite_token: Set(Some(invite_token)),
        }
        .insert(&txn)
        .await?;

        for plan in &plans {
            contract_plans::Entity::insert(contract_plans::ActiveModel {
                contract_id: Set(contract.id.clone()),
                plan_id: Set(plan.id),
            })
            .exec_without_returning(&txn)
            .await?;
        }

        for product in &products {
            contract_products::Entity::insert(contract_products::ActiveModel {
                contract_id: Set(contract.id.clone()),
                product_id: Set(product.id),
            })
            .exec_without_returning(&txn)
            .await?;
        }

        txn.commit().await?;

        log::info!(
            "Contract {} created with {} plans and {} products",
            contract.id,
            plans.len(),
            products.len()
        );

        Ok(ContractResponse {
            id: contract.id,
            name: contract.name,
            description: contract.description,
            invite_token: contract.invite_token,
            plans: plans.into_iter().map(PlanResponse::from).collect(),
            products: products.into_iter().map(ProductResponse::from).collect(),
        })
    }
}

fn validate_catalog_item(request: &CreateCatalogItemRequest) -> AppResult<(String, i64)> {
    let name = non_blank(&request.name)
        .ok_or_else(|| AppError::ValidationError("Name is required".to_string()))?;
    let price_cents = request
        .price
        .and_then(price_to_cents)
        .ok_or_else(|| AppError::ValidationError("Price must be a non-negative number".to_string()))?;
    Ok((name.to_string(), price_cents))
}

fn dedup_len(ids: &[i64]) -> usize {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}
