use super::common::cents_to_price;
use crate::entities::{contract_entity as contracts, plan_entity as plans, product_entity as products};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 149.9)]
    pub price: f64,
}

impl From<plans::Model> for PlanResponse {
    fn from(plan: plans::Model) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            description: plan.description,
            price: cents_to_price(plan.price_cents),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 39.9)]
    pub price: f64,
}

impl From<products::Model> for ProductResponse {
    fn from(product: products::Model) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: cents_to_price(product.price_cents),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContractDetailsResponse {
    pub id: String,
    pub name: String,
    pub plans: Vec<PlanResponse>,
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InviteResponse {
    pub message: String,
    #[schema(example = "http://localhost:3000/cadastro/2b1f0c9e-3c57-4f55-9a3a-0c1f5b7f3a11")]
    pub invite_link: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContractSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<contracts::Model> for ContractSummary {
    fn from(contract: contracts::Model) -> Self {
        Self {
            id: contract.id,
            name: contract.name,
            description: contract.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContractResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub invite_token: Option<String>,
    pub plans: Vec<PlanResponse>,
    pub products: Vec<ProductResponse>,
}

/// Plan or product creation payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCatalogItemRequest {
    #[schema(example = "Pacote Completo")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(example = 149.9)]
    pub price: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateContractRequest {
    /// Defaults to a new UUID
    pub id: Option<String>,
    #[schema(example = "Escola Azul 2025")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub plan_ids: Vec<i64>,
    #[serde(default)]
    pub product_ids: Vec<i64>,
}
