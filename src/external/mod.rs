pub mod supabase;
pub mod whatsapp;

pub use supabase::*;
pub use whatsapp::*;

use crate::error::AppResult;
use async_trait::async_trait;
use serde::Deserialize;

/// Object storage holding the photo binaries.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<()>;

    async fn public_url(&self, key: &str) -> AppResult<String>;
}

/// Contract record as kept by the gallery product.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteContract {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub invite_link_id: Option<String>,
}

/// Read access to the gallery product's contract table.
#[async_trait]
pub trait ContractDirectory: Send + Sync {
    async fn fetch_contract(&self, contract_id: &str) -> AppResult<Option<RemoteContract>>;
}

/// Outbound messaging to guardians.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_welcome(&self, phone: &str, name: &str, dashboard_link: &str) -> AppResult<()>;
}
