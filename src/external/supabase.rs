use super::{ContractDirectory, ObjectStorage, RemoteContract};
use crate::config::SupabaseConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

/// Client for the hosted backend behind the gallery product: storage bucket
/// for photo binaries plus its REST view of the `contracts` table.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn base_url(&self) -> AppResult<&str> {
        let url = self.config.url.trim_end_matches('/');
        if url.is_empty() {
            return Err(AppError::ExternalApiError(
                "Supabase URL is not configured".to_string(),
            ));
        }
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseClient {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<()> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url()?,
            self.config.photo_bucket,
            key
        );

        let response = self
            .authorized(self.client.post(&url))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        if response.status().is_success() {
            log::info!("Uploaded object to storage: {key}");
            Ok(())
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Storage upload failed: {key}, status: {status}, error: {error_text}");
            Err(AppError::ExternalApiError(format!(
                "Storage upload failed ({status}): {error_text}"
            )))
        }
    }

    async fn public_url(&self, key: &str) -> AppResult<String> {
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url()?,
            self.config.photo_bucket,
            key
        ))
    }
}

#[async_trait]
impl ContractDirectory for SupabaseClient {
    async fn fetch_contract(&self, contract_id: &str) -> AppResult<Option<RemoteContract>> {
        let url = format!("{}/rest/v1/contracts", self.base_url()?);

        let response = self
            .authorized(self.client.get(&url))
            .query(&[("id", format!("eq.{contract_id}")), ("select", "*".to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Failed to fetch contract {contract_id} ({status}): {error_text}"
            )));
        }

        let rows: Vec<RemoteContract> = response.json().await?;
        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> SupabaseConfig {
        SupabaseConfig {
            url: url.to_string(),
            service_role_key: "service-key".to_string(),
            photo_bucket: "event_photos".to_string(),
        }
    }

    #[tokio::test]
    async fn test_public_url() {
        let client = SupabaseClient::new(config("https://abc.supabase.co/"));
        let url = client.public_url("evt-1/photo.jpg").await.unwrap();

        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/object/public/event_photos/evt-1/photo.jpg"
        );
    }

    #[tokio::test]
    async fn test_missing_url_is_an_integration_error() {
        let client = SupabaseClient::new(config(""));

        assert!(matches!(
            client.public_url("k").await,
            Err(AppError::ExternalApiError(_))
        ));
        assert!(matches!(
            client.fetch_contract("c1").await,
            Err(AppError::ExternalApiError(_))
        ));
    }

    #[test]
    fn test_remote_contract_deserialize() {
        let rows: Vec<RemoteContract> = serde_json::from_str(
            r#"[{"id":"c1","name":"Escola Azul","description":null,"invite_link_id":"tok","created_at":"2025-01-01"}]"#,
        )
        .unwrap();

        assert_eq!(rows[0].id, "c1");
        assert_eq!(rows[0].invite_link_id.as_deref(), Some("tok"));
    }
}
