use super::Notifier;
use crate::config::WhatsAppConfig;
use crate::error::{AppError, AppResult};
use crate::utils::format_br_phone;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub to: &'a str,
    pub message: &'a str,
}

pub fn welcome_message(name: &str, dashboard_link: &str) -> String {
    format!(
        "🎉 Olá, {name}!\n\
         Seja bem-vindo(a) à Memory School Fotografia 📸✨\n\n\
         Seu cadastro foi concluído com sucesso!\n\
         Agora você já pode acessar a sua área do cliente para acompanhar os serviços, pacotes e fotos do(s) seu(s) filho(s).\n\n\
         👉 Acesse aqui: {dashboard_link}"
    )
}

#[derive(Clone)]
pub struct WhatsAppService {
    client: Client,
    config: WhatsAppConfig,
}

impl WhatsAppService {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Notifier for WhatsAppService {
    async fn send_welcome(&self, phone: &str, name: &str, dashboard_link: &str) -> AppResult<()> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) else {
            log::debug!("WHATSAPP_API_KEY not configured, skipping welcome message");
            return Ok(());
        };

        let to = format_br_phone(phone);
        let message = welcome_message(name, dashboard_link);

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&SendMessageRequest {
                to: &to,
                message: &message,
            })
            .send()
            .await?;

        if response.status().is_success() {
            log::info!("Welcome message sent successfully: {to}");
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Welcome message failed to send: {to}, Error: {error_text}");
            Err(AppError::ExternalApiError(format!(
                "WhatsApp sending failed: {error_text}"
            )))
        }
    }
}
