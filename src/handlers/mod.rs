use crate::error::AppError;
use actix_web::web;

pub mod auth;
pub mod contract;
pub mod event;
pub mod photo;

pub use auth::auth_config;
pub use contract::contract_config;
pub use event::event_config;
pub use photo::photo_config;

/// Malformed JSON bodies get the same error envelope as service errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
