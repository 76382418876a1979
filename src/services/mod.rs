pub mod auth_service;
pub mod contract_service;
pub mod event_service;
pub mod photo_service;
pub mod sync_service;

pub use auth_service::*;
pub use contract_service::*;
pub use event_service::*;
pub use photo_service::*;
pub use sync_service::*;
