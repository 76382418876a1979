pub mod birth_date;
pub mod invite_token;
pub mod jwt;
pub mod password;
pub mod phone;

pub use birth_date::parse_birth_date;
pub use invite_token::generate_unique_invite_token;
pub use jwt::*;
pub use password::*;
pub use phone::*;
