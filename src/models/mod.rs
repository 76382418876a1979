pub mod common;
pub mod contract;
pub mod event;
pub mod photo;
pub mod registration;

pub use common::*;
pub use contract::*;
pub use event::*;
pub use photo::*;
pub use registration::*;
