pub mod classes;
pub mod contract_plans;
pub mod contract_products;
pub mod contracts;
pub mod events;
pub mod photo_students;
pub mod photos;
pub mod plans;
pub mod products;
pub mod students;
pub mod subscriptions;
pub mod users;

pub use classes as class_entity;
pub use contract_plans as contract_plan_entity;
pub use contract_products as contract_product_entity;
pub use contracts as contract_entity;
pub use events as event_entity;
pub use photo_students as photo_student_entity;
pub use photos as photo_entity;
pub use plans as plan_entity;
pub use products as product_entity;
pub use students as student_entity;
pub use subscriptions as subscription_entity;
pub use users as user_entity;
