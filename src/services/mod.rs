pub mod auth_service;
pub mod item_service;
pub mod sale_service;
