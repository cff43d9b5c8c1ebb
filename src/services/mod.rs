pub mod activity_service;
pub mod chat_service;
pub mod membership_service;
pub mod user_service;
