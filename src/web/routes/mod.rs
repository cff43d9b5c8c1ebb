pub mod activities;
pub mod activity;
pub mod chats;
pub mod dev;
pub mod user;
