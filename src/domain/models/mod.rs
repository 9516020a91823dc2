pub mod auth;
pub mod club;
pub mod event;
pub mod job;
pub mod user;
