pub mod approval;
pub mod auth;
pub mod club;
pub mod event;
pub mod health;
pub mod staff;
