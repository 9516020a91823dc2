pub mod approval;
pub mod auth_service;
