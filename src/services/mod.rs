//! Business logic services.

pub mod admin_service;
pub mod policy_service;
pub mod registry_service;
pub mod secret_service;
