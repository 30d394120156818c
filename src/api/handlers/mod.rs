//! HTTP request handlers.

pub mod admin;
pub mod files;
pub mod health;
