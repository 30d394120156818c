//! Filedrop - Backend Library
//!
//! Minimal file-drop service: a client uploads a file and receives an opaque
//! identifier and an access secret; a holder of that secret can later download
//! the file; allow-listed admin identities can fetch or delete any file.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
