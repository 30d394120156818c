//! Admin identity allow-list.
//!
//! Process-wide list of identities with unconditional access to every file.
//! Seeded with the owner at startup; only the owner may append entries;
//! entries are never removed.

use std::sync::RwLock;

use crate::error::{AppError, Result};

/// Admin registry
pub struct AdminRegistry {
    owner: String,
    entries: RwLock<Vec<String>>,
}

impl AdminRegistry {
    /// Create a registry containing exactly the owner
    pub fn new(owner: impl Into<String>) -> Self {
        let owner = owner.into().trim().to_string();
        Self {
            entries: RwLock::new(vec![owner.clone()]),
            owner,
        }
    }

    /// The configured owner identity
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Whether `identity` is on the allow-list
    pub fn is_admin(&self, identity: &str) -> bool {
        let identity = identity.trim();
        self.entries
            .read()
            .expect("admin list lock poisoned")
            .iter()
            .any(|entry| entry == identity)
    }

    /// Current allow-list, in insertion order
    pub fn admins(&self) -> Vec<String> {
        self.entries
            .read()
            .expect("admin list lock poisoned")
            .clone()
    }

    /// Append `new_identity` to the allow-list.
    ///
    /// Only the owner may add entries. Re-adding an existing identity is a
    /// no-op, not an error. Returns the resulting list.
    pub fn add_admin(&self, requester: &str, new_identity: &str) -> Result<Vec<String>> {
        let new_identity = new_identity.trim();
        if new_identity.is_empty()
            || !new_identity.contains('@')
            || new_identity.chars().any(char::is_whitespace)
        {
            return Err(AppError::InvalidIdentity(format!(
                "Not a usable admin identity: {:?}",
                new_identity
            )));
        }

        if requester.trim() != self.owner {
            return Err(AppError::Forbidden(
                "Only the owner may grant admin status".to_string(),
            ));
        }

        let mut entries = self.entries.write().expect("admin list lock poisoned");
        if !entries.iter().any(|entry| entry == new_identity) {
            entries.push(new_identity.to_string());
            tracing::info!(identity = new_identity, "Admin identity added");
        }
        Ok(entries.clone())
    }
}
