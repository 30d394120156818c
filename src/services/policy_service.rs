//! Access policy evaluation.
//!
//! Pure decision function: given an operation, a file record and the
//! caller's presented credential/identity, decide whether the operation is
//! permitted. Never mutates registry or blob-store state.

use crate::error::{AppError, Result};
use crate::models::{Credential, FileRecord};
use crate::services::admin_service::AdminRegistry;

/// Operation being authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Download,
    AdminDownload,
    Delete,
}

/// Credentials presented by the caller
#[derive(Debug, Clone, Default)]
pub struct Caller {
    pub credential: Option<String>,
    pub identity: Option<String>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            credential: Some(credential.into()),
            identity: None,
        }
    }

    pub fn with_identity(identity: impl Into<String>) -> Self {
        Self {
            credential: None,
            identity: Some(identity.into()),
        }
    }
}

/// Decide whether `caller` may perform `operation` on `record`.
///
/// Admin identity is checked first and short-circuits the per-file
/// credential entirely: a malformed or missing credential must never defeat
/// the admin bypass.
pub fn authorize(
    operation: Operation,
    record: &FileRecord,
    caller: &Caller,
    admins: &AdminRegistry,
) -> Result<()> {
    if let Some(identity) = &caller.identity {
        if admins.is_admin(identity) {
            return Ok(());
        }
    }

    match operation {
        Operation::Download => {
            let presented = caller
                .credential
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| AppError::Forbidden("Credential required".to_string()))?;

            if record.credential.is_pin() && !Credential::is_valid_pin(presented) {
                return Err(AppError::InvalidCredentialFormat);
            }

            if presented != record.credential.value() {
                return Err(AppError::CredentialMismatch);
            }

            Ok(())
        }
        Operation::AdminDownload | Operation::Delete => Err(AppError::Forbidden(
            "Admin identity required".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    const OWNER: &str = "owner@example.com";

    fn record_with(credential: Credential) -> FileRecord {
        FileRecord {
            id: Uuid::new_v4(),
            storage_key: "ab12".into(),
            original_name: "report.pdf".into(),
            uploader: Some("alice".into()),
            description: None,
            credential,
            checksum_sha256: "0a0b0c".into(),
            size_bytes: 4,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_pin_matrix() {
        let admins = AdminRegistry::new(OWNER);
        let record = record_with(Credential::Pin("4821".into()));

        assert!(authorize(
            Operation::Download,
            &record,
            &Caller::with_credential("4821"),
            &admins
        )
        .is_ok());

        let err = authorize(
            Operation::Download,
            &record,
            &Caller::with_credential("0000"),
            &admins,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::CredentialMismatch));

        let err = authorize(
            Operation::Download,
            &record,
            &Caller::with_credential("48212"),
            &admins,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentialFormat));
    }

    #[test]
    fn test_secret_comparison_trims_whitespace() {
        let admins = AdminRegistry::new(OWNER);
        let record = record_with(Credential::Secret("s3cr3t".into()));

        assert!(authorize(
            Operation::Download,
            &record,
            &Caller::with_credential("  s3cr3t  "),
            &admins
        )
        .is_ok());

        let err = authorize(
            Operation::Download,
            &record,
            &Caller::with_credential("wrong"),
            &admins,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::CredentialMismatch));
    }

    #[test]
    fn test_missing_credential_is_forbidden() {
        let admins = AdminRegistry::new(OWNER);
        let record = record_with(Credential::Secret("s3cr3t".into()));
        let err =
            authorize(Operation::Download, &record, &Caller::anonymous(), &admins).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_admin_bypass_wins_over_any_credential() {
        let admins = AdminRegistry::new(OWNER);
        admins.add_admin(OWNER, "bob@x.com").unwrap();
        let record = record_with(Credential::Pin("4821".into()));

        // No credential, wrong credential, malformed credential: all allowed
        let callers = [
            Caller::with_identity("bob@x.com"),
            Caller {
                credential: Some("0000".into()),
                identity: Some("bob@x.com".into()),
            },
            Caller {
                credential: Some("not-even-a-pin".into()),
                identity: Some("bob@x.com".into()),
            },
        ];
        for caller in &callers {
            for op in [Operation::Download, Operation::AdminDownload, Operation::Delete] {
                assert!(authorize(op, &record, caller, &admins).is_ok());
            }
        }
    }

    #[test]
    fn test_delete_and_admin_download_require_admin_identity() {
        let admins = AdminRegistry::new(OWNER);
        let record = record_with(Credential::Pin("4821".into()));

        // Even a correct per-file credential does not grant delete
        let caller = Caller::with_credential("4821");
        for op in [Operation::AdminDownload, Operation::Delete] {
            let err = authorize(op, &record, &caller, &admins).unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }

        let err = authorize(
            Operation::Delete,
            &record,
            &Caller::with_identity("stranger@x.com"),
            &admins,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
