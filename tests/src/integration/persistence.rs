//! # Persistence Tests
//!
//! Durable-store behavior across service restarts: the index and account
//! store are the source of truth, the in-memory state is just a cache of
//! them, and corruption is loud.

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use ev_01_submission::{
        FsFileVault, IndexError, JsonlIndexStore, MockTimeSource, SubmissionApi,
        SubmissionDependencies, SubmissionService, SubmitError, VaultConfig,
    };
    use ev_02_accounts::{
        AccountApi, AccountDependencies, AuthError, JsonAccountStore, LockoutPolicy, LoginService,
        MockTimeSource as AccountClock,
    };
    use shared_audit::FileAuditLog;
    use shared_types::Role;

    type SubService = SubmissionService<JsonlIndexStore, FsFileVault, MockTimeSource, FileAuditLog>;
    type AcctService = LoginService<JsonAccountStore, AccountClock, FileAuditLog>;

    fn submission_service(data_dir: &PathBuf, clock: &MockTimeSource) -> SubService {
        SubmissionService::new(
            SubmissionDependencies {
                index_store: JsonlIndexStore::new(data_dir.join("submission_index.jsonl")),
                vault: FsFileVault::new(data_dir.join("vault")),
                time_source: clock.clone(),
                audit: FileAuditLog::new(data_dir.join("submission_log.txt")),
            },
            VaultConfig::default(),
        )
        .unwrap()
    }

    fn account_service(data_dir: &PathBuf, clock: &AccountClock) -> AcctService {
        LoginService::new(
            AccountDependencies {
                store: JsonAccountStore::new(data_dir.join("accounts.json")),
                time_source: clock.clone(),
                audit: FileAuditLog::new(data_dir.join("login_log.txt")),
            },
            LockoutPolicy::default(),
        )
    }

    fn scratch() -> (TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        (tmp, data_dir)
    }

    fn write_source(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_dedup_survives_restart() {
        let (tmp, data_dir) = scratch();
        let clock = MockTimeSource::new(1_750_000_000);

        let source = write_source(&tmp, "report.pdf", b"submitted once");
        {
            let mut service = submission_service(&data_dir, &clock);
            service.submit("stu1", &source).unwrap();
        }

        // A fresh service over the same files still knows the content.
        let mut service = submission_service(&data_dir, &clock);
        assert_eq!(service.all_submissions().len(), 1);

        let renamed = write_source(&tmp, "copy.pdf", b"submitted once");
        let err = service.submit("stu2", &renamed).unwrap_err();
        assert!(matches!(err, SubmitError::DuplicateContent { .. }));

        let resubmit = write_source(&tmp, "report.pdf", b"other content now");
        let err = service.submit("stu1", &resubmit).unwrap_err();
        assert!(matches!(err, SubmitError::DuplicateFilename { .. }));
    }

    #[test]
    fn test_torn_index_tail_is_recovered() {
        let (tmp, data_dir) = scratch();
        let clock = MockTimeSource::new(1_750_000_000);

        let source = write_source(&tmp, "first.pdf", b"first");
        {
            let mut service = submission_service(&data_dir, &clock);
            service.submit("stu1", &source).unwrap();
        }

        // Simulate a crash mid-append: a half record with no newline.
        let index_path = data_dir.join("submission_index.jsonl");
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&index_path)
            .unwrap();
        file.write_all(b"{\"student_id\":\"stu2\",\"filena").unwrap();
        drop(file);

        // Restart: the torn tail is skipped, the good record survives, and
        // the next accept repairs the file.
        let mut service = submission_service(&data_dir, &clock);
        assert_eq!(service.all_submissions().len(), 1);

        let next = write_source(&tmp, "second.pdf", b"second");
        service.submit("stu2", &next).unwrap();

        let service = submission_service(&data_dir, &clock);
        assert_eq!(service.all_submissions().len(), 2);
    }

    #[test]
    fn test_interior_index_corruption_fails_construction() {
        let (_tmp, data_dir) = scratch();
        std::fs::write(
            data_dir.join("submission_index.jsonl"),
            "garbage line\n{\"also\": \"garbage\"}\n",
        )
        .unwrap();

        let clock = MockTimeSource::new(1_750_000_000);
        let result = SubmissionService::new(
            SubmissionDependencies {
                index_store: JsonlIndexStore::new(data_dir.join("submission_index.jsonl")),
                vault: FsFileVault::new(data_dir.join("vault")),
                time_source: clock,
                audit: FileAuditLog::new(data_dir.join("submission_log.txt")),
            },
            VaultConfig::default(),
        );

        match result {
            Err(SubmitError::Index(IndexError::Corrupted { record, .. })) => {
                assert_eq!(record, 1)
            }
            Ok(_) => panic!("corrupted index must not load"),
            Err(other) => panic!("expected Corrupted, got {other}"),
        }
    }

    #[test]
    fn test_lockout_state_survives_restart() {
        let (_tmp, data_dir) = scratch();
        let clock = AccountClock::new(1_750_000_000);

        {
            let mut service = account_service(&data_dir, &clock);
            service
                .create_account("stu42", Role::Student, "p@ss1")
                .unwrap();
            for _ in 0..3 {
                let _ = service.login("stu42", "wrong");
            }
        }

        // New process, same store: the lock still holds...
        let mut service = account_service(&data_dir, &clock);
        assert!(matches!(
            service.login("stu42", "p@ss1"),
            Err(AuthError::AccountLocked { .. })
        ));

        // ...and still expires on schedule, because locked_until is
        // absolute time in the store.
        clock.advance_secs(30 * 60);
        assert!(service.login("stu42", "p@ss1").is_ok());
    }

    #[test]
    fn test_corrupt_account_store_is_loud() {
        let (_tmp, data_dir) = scratch();
        std::fs::write(data_dir.join("accounts.json"), "{ not json").unwrap();

        let clock = AccountClock::new(1_750_000_000);
        let mut service = account_service(&data_dir, &clock);

        let err = service.login("anyone", "pw").unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
    }

    #[test]
    fn test_accounts_file_never_holds_plaintext_passwords() {
        let (_tmp, data_dir) = scratch();
        let clock = AccountClock::new(1_750_000_000);

        let mut service = account_service(&data_dir, &clock);
        service
            .create_account("stu42", Role::Student, "super-secret-phrase")
            .unwrap();

        let text = std::fs::read_to_string(data_dir.join("accounts.json")).unwrap();
        assert!(!text.contains("super-secret-phrase"));
        assert!(text.contains("password_hash"));
    }

    #[test]
    fn test_vault_files_survive_restart_and_stay_consistent_with_index() {
        let (tmp, data_dir) = scratch();
        let clock = MockTimeSource::new(1_750_000_000);

        let source = write_source(&tmp, "keep.pdf", b"keep these bytes");
        {
            let mut service = submission_service(&data_dir, &clock);
            service.submit("stu1", &source).unwrap();
        }

        let service = submission_service(&data_dir, &clock);
        for record in service.all_submissions() {
            let vault_path = data_dir
                .join("vault")
                .join(format!("{}__{}", record.student_id, record.filename));
            assert!(vault_path.is_file(), "index record without vault file");
            assert_eq!(
                std::fs::metadata(&vault_path).unwrap().len(),
                record.size_bytes
            );
        }
    }
}
