//! # Lockout Flow Tests
//!
//! The login state machine end to end against the real JSON account store
//! and file-backed audit stream, with a controllable clock standing in for
//! the 30-minute wall wait.

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use ev_02_accounts::{
        AccountApi, AccountDependencies, AuthError, JsonAccountStore, LockState, LockoutPolicy,
        LoginService, MockTimeSource,
    };
    use shared_audit::FileAuditLog;
    use shared_types::Role;

    type Service = LoginService<JsonAccountStore, MockTimeSource, FileAuditLog>;

    struct Harness {
        service: Service,
        clock: MockTimeSource,
        data_dir: PathBuf,
        _tmp: TempDir,
    }

    impl Harness {
        fn new() -> Self {
            let tmp = tempfile::tempdir().unwrap();
            let data_dir = tmp.path().join("data");
            std::fs::create_dir_all(&data_dir).unwrap();

            let clock = MockTimeSource::new(1_750_000_000);
            let service = LoginService::new(
                AccountDependencies {
                    store: JsonAccountStore::new(data_dir.join("accounts.json")),
                    time_source: clock.clone(),
                    audit: FileAuditLog::new(data_dir.join("login_log.txt")),
                },
                LockoutPolicy::default(),
            );

            Self {
                service,
                clock,
                data_dir,
                _tmp: tmp,
            }
        }

        fn audit_lines(&self) -> Vec<String> {
            std::fs::read_to_string(self.data_dir.join("login_log.txt"))
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    /// The full scenario: two failures leave the account active with a
    /// counter of 2; a third locks it; the correct password is rejected
    /// while locked; after the simulated 30 minutes the correct password
    /// succeeds and the counter resets.
    #[test]
    fn test_stu42_lockout_scenario() {
        let mut h = Harness::new();
        h.service
            .create_account("stu42", Role::Student, "p@ss1")
            .unwrap();

        for _ in 0..2 {
            assert!(matches!(
                h.service.login("stu42", "nope"),
                Err(AuthError::InvalidCredentials)
            ));
        }
        let status = h.service.account_status("stu42").unwrap();
        assert_eq!(status.state, LockState::Active);
        assert_eq!(status.failed_attempts, 2);

        assert!(matches!(
            h.service.login("stu42", "nope"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(h.service.account_status("stu42").unwrap().state.is_locked());

        // Correct password, still locked: rejected without a password check.
        assert!(matches!(
            h.service.login("stu42", "p@ss1"),
            Err(AuthError::AccountLocked { .. })
        ));

        // 30 simulated minutes later the same attempt succeeds.
        h.clock.advance_secs(30 * 60);
        let outcome = h.service.login("stu42", "p@ss1").unwrap();
        assert_eq!(outcome.account_id, "stu42");
        assert_eq!(outcome.role, Role::Student);

        let status = h.service.account_status("stu42").unwrap();
        assert_eq!(status.state, LockState::Active);
        assert_eq!(status.failed_attempts, 0);

        // The audit stream tells the whole story in order.
        let lines = h.audit_lines();
        let outcomes: Vec<&str> = lines
            .iter()
            .map(|l| {
                l.split(" | ")
                    .find(|part| part.starts_with("OUTCOME="))
                    .unwrap()
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![
                "OUTCOME=ACCOUNT_CREATED",
                "OUTCOME=LOGIN_FAILURE",
                "OUTCOME=LOGIN_FAILURE",
                "OUTCOME=LOCKOUT_TRIGGERED",
                "OUTCOME=LOGIN_BLOCKED",
                "OUTCOME=LOGIN_SUCCESS",
            ]
        );
    }

    #[test]
    fn test_lockout_expires_without_manual_action() {
        let mut h = Harness::new();
        h.service
            .create_account("stu7", Role::Student, "secret")
            .unwrap();
        for _ in 0..3 {
            let _ = h.service.login("stu7", "bad");
        }

        // One second short: still locked.
        h.clock.advance_secs(30 * 60 - 1);
        assert!(matches!(
            h.service.login("stu7", "secret"),
            Err(AuthError::AccountLocked { .. })
        ));

        // The boundary itself unlocks.
        h.clock.advance_secs(1);
        assert!(h.service.login("stu7", "secret").is_ok());
        assert_eq!(
            h.service.account_status("stu7").unwrap().failed_attempts,
            0
        );
    }

    #[test]
    fn test_manual_unlock_short_circuits_the_wait() {
        let mut h = Harness::new();
        h.service
            .create_account("stu9", Role::Student, "pw9")
            .unwrap();
        for _ in 0..3 {
            let _ = h.service.login("stu9", "bad");
        }
        assert!(h.service.account_status("stu9").unwrap().state.is_locked());

        h.service.unlock("stu9").unwrap();

        // No clock movement: immediately loginable, counter reset.
        let outcome = h.service.login("stu9", "pw9").unwrap();
        assert_eq!(outcome.account_id, "stu9");
        assert_eq!(
            h.service.account_status("stu9").unwrap().failed_attempts,
            0
        );
        assert!(h
            .audit_lines()
            .iter()
            .any(|l| l.contains("OUTCOME=MANUAL_UNLOCK")));
    }

    #[test]
    fn test_no_account_enumeration_via_messages() {
        let mut h = Harness::new();
        h.service
            .create_account("real", Role::Student, "pw")
            .unwrap();

        let unknown = h.service.login("ghost", "pw").unwrap_err();
        let wrong_pw = h.service.login("real", "wrong").unwrap_err();

        // Same user-visible text for both failure modes.
        assert_eq!(unknown.to_string(), wrong_pw.to_string());

        // Full detail still lands in the audit stream.
        let lines = h.audit_lines();
        assert!(lines.iter().any(|l| l.contains("account not found")));
        assert!(lines.iter().any(|l| l.contains("wrong password")));
    }

    #[test]
    fn test_admin_and_student_roles_round_trip() {
        let mut h = Harness::new();
        h.service
            .create_account("prof", Role::Admin, "adminpw")
            .unwrap();

        let outcome = h.service.login("prof", "adminpw").unwrap();
        assert_eq!(outcome.role, Role::Admin);

        let statuses = h.service.list_accounts().unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].role, Role::Admin);
    }
}
