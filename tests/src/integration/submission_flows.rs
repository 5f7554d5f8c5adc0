//! # Submission Flow Tests
//!
//! End-to-end pipeline scenarios against the real file adapters: JSONL
//! index, directory vault, and file-backed audit stream, all inside a
//! scratch data directory.

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use ev_01_submission::{
        FsFileVault, JsonlIndexStore, MockTimeSource, SubmissionApi, SubmissionDependencies,
        SubmissionService, SubmitError, VaultConfig,
    };
    use shared_audit::FileAuditLog;

    type Service = SubmissionService<JsonlIndexStore, FsFileVault, MockTimeSource, FileAuditLog>;

    struct Harness {
        service: Service,
        clock: MockTimeSource,
        data_dir: PathBuf,
        source_dir: PathBuf,
        _tmp: TempDir,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_config(VaultConfig::default())
        }

        fn with_config(config: VaultConfig) -> Self {
            let tmp = tempfile::tempdir().unwrap();
            let data_dir = tmp.path().join("data");
            let source_dir = tmp.path().join("sources");
            std::fs::create_dir_all(&data_dir).unwrap();
            std::fs::create_dir_all(&source_dir).unwrap();

            let clock = MockTimeSource::new(1_750_000_000);
            let service = SubmissionService::new(
                SubmissionDependencies {
                    index_store: JsonlIndexStore::new(data_dir.join("submission_index.jsonl")),
                    vault: FsFileVault::new(data_dir.join("vault")),
                    time_source: clock.clone(),
                    audit: FileAuditLog::new(data_dir.join("submission_log.txt")),
                },
                config,
            )
            .unwrap();

            Self {
                service,
                clock,
                data_dir,
                source_dir,
                _tmp: tmp,
            }
        }

        fn write_source(&self, name: &str, bytes: &[u8]) -> PathBuf {
            let path = self.source_dir.join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(bytes).unwrap();
            path
        }

        fn audit_lines(&self) -> Vec<String> {
            std::fs::read_to_string(self.data_dir.join("submission_log.txt"))
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }

        fn vault_file(&self, student: &str, filename: &str) -> PathBuf {
            self.data_dir
                .join("vault")
                .join(format!("{}__{}", student, filename))
        }
    }

    /// The canonical dedup scenario: accept for A, reject identical bytes
    /// under a new name for B, reject A's resubmission by filename.
    #[test]
    fn test_dedup_scenario_round() {
        let mut h = Harness::new();
        let content = vec![0x42u8; 3 * 1024 * 1024];

        let original = h.write_source("report.pdf", &content);
        let record = h.service.submit("A", &original).unwrap();
        assert_eq!(record.size_bytes, content.len() as u64);
        assert!(h.vault_file("A", "report.pdf").is_file());

        // Same bytes, different name, different student: content dedup is
        // global.
        let renamed = h.write_source("report_copy.pdf", &content);
        let err = h.service.submit("B", &renamed).unwrap_err();
        assert!(matches!(err, SubmitError::DuplicateContent { .. }));
        assert!(!h.vault_file("B", "report_copy.pdf").exists());

        // A resubmitting the same filename fails on the name constraint.
        let again = h.write_source("report.pdf", b"different bytes this time");
        let err = h.service.submit("A", &again).unwrap_err();
        assert!(matches!(err, SubmitError::DuplicateFilename { .. }));

        let lines = h.audit_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("OUTCOME=ACCEPTED"));
        assert!(lines[1].contains("OUTCOME=REJECTED"));
        assert!(lines[1].contains("duplicate content"));
        assert!(lines[2].contains("OUTCOME=REJECTED"));
    }

    #[test]
    fn test_oversize_always_rejected() {
        let mut h = Harness::new();
        let too_big = vec![0u8; 5 * 1024 * 1024 + 1];
        let path = h.write_source("thesis.pdf", &too_big);

        let err = h.service.submit("stu1", &path).unwrap_err();
        assert!(matches!(err, SubmitError::FileTooLarge { .. }));
        assert!(!h.vault_file("stu1", "thesis.pdf").exists());
    }

    #[test]
    fn test_extension_checked_before_size() {
        // Oversize AND wrong extension: the extension check fires first, so
        // the size is never read.
        let mut h = Harness::with_config(VaultConfig::default().with_max_file_size(4));
        let path = h.write_source("huge.zip", &[0u8; 64]);

        let err = h.service.submit("stu1", &path).unwrap_err();
        assert!(matches!(err, SubmitError::InvalidExtension { .. }));
    }

    #[test]
    fn test_uniqueness_holds_over_many_submissions() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        let mut h = Harness::new();
        for i in 0..20 {
            let mut content = vec![0u8; 256];
            rng.fill(&mut content[..]);
            let path = h.write_source(&format!("essay_{}.pdf", i), &content);
            h.service
                .submit(&format!("stu{}", i % 5), &path)
                .unwrap();
            h.clock.advance_secs(1);
        }

        let records = h.service.all_submissions();
        assert_eq!(records.len(), 20);

        for (i, a) in records.iter().enumerate() {
            for b in records.iter().skip(i + 1) {
                assert!(
                    !(a.student_id == b.student_id && a.filename == b.filename),
                    "two records share (student, filename)"
                );
                assert_ne!(a.content_hash, b.content_hash, "two records share a hash");
            }
        }
    }

    #[test]
    fn test_same_filename_across_students_is_fine() {
        let mut h = Harness::new();
        let a = h.write_source("a.pdf", b"alice answers");
        let b = h.write_source("b.pdf", b"bob answers");

        // Different students may use the same filename as long as content
        // differs; the vault keeps both under distinct names.
        let path_a = h.source_dir.join("report.pdf");
        std::fs::copy(&a, &path_a).unwrap();
        h.service.submit("alice", &path_a).unwrap();

        std::fs::copy(&b, &path_a).unwrap();
        h.service.submit("bob", &path_a).unwrap();

        assert!(h.vault_file("alice", "report.pdf").is_file());
        assert!(h.vault_file("bob", "report.pdf").is_file());
        assert_eq!(
            std::fs::read(h.vault_file("alice", "report.pdf")).unwrap(),
            b"alice answers"
        );
    }

    #[test]
    fn test_missing_source_rejected() {
        let mut h = Harness::new();
        let ghost = h.source_dir.join("ghost.pdf");

        let err = h.service.submit("stu1", &ghost).unwrap_err();
        assert!(matches!(err, SubmitError::FileNotFound { .. }));
        assert_eq!(h.audit_lines().len(), 1);
    }

    #[test]
    fn test_rejections_leave_index_file_untouched() {
        let mut h = Harness::new();
        let bad = h.write_source("notes.txt", b"text");
        let _ = h.service.submit("stu1", &bad);

        assert!(!h.data_dir.join("submission_index.jsonl").exists());
    }

    #[test]
    fn test_accept_timestamps_come_from_clock() {
        let mut h = Harness::new();
        h.clock.set(1_800_000_000);
        let path = h.write_source("late.pdf", b"late content");

        let record = h.service.submit("stu1", &path).unwrap();
        assert_eq!(record.accepted_at, 1_800_000_000);
    }
}
