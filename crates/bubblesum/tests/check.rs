//! End-to-end manifest checking.

use std::path::PathBuf;

use bubblesum::cli::OutputFormat;
use bubblesum::commands::{self, CheckOptions};
use bubblesum::verify::{FailureCause, STATUS_FAILED, STATUS_OK};
use bubblesum::{Digest, Manifest, VerificationResult};
use bubblesum_testkit::ManifestFixture;

fn three_entry_fixture() -> ManifestFixture {
    let mut fixture = ManifestFixture::new();
    fixture.add_matching("a.txt", vec![0x11u8; 32]);
    fixture.add_mismatched("b.txt", vec![0x22u8; 32], vec![0x23u8; 32]);
    fixture.add_missing("c.txt", vec![0x33u8; 32]);
    fixture
}

async fn run_check(fixture: &ManifestFixture, options: CheckOptions) -> (i32, String, String) {
    let manifest = Manifest::read(&fixture.write_manifest()).await.unwrap();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let status = commands::check(&fixture.verifier(4), &manifest, options, &mut out, &mut err)
        .await
        .unwrap();

    (
        status,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[tokio::test]
async fn test_mixed_manifest_report() {
    let fixture = three_entry_fixture();
    let manifest = Manifest::parse(&fixture.manifest_text());
    let report = fixture.verifier(2).verify_manifest(&manifest).await.unwrap();

    let results: Vec<_> = report.outcomes.iter().map(|o| o.result.clone()).collect();
    assert_eq!(results[0], VerificationResult::Ok);
    assert_eq!(results[1], VerificationResult::Failed(FailureCause::Mismatch));
    assert!(matches!(results[2], VerificationResult::Missing(_)));

    assert_eq!(report.status(), STATUS_FAILED);
    assert_eq!(report.ok_count(), 1);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.missing_count(), 1);
}

#[tokio::test]
async fn test_check_text_output() {
    let fixture = three_entry_fixture();
    let (status, out, err) = run_check(&fixture, CheckOptions::default()).await;

    assert_eq!(status, STATUS_FAILED);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("{}: OK", fixture.path("a.txt").display()),
            format!("{}: FAILED", fixture.path("b.txt").display()),
            format!("{}: No such file", fixture.path("c.txt").display()),
        ]
    );
    assert!(err.contains("1 listed file could not be read"));
    assert!(err.contains("1 computed checksum did NOT match"));
}

#[tokio::test]
async fn test_check_all_match() {
    let mut fixture = ManifestFixture::new();
    for i in 0..5u8 {
        fixture.add_matching(&format!("file{}", i), vec![i; 20]);
    }
    fixture.add_binary("image.iso", vec![0xeeu8; 32]);

    let (status, out, err) = run_check(&fixture, CheckOptions::default()).await;
    assert_eq!(status, STATUS_OK);
    assert_eq!(out.lines().count(), 6);
    assert!(out.lines().all(|l| l.ends_with(": OK")));
    assert!(err.is_empty());
}

#[tokio::test]
async fn test_check_preserves_manifest_order() {
    let mut fixture = ManifestFixture::new();
    let names: Vec<String> = (0..20).map(|i| format!("f{:02}", i)).collect();
    for (i, name) in names.iter().enumerate() {
        if i % 3 == 0 {
            fixture.add_missing(name, vec![i as u8; 16]);
        } else {
            fixture.add_matching(name, vec![i as u8; 16]);
        }
    }

    let (_, out, _) = run_check(&fixture, CheckOptions::default()).await;
    let reported: Vec<PathBuf> = out
        .lines()
        .map(|l| PathBuf::from(l.rsplit_once(": ").unwrap().0))
        .collect();
    let expected: Vec<PathBuf> = names.iter().map(|n| fixture.path(n)).collect();
    assert_eq!(reported, expected);
}

#[tokio::test]
async fn test_check_quiet_hides_ok_lines() {
    let fixture = three_entry_fixture();
    let options = CheckOptions {
        quiet: true,
        ..CheckOptions::default()
    };
    let (status, out, _) = run_check(&fixture, options).await;

    assert_eq!(status, STATUS_FAILED);
    assert_eq!(out.lines().count(), 2);
    assert!(!out.contains(": OK"));
}

#[tokio::test]
async fn test_check_status_prints_nothing() {
    let mut fixture = three_entry_fixture();
    fixture.add_raw_line("garbage");
    let options = CheckOptions {
        status: true,
        ..CheckOptions::default()
    };
    let (status, out, err) = run_check(&fixture, options).await;

    assert_eq!(status, STATUS_FAILED);
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[tokio::test]
async fn test_check_malformed_line_fails_otherwise_clean_manifest() {
    let mut fixture = ManifestFixture::new();
    fixture.add_matching("ok.bin", vec![0x42u8; 32]);
    fixture.add_raw_line("xesef-disof-gytuf-katof-movif-baxax  corrupted.bin");

    let (status, out, err) = run_check(&fixture, CheckOptions::default()).await;
    assert_eq!(status, STATUS_FAILED);
    assert_eq!(out.lines().count(), 1);
    assert!(err.contains("line 2"));
    assert!(err.contains("1 line is improperly formatted"));
}

#[tokio::test]
async fn test_check_empty_manifest() {
    let mut fixture = ManifestFixture::new();
    fixture.add_raw_line("not a manifest");

    let (status, out, err) = run_check(&fixture, CheckOptions::default()).await;
    assert_eq!(status, STATUS_FAILED);
    assert!(out.is_empty());
    assert!(!err.is_empty());
}

#[tokio::test]
async fn test_check_json_output() {
    let fixture = three_entry_fixture();
    let options = CheckOptions {
        format: OutputFormat::Json,
        ..CheckOptions::default()
    };
    let (status, out, _) = run_check(&fixture, options).await;
    assert_eq!(status, STATUS_FAILED);

    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let outcomes = json["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["result"], "ok");
    assert_eq!(outcomes[1]["result"]["failed"], "mismatch");
    assert!(outcomes[2]["result"]["missing"].is_string());
    assert_eq!(json["malformed_lines"], 0);
}

#[tokio::test]
async fn test_hash_output_checks_clean() {
    let mut fixture = ManifestFixture::new();
    let a = fixture.add_matching("one", vec![0x01u8; 32]);
    let b = fixture.add_matching("two", vec![0x02u8; 32]);
    let verifier = fixture.verifier(2);

    let mut out = Vec::new();
    let mut err = Vec::new();
    let status = commands::hash(&verifier, &[a.clone(), b.clone()], true, &mut out, &mut err)
        .await
        .unwrap();
    assert_eq!(status, STATUS_OK);
    assert!(err.is_empty());

    let text = String::from_utf8(out).unwrap();
    let manifest = Manifest::parse(&text);
    assert!(manifest.errors.is_empty());
    assert_eq!(manifest.entries[0].filename, a);
    assert_eq!(manifest.entries[1].filename, b);
    assert!(manifest.entries.iter().all(|e| e.binary));
    assert_eq!(
        manifest.entries[0].expected,
        Digest::new(vec![0x01u8; 32]).to_babble()
    );

    let report = verifier.verify_manifest(&manifest).await.unwrap();
    assert!(report.passed());
}

#[tokio::test]
async fn test_hash_reports_missing_file() {
    let mut fixture = ManifestFixture::new();
    let present = fixture.add_matching("here", vec![0x05u8; 16]);
    let absent = fixture.path("absent");

    let mut out = Vec::new();
    let mut err = Vec::new();
    let status = commands::hash(
        &fixture.verifier(1),
        &[absent.clone(), present],
        false,
        &mut out,
        &mut err,
    )
    .await
    .unwrap();

    assert_eq!(status, STATUS_FAILED);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    assert!(String::from_utf8(err)
        .unwrap()
        .contains(&absent.display().to_string()));
}

#[cfg(unix)]
mod command_source {
    use super::*;
    use bubblesum::{CommandSource, CommandSourceConfig, Verifier, VerifierConfig};

    /// A "hasher" that prints the file's contents, so each file holds its
    /// own hex digest.
    fn cat_source() -> CommandSource {
        CommandSource::new(CommandSourceConfig {
            program: "sh".into(),
            args: vec!["-c".into(), "cat \"$0\"".into()],
            timeout: None,
        })
    }

    #[tokio::test]
    async fn test_command_source_end_to_end() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("good");
        let bad = dir.path().join("bad");
        std::fs::write(&good, "31323334353637383930  good\n").unwrap();
        std::fs::write(&bad, "00ff\n").unwrap();

        let manifest = Manifest::parse(&format!(
            "xesef-disof-gytuf-katof-movif-baxux  {}\nxesef-disof-gytuf-katof-movif-baxux  {}\n",
            good.display(),
            bad.display()
        ));

        let verifier = Verifier::new(cat_source(), VerifierConfig { jobs: 2 });
        let report = verifier.verify_manifest(&manifest).await.unwrap();

        assert_eq!(report.outcomes[0].result, VerificationResult::Ok);
        assert_eq!(
            report.outcomes[1].result,
            VerificationResult::Failed(FailureCause::Mismatch)
        );
        assert_eq!(report.status(), STATUS_FAILED);
    }

    #[test]
    fn test_binary_exit_statuses() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("data");
        std::fs::write(&file, "50696e656170706c65\n").unwrap();

        let bin = env!("CARGO_BIN_EXE_bubblesum");
        let hasher_args = ["--hasher", "sh", "--hasher-arg=-c", "--hasher-arg=cat \"$0\""];

        let hashed = std::process::Command::new(bin)
            .args(hasher_args)
            .arg("hash")
            .arg(&file)
            .output()
            .unwrap();
        assert_eq!(hashed.status.code(), Some(0));
        let line = String::from_utf8(hashed.stdout).unwrap();
        assert!(line.starts_with("xigak-nyryk-humil-bosek-sonax  "));

        let manifest = dir.path().join("SUMS");
        std::fs::write(&manifest, &line).unwrap();
        let checked = std::process::Command::new(bin)
            .args(hasher_args)
            .arg("check")
            .arg(&manifest)
            .output()
            .unwrap();
        assert_eq!(checked.status.code(), Some(0));
        assert!(String::from_utf8(checked.stdout).unwrap().ends_with(": OK\n"));

        std::fs::write(&file, "00\n").unwrap();
        let failed = std::process::Command::new(bin)
            .args(hasher_args)
            .arg("check")
            .arg(&manifest)
            .output()
            .unwrap();
        assert_eq!(failed.status.code(), Some(1));

        let unreadable = std::process::Command::new(bin)
            .arg("check")
            .arg(dir.path().join("no-such-manifest"))
            .output()
            .unwrap();
        assert_eq!(unreadable.status.code(), Some(2));
    }

    fn manifest_with_garbage(dir: &std::path::Path) -> (PathBuf, PathBuf) {
        let file = dir.join("data");
        std::fs::write(&file, "50696e656170706c65\n").unwrap();
        let manifest = dir.join("SUMS");
        std::fs::write(
            &manifest,
            format!(
                "garbage line\nxigak-nyryk-humil-bosek-sonax  {}\n",
                file.display()
            ),
        )
        .unwrap();
        (file, manifest)
    }

    #[test]
    fn test_binary_status_mode_is_silent() {
        let dir = tempfile::TempDir::new().unwrap();
        let (_, manifest) = manifest_with_garbage(dir.path());

        let output = std::process::Command::new(env!("CARGO_BIN_EXE_bubblesum"))
            .env("RUST_LOG", "debug")
            .args(["--hasher", "false", "check", "--status"])
            .arg(&manifest)
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        assert_eq!(String::from_utf8(output.stderr).unwrap(), "");
    }

    #[test]
    fn test_binary_reports_malformed_line_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let (file, manifest) = manifest_with_garbage(dir.path());

        let output = std::process::Command::new(env!("CARGO_BIN_EXE_bubblesum"))
            .env_remove("RUST_LOG")
            .args(["--hasher", "sh", "--hasher-arg=-c", "--hasher-arg=cat \"$0\""])
            .arg("check")
            .arg(&manifest)
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        assert_eq!(
            String::from_utf8(output.stdout).unwrap(),
            format!("{}: OK\n", file.display())
        );

        let stderr = String::from_utf8(output.stderr).unwrap();
        assert_eq!(stderr.matches("line 1").count(), 1, "{}", stderr);
        assert!(stderr.contains("1 line is improperly formatted"));
        assert!(!stderr.contains('\u{1b}'));
    }
}
