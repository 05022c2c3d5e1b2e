//! Verification outcomes and the aggregate report.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Exit status when every entry verified.
pub const STATUS_OK: i32 = 0;

/// Exit status when anything failed, was missing, or was malformed.
pub const STATUS_FAILED: i32 = 1;

/// Why an entry failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    /// The computed encoding differs from the expected one.
    Mismatch,
    /// The digest source could not produce a digest.
    DigestSource(String),
}

/// Verdict for a single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationResult {
    Ok,
    Failed(FailureCause),
    /// The file does not exist or could not be opened.
    Missing(String),
}

impl VerificationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, VerificationResult::Ok)
    }

    /// The status word printed after the filename.
    pub fn label(&self) -> &'static str {
        match self {
            VerificationResult::Ok => "OK",
            VerificationResult::Failed(_) => "FAILED",
            VerificationResult::Missing(_) => "No such file",
        }
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The verdict for one entry, tied back to where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    /// 1-based manifest line.
    pub line: usize,
    pub filename: PathBuf,
    pub result: VerificationResult,
}

impl fmt::Display for EntryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.filename.display(), self.result)
    }
}

/// Result of verifying a manifest.
///
/// Outcomes are always in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub outcomes: Vec<EntryOutcome>,
    /// Number of manifest lines that could not be parsed.
    pub malformed_lines: usize,
}

impl VerificationReport {
    pub fn new(outcomes: Vec<EntryOutcome>) -> Self {
        Self {
            outcomes,
            malformed_lines: 0,
        }
    }

    /// True only if every entry is OK and no line was malformed.
    pub fn passed(&self) -> bool {
        self.malformed_lines == 0 && self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Process exit status: [`STATUS_OK`] or [`STATUS_FAILED`].
    pub fn status(&self) -> i32 {
        if self.passed() {
            STATUS_OK
        } else {
            STATUS_FAILED
        }
    }

    pub fn ok_count(&self) -> usize {
        self.count(|r| r.is_ok())
    }

    /// Entries that hashed but did not match, or whose digest failed.
    pub fn failed_count(&self) -> usize {
        self.count(|r| matches!(r, VerificationResult::Failed(_)))
    }

    /// Entries that failed only because the digest source errored.
    pub fn unreadable_count(&self) -> usize {
        self.count(|r| matches!(r, VerificationResult::Failed(FailureCause::DigestSource(_))))
    }

    pub fn missing_count(&self) -> usize {
        self.count(|r| matches!(r, VerificationResult::Missing(_)))
    }

    /// The per-entry report lines, in manifest order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.outcomes.iter().map(ToString::to_string)
    }

    fn count(&self, pred: impl Fn(&VerificationResult) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.result)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, result: VerificationResult) -> EntryOutcome {
        EntryOutcome {
            line: 1,
            filename: PathBuf::from(name),
            result,
        }
    }

    #[test]
    fn test_outcome_lines() {
        let report = VerificationReport::new(vec![
            outcome("a.txt", VerificationResult::Ok),
            outcome("b.txt", VerificationResult::Failed(FailureCause::Mismatch)),
            outcome("c.txt", VerificationResult::Missing("not found".into())),
        ]);

        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines, vec!["a.txt: OK", "b.txt: FAILED", "c.txt: No such file"]);
    }

    #[test]
    fn test_status() {
        let mut report = VerificationReport::new(vec![outcome("a", VerificationResult::Ok)]);
        assert!(report.passed());
        assert_eq!(report.status(), STATUS_OK);

        report.malformed_lines = 1;
        assert_eq!(report.status(), STATUS_FAILED);
    }

    #[test]
    fn test_empty_report_passes() {
        assert_eq!(VerificationReport::default().status(), STATUS_OK);
    }

    #[test]
    fn test_counts() {
        let report = VerificationReport::new(vec![
            outcome("a", VerificationResult::Ok),
            outcome("b", VerificationResult::Failed(FailureCause::Mismatch)),
            outcome(
                "c",
                VerificationResult::Failed(FailureCause::DigestSource("boom".into())),
            ),
            outcome("d", VerificationResult::Missing("gone".into())),
        ]);
        assert_eq!(report.ok_count(), 1);
        assert_eq!(report.failed_count(), 2);
        assert_eq!(report.unreadable_count(), 1);
        assert_eq!(report.missing_count(), 1);
        assert_eq!(report.status(), STATUS_FAILED);
    }

    #[test]
    fn test_report_json() {
        let report = VerificationReport::new(vec![
            outcome("a", VerificationResult::Ok),
            outcome("b", VerificationResult::Failed(FailureCause::Mismatch)),
        ]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["result"], "ok");
        assert_eq!(json["outcomes"][1]["result"]["failed"], "mismatch");
        assert_eq!(json["malformed_lines"], 0);
    }
}
