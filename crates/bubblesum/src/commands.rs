//! Command implementations.
//!
//! Each command writes its normal output to `out`, diagnostics to `err`,
//! and returns the process exit status. Keeping the writers injectable lets
//! tests drive commands without spawning the binary.

use std::io::Write;
use std::path::PathBuf;

use bubblesum_core::{Digest, EncodedString};
use bubblesum_verify::{
    format_line, DigestSource, Manifest, VerificationReport, Verifier, STATUS_FAILED, STATUS_OK,
};

use crate::cli::OutputFormat;
use crate::error::Result;

/// Options for [`check`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Suppress lines for entries that verified.
    pub quiet: bool,
    /// Suppress all output.
    pub status: bool,
    pub format: OutputFormat,
}

/// Print a manifest line for every file.
///
/// Files that cannot be hashed are reported on `err` and make the status
/// nonzero; the remaining files are still printed.
pub async fn hash<S, W, E>(
    verifier: &Verifier<S>,
    files: &[PathBuf],
    binary: bool,
    out: &mut W,
    err: &mut E,
) -> Result<i32>
where
    S: DigestSource,
    W: Write,
    E: Write,
{
    let mut status = STATUS_OK;

    for outcome in verifier.hash(files).await {
        match outcome.result {
            Ok(encoded) => writeln!(out, "{}", format_line(&encoded, &outcome.path, binary))?,
            Err(e) => {
                writeln!(err, "bubblesum: {}: {}", outcome.path.display(), e)?;
                status = STATUS_FAILED;
            }
        }
    }

    Ok(status)
}

/// Verify a parsed manifest and print the report.
pub async fn check<S, W, E>(
    verifier: &Verifier<S>,
    manifest: &Manifest,
    options: CheckOptions,
    out: &mut W,
    err: &mut E,
) -> Result<i32>
where
    S: DigestSource,
    W: Write,
    E: Write,
{
    if !options.status {
        for e in &manifest.errors {
            writeln!(err, "bubblesum: {}", e)?;
        }
    }

    let report = match verifier.verify_manifest(manifest).await {
        Ok(report) => report,
        Err(e) => {
            if !options.status {
                writeln!(err, "bubblesum: {}", e)?;
            }
            return Ok(STATUS_FAILED);
        }
    };

    if options.status {
        return Ok(report.status());
    }

    match options.format {
        OutputFormat::Text => {
            for outcome in &report.outcomes {
                if options.quiet && outcome.result.is_ok() {
                    continue;
                }
                writeln!(out, "{}", outcome)?;
            }
            write_warnings(&report, err)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(report.status())
}

/// Summary lines in the style of `sha256sum --check`.
fn write_warnings<E: Write>(report: &VerificationReport, err: &mut E) -> Result<()> {
    let unreadable = report.missing_count() + report.unreadable_count();
    let mismatched = report.failed_count() - report.unreadable_count();

    if report.malformed_lines > 0 {
        writeln!(
            err,
            "bubblesum: WARNING: {} {} improperly formatted",
            report.malformed_lines,
            plural(report.malformed_lines, "line is", "lines are")
        )?;
    }
    if unreadable > 0 {
        writeln!(
            err,
            "bubblesum: WARNING: {} listed {} could not be read",
            unreadable,
            plural(unreadable, "file", "files")
        )?;
    }
    if mismatched > 0 {
        writeln!(
            err,
            "bubblesum: WARNING: {} computed {} did NOT match",
            mismatched,
            plural(mismatched, "checksum", "checksums")
        )?;
    }

    Ok(())
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// Encode a hex digest.
pub fn encode<W: Write>(hex: &str, out: &mut W) -> Result<i32> {
    let digest = Digest::from_hex(hex)?;
    writeln!(out, "{}", digest.to_babble())?;
    Ok(STATUS_OK)
}

/// Decode a Bubble Babble string to hex.
pub fn decode<W: Write>(encoded: &str, out: &mut W) -> Result<i32> {
    let digest = EncodedString::parse(encoded.trim())?.to_digest()?;
    writeln!(out, "{}", digest.to_hex())?;
    Ok(STATUS_OK)
}
