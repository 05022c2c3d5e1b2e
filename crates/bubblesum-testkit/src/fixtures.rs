//! Test fixtures and helpers.
//!
//! [`ManifestFixture`] builds a directory of real files, a [`MemorySource`]
//! that knows their digests, and the manifest text describing them.

use std::path::{Path, PathBuf};

use bubblesum_core::Digest;
use bubblesum_verify::{format_line, MemorySource, Verifier, VerifierConfig};
use tempfile::TempDir;

/// A temporary directory with files, their digests, and a manifest.
pub struct ManifestFixture {
    pub dir: TempDir,
    pub source: MemorySource,
    lines: Vec<String>,
}

impl ManifestFixture {
    /// Create an empty fixture in a fresh temporary directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
            source: MemorySource::new(),
            lines: Vec::new(),
        }
    }

    /// Path of `name` inside the fixture directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Add a file whose manifest entry matches its digest.
    pub fn add_matching(&mut self, name: &str, digest: impl Into<Digest>) -> PathBuf {
        let digest = digest.into();
        let path = self.write_file(name);
        self.push_line(&digest, &path, false);
        self.source.insert(path.clone(), digest);
        path
    }

    /// Add a file whose manifest entry expects `expected` but which hashes
    /// to `actual`.
    pub fn add_mismatched(
        &mut self,
        name: &str,
        expected: impl Into<Digest>,
        actual: impl Into<Digest>,
    ) -> PathBuf {
        let path = self.write_file(name);
        self.push_line(&expected.into(), &path, false);
        self.source.insert(path.clone(), actual);
        path
    }

    /// Add a manifest entry for a file that does not exist.
    pub fn add_missing(&mut self, name: &str, expected: impl Into<Digest>) -> PathBuf {
        let path = self.path(name);
        self.push_line(&expected.into(), &path, false);
        path
    }

    /// Add a binary-mode (`*name`) entry that matches.
    pub fn add_binary(&mut self, name: &str, digest: impl Into<Digest>) -> PathBuf {
        let digest = digest.into();
        let path = self.write_file(name);
        self.push_line(&digest, &path, true);
        self.source.insert(path.clone(), digest);
        path
    }

    /// Add a raw line to the manifest, e.g. a malformed one.
    pub fn add_raw_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Manifest text, one entry per line.
    pub fn manifest_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Write the manifest into the fixture directory and return its path.
    pub fn write_manifest(&self) -> PathBuf {
        let path = self.path("MANIFEST.bubble");
        std::fs::write(&path, self.manifest_text()).expect("write manifest");
        path
    }

    /// A verifier over the fixture's digests.
    pub fn verifier(&self, jobs: usize) -> Verifier<MemorySource> {
        Verifier::new(self.source.clone(), VerifierConfig { jobs })
    }

    fn write_file(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, name.as_bytes()).expect("write fixture file");
        path
    }

    fn push_line(&mut self, digest: &Digest, path: &Path, binary: bool) {
        self.lines
            .push(format_line(&digest.to_babble(), path, binary));
    }
}

impl Default for ManifestFixture {
    fn default() -> Self {
        Self::new()
    }
}
