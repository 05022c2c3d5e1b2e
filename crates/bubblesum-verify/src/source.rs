//! Digest source abstraction.
//!
//! bubblesum never hashes anything itself. A [`DigestSource`] turns a file
//! path into digest bytes; implementations may run an external hasher, look
//! the answer up in memory, or wrap any closure.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bubblesum_core::Digest;
use tokio::process::Command;

use crate::error::DigestSourceError;

/// Result type for digest source operations.
pub type Result<T> = std::result::Result<T, DigestSourceError>;

/// Trait for producing the digest of a file.
///
/// Implementations must be thread-safe (Send + Sync). A call may block for
/// as long as hashing takes; failures are reported per file and never
/// abort a verification run.
#[async_trait]
pub trait DigestSource: Send + Sync {
    /// Compute the digest of the file at `path`.
    async fn digest(&self, path: &Path) -> Result<Digest>;
}

/// Closures run inline on the async runtime and must not block. Wrap
/// closures that read or hash files synchronously in [`BlockingSource`].
#[async_trait]
impl<F> DigestSource for F
where
    F: Fn(&Path) -> Result<Digest> + Send + Sync,
{
    async fn digest(&self, path: &Path) -> Result<Digest> {
        self(path)
    }
}

/// Runs a synchronous digest function on tokio's blocking thread pool.
pub struct BlockingSource<F> {
    f: Arc<F>,
}

impl<F> BlockingSource<F>
where
    F: Fn(&Path) -> Result<Digest> + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f: Arc::new(f) }
    }
}

#[async_trait]
impl<F> DigestSource for BlockingSource<F>
where
    F: Fn(&Path) -> Result<Digest> + Send + Sync + 'static,
{
    async fn digest(&self, path: &Path) -> Result<Digest> {
        let f = Arc::clone(&self.f);
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || f(&path))
            .await
            .map_err(|e| {
                DigestSourceError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
            })?
    }
}

/// Configuration for [`CommandSource`].
#[derive(Debug, Clone)]
pub struct CommandSourceConfig {
    /// Hasher program, looked up on `PATH`.
    pub program: String,
    /// Arguments placed before the file path.
    pub args: Vec<String>,
    /// Kill the hasher if it runs longer than this.
    pub timeout: Option<Duration>,
}

impl Default for CommandSourceConfig {
    fn default() -> Self {
        Self {
            program: "sha256sum".to_string(),
            args: Vec::new(),
            timeout: None,
        }
    }
}

/// Digest source backed by an external `*sum`-style program.
///
/// The program is run as `program [args..] path`; the first
/// whitespace-separated token of its stdout is read as a hex digest.
#[derive(Debug, Clone, Default)]
pub struct CommandSource {
    config: CommandSourceConfig,
}

impl CommandSource {
    /// Create a command source with the given configuration.
    pub fn new(config: CommandSourceConfig) -> Self {
        Self { config }
    }

    /// Shorthand for a program with no extra arguments.
    pub fn program(program: impl Into<String>) -> Self {
        Self::new(CommandSourceConfig {
            program: program.into(),
            ..CommandSourceConfig::default()
        })
    }

    pub fn config(&self) -> &CommandSourceConfig {
        &self.config
    }

    async fn run(&self, path: &Path) -> Result<std::process::Output> {
        let program = &self.config.program;

        // Keep names like "-v" from being read as options
        let arg = if path.as_os_str().to_string_lossy().starts_with('-') {
            Path::new(".").join(path)
        } else {
            path.to_path_buf()
        };

        let mut command = Command::new(program);
        command
            .args(&self.config.args)
            .arg(arg)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, command.output())
                .await
                .map_err(|_| DigestSourceError::Timeout {
                    program: program.clone(),
                    timeout,
                })?,
            None => command.output().await,
        };

        output.map_err(|source| DigestSourceError::Spawn {
            program: program.clone(),
            source,
        })
    }
}

#[async_trait]
impl DigestSource for CommandSource {
    async fn digest(&self, path: &Path) -> Result<Digest> {
        tracing::debug!("Running {} on {}", self.config.program, path.display());

        let output = self.run(path).await?;
        if !output.status.success() {
            return Err(DigestSourceError::CommandFailed {
                program: self.config.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_digest_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Extract the digest from `*sum`-style output (`<hex>  <name>`).
///
/// GNU coreutils prefixes the line with `\` when the filename needed
/// escaping; that prefix is dropped.
pub fn parse_digest_output(stdout: &str) -> Result<Digest> {
    let token = stdout
        .split_whitespace()
        .next()
        .ok_or_else(|| DigestSourceError::InvalidOutput("empty output".into()))?;
    let token = token.strip_prefix('\\').unwrap_or(token);

    Digest::from_hex(token).map_err(|e| DigestSourceError::InvalidOutput(e.to_string()))
}

/// In-memory digest source.
///
/// Primarily for tests and for callers that already hold digests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    digests: HashMap<PathBuf, Digest>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the digest for a path.
    pub fn insert(&mut self, path: impl Into<PathBuf>, digest: impl Into<Digest>) {
        self.digests.insert(path.into(), digest.into());
    }

    /// Builder form of [`MemorySource::insert`].
    pub fn with(mut self, path: impl Into<PathBuf>, digest: impl Into<Digest>) -> Self {
        self.insert(path, digest);
        self
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

#[async_trait]
impl DigestSource for MemorySource {
    async fn digest(&self, path: &Path) -> Result<Digest> {
        self.digests
            .get(path)
            .cloned()
            .ok_or_else(|| DigestSourceError::NotFound(path.to_path_buf()))
    }
}
