//! Command-line interface definition.

use std::path::PathBuf;
use std::time::Duration;

use bubblesum_verify::{CommandSourceConfig, VerifierConfig};
use clap::{Parser, Subcommand, ValueEnum};

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Report format for `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "bubblesum",
    about = "Compute and check Bubble Babble encoded checksums",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Hasher program; run as `<hasher> [args..] <file>`, must print a hex digest
    #[arg(long, global = true, env = "BUBBLESUM_HASHER", default_value = "sha256sum")]
    pub hasher: String,

    /// Extra argument passed to the hasher before the file (repeatable)
    #[arg(long = "hasher-arg", global = true, allow_hyphen_values = true)]
    pub hasher_args: Vec<String>,

    /// Maximum number of files hashed concurrently
    #[arg(short, long, global = true, env = "BUBBLESUM_JOBS")]
    pub jobs: Option<usize>,

    /// Kill a hasher that runs longer than this many seconds
    #[arg(long, global = true, env = "BUBBLESUM_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print encoded checksums for files, in manifest format
    Hash {
        /// Mark entries as binary mode (`*filename`)
        #[arg(short, long)]
        binary: bool,

        /// Files to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Verify files against a manifest
    Check {
        /// Don't print a line for each file that verifies
        #[arg(short, long)]
        quiet: bool,

        /// Print nothing; the exit status is the only result
        #[arg(long)]
        status: bool,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Manifest to check (`-` for standard input)
        manifest: PathBuf,
    },

    /// Encode a hex digest as Bubble Babble
    Encode {
        /// Hex digest, e.g. the first field of sha256sum output
        hex: String,
    },

    /// Decode a Bubble Babble string to hex, validating its checksum
    Decode {
        /// Encoded string, e.g. xexax
        encoded: String,
    },
}

impl Cli {
    /// Digest source settings derived from the flags.
    pub fn source_config(&self) -> CommandSourceConfig {
        CommandSourceConfig {
            program: self.hasher.clone(),
            args: self.hasher_args.clone(),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }

    /// Verifier settings derived from the flags.
    pub fn verifier_config(&self) -> VerifierConfig {
        match self.jobs {
            Some(jobs) => VerifierConfig { jobs },
            None => VerifierConfig::default(),
        }
    }
}
