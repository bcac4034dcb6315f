use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filesweep")]
#[command(author, version, about = "File housekeeping toolkit")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every matching audio file under a directory tree
    Convert {
        /// Directory to search for source files
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for converted output
        #[arg(short, long)]
        output: PathBuf,

        /// Target format (sources with the opposite format are converted)
        #[arg(long, value_enum)]
        to: TargetFormat,

        /// Override the configured trash directory
        #[arg(long)]
        trash_dir: Option<PathBuf>,
    },

    /// Move a directory's files into category folders by extension
    Organize {
        /// Directory to organize
        #[arg(required = true)]
        dir: PathBuf,
    },

    /// Archive a directory into a timestamped .tar.gz
    Backup {
        /// Directory to back up
        source: PathBuf,

        /// Directory the archive is written into
        dest: PathBuf,
    },

    /// Report disk usage of a directory's children
    Usage {
        /// Directory to analyze
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// XOR a file in place with a password-derived key (self-inverse)
    Obfuscate {
        /// File to rewrite
        file: PathBuf,

        /// Password the key is derived from
        #[arg(short, long)]
        password: String,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetFormat {
    Wav,
    Flac,
}
