//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bridgefs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Directory relative paths are resolved against
    /// (default: $BRIDGEFS_BASE_DIR, then the executable's directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a ZIP archive, skipping entries that escape the output directory
    Unzip(ExtractArgs),
    /// Extract a gzip-compressed TAR archive, skipping entries that escape
    /// the output directory
    UntarGz(ExtractArgs),
    /// Decompress a plain gzip file
    Gunzip(GunzipArgs),
    /// Print a file as text or base64
    Read(ReadArgs),
    /// Write a file from an argument or stdin
    Write(WriteArgs),
    /// Move a file or directory
    Mv(TransferArgs),
    /// Copy a file
    Cp(TransferArgs),
    /// Remove a file or directory tree
    Rm(PathArgs),
    /// Create a directory and its parents
    Mkdir(PathArgs),
    /// List a directory
    Ls(PathArgs),
    /// Check whether a path exists
    Exists(PathArgs),
    /// Print the resolved absolute form of a path
    Abspath(PathArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Destination root; nothing is written outside of it
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Do not apply permission bits stored in the archive
    #[arg(long)]
    pub ignore_permissions: bool,
}

#[derive(clap::Args)]
pub struct GunzipArgs {
    /// Path to the gzip file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output file (its parent directory must exist)
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,
}

#[derive(clap::Args)]
pub struct ReadArgs {
    /// File to read
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// IO mode: Text or Binary (base64)
    #[arg(short, long, default_value = "Text")]
    pub mode: String,

    /// Read an absolute path as text, bypassing the base directory
    #[arg(long, conflicts_with = "mode")]
    pub external: bool,
}

#[derive(clap::Args)]
pub struct WriteArgs {
    /// File to write
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Content to write (read from stdin when omitted)
    #[arg(value_name = "CONTENT")]
    pub content: Option<String>,

    /// IO mode: Text or Binary (base64)
    #[arg(short, long, default_value = "Text")]
    pub mode: String,

    /// Write text to an absolute path, bypassing the base directory
    #[arg(long, conflicts_with = "mode")]
    pub external: bool,
}

#[derive(clap::Args)]
pub struct TransferArgs {
    /// Source path
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Target path; missing parent directories are created
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,
}

#[derive(clap::Args)]
pub struct PathArgs {
    /// Path, relative to the base directory unless absolute
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_subcommand_names() {
        let cli = Cli::try_parse_from(["bridgefs", "untar-gz", "a.tar.gz", "out"]).unwrap();
        assert!(matches!(cli.command, Commands::UntarGz(_)));

        let cli = Cli::try_parse_from(["bridgefs", "--json", "ls", "."]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Ls(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["bridgefs", "unzip", "a.zip", "out", "--base-dir", "/srv/app"])
                .unwrap();
        assert_eq!(cli.base_dir, Some(PathBuf::from("/srv/app")));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["bridgefs", "-q", "-v", "ls", "."]).is_err());
    }

    #[test]
    fn test_read_mode_default() {
        let cli = Cli::try_parse_from(["bridgefs", "read", "a.txt"]).unwrap();
        let Commands::Read(args) = cli.command else {
            panic!("expected read");
        };
        assert_eq!(args.mode, "Text");
        assert!(!args.external);
    }
}
