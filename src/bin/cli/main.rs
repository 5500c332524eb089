//! CLI tool for zipedit archive operations.

mod commands;
mod exit_codes;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use exit_codes::ExitCode;

/// Transactional zip archive editor
#[derive(Parser)]
#[command(name = "zipedit")]
#[command(author, version, about = "Transactional zip archive editor", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Suppress informational output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the children of a directory in the archive (alias: l)
    #[command(alias = "l")]
    Ls {
        /// Archive file
        archive: PathBuf,

        /// Directory to list (archive root if omitted)
        #[arg(default_value = "")]
        prefix: String,
    },

    /// List every entry in the archive
    Entries {
        /// Archive file
        archive: PathBuf,
    },

    /// Show attributes of an entry, or of the archive itself
    Stat {
        /// Archive file
        archive: PathBuf,

        /// Entry or directory (the archive itself if omitted)
        #[arg(default_value = "")]
        path: String,
    },

    /// Write an entry's content to a file or stdout
    Get {
        /// Archive file
        archive: PathBuf,

        /// Entry to read
        entry: String,

        /// Output file (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Set the output file's modification time from the entry
        #[arg(long, requires = "output")]
        preserve_mtime: bool,
    },

    /// Add or overwrite an entry from a file
    Put {
        /// Archive file
        archive: PathBuf,

        /// Source file ("-" reads stdin)
        file: PathBuf,

        /// Entry name (source file name if omitted)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Pick a free name instead of overwriting an existing entry
        #[arg(short = 'u', long)]
        unique: bool,

        /// Compression level (0-9 or "default")
        #[arg(short = 'l', long, env = "ZIPEDIT_COMPRESSION_LEVEL", default_value = "default")]
        level: String,
    },

    /// Create a directory marker
    Mkdir {
        /// Archive file
        archive: PathBuf,

        /// Directory to create
        path: String,

        /// Compression level (0-9 or "default")
        #[arg(short = 'l', long, env = "ZIPEDIT_COMPRESSION_LEVEL", default_value = "default")]
        level: String,
    },

    /// Delete a single entry
    Rm {
        /// Archive file
        archive: PathBuf,

        /// Entry to delete
        path: String,
    },

    /// Delete a directory and everything under it
    Rmdir {
        /// Archive file
        archive: PathBuf,

        /// Directory to delete
        path: String,
    },

    /// Rename an entry
    Mv {
        /// Archive file
        archive: PathBuf,

        /// Current entry name
        from: String,

        /// New entry name
        to: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Ls { archive, prefix } => commands::ls(&archive, &prefix, cli.format),

        Commands::Entries { archive } => commands::entries(&archive, cli.format),

        Commands::Stat { archive, path } => commands::stat(&archive, &path, cli.format),

        Commands::Get {
            archive,
            entry,
            output,
            preserve_mtime,
        } => commands::get(&archive, &entry, output.as_deref(), preserve_mtime),

        Commands::Put {
            archive,
            file,
            name,
            unique,
            level,
        } => commands::put(&commands::PutConfig {
            archive_path: &archive,
            file: &file,
            name: name.as_deref(),
            unique,
            level: &level,
            format: cli.format,
            quiet: cli.quiet,
        }),

        Commands::Mkdir {
            archive,
            path,
            level,
        } => commands::mkdir(&archive, &path, &level, cli.format, cli.quiet),

        Commands::Rm { archive, path } => commands::rm(&archive, &path, cli.format, cli.quiet),

        Commands::Rmdir { archive, path } => {
            commands::rmdir(&archive, &path, cli.format, cli.quiet)
        }

        Commands::Mv { archive, from, to } => {
            commands::mv(&archive, &from, &to, cli.format, cli.quiet)
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            ExitCode::Success
        }
    };

    std::process::exit(exit_code.code());
}
