//! Command implementations for the CLI tool.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use filetime::FileTime;
use zipedit::archive_path::unique_name;
use zipedit::{CommitResult, CompressionLevel, EditorConfig, Timestamp, ZipEditor};

use crate::OutputFormat;
use crate::exit_codes::{ExitCode, error_to_exit_code};
use crate::output::{ArchiveStat, create_formatter};

/// Configuration for the put command.
pub struct PutConfig<'a> {
    pub archive_path: &'a Path,
    pub file: &'a Path,
    pub name: Option<&'a str>,
    pub unique: bool,
    pub level: &'a str,
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Ls command implementation
pub fn ls(archive_path: &Path, prefix: &str, format: OutputFormat) -> ExitCode {
    let formatter = create_formatter(format);
    let editor = ZipEditor::new(archive_path);
    print!("{}", formatter.format_list(&editor.list(prefix)));
    ExitCode::Success
}

/// Entries command implementation
pub fn entries(archive_path: &Path, format: OutputFormat) -> ExitCode {
    let formatter = create_formatter(format);
    let editor = ZipEditor::new(archive_path);
    print!("{}", formatter.format_list(&editor.entries()));
    ExitCode::Success
}

/// Stat command implementation
pub fn stat(archive_path: &Path, path: &str, format: OutputFormat) -> ExitCode {
    let formatter = create_formatter(format);
    let editor = ZipEditor::new(archive_path);

    if path.is_empty() {
        let metadata = match fs::metadata(archive_path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error: {}: {}", archive_path.display(), e);
                return error_to_exit_code(&e.into());
            }
        };
        let stat = ArchiveStat {
            path: archive_path,
            size: metadata.len(),
            modified: metadata.modified().ok().map(Timestamp::from_system_time),
            entries: editor.entries().len(),
        };
        print!("{}", formatter.format_archive(&stat));
        return ExitCode::Success;
    }

    match editor.lookup(path) {
        Some(entry) => {
            print!("{}", formatter.format_entry(&entry));
            ExitCode::Success
        }
        None => {
            eprintln!("Error: {}: not found", path);
            ExitCode::NotFound
        }
    }
}

/// Get command implementation
pub fn get(
    archive_path: &Path,
    entry_name: &str,
    output: Option<&Path>,
    preserve_mtime: bool,
) -> ExitCode {
    let editor = ZipEditor::new(archive_path);

    let entry = match editor.lookup(entry_name) {
        Some(e) if e.name == entry_name && !e.is_directory => e,
        Some(_) => {
            eprintln!("Error: {}: is a directory", entry_name);
            return ExitCode::BadArgs;
        }
        None => {
            eprintln!("Error: {}: not found", entry_name);
            return ExitCode::NotFound;
        }
    };

    let copied = match output {
        Some(path) => File::create(path)
            .map_err(zipedit::Error::from)
            .and_then(|mut file| editor.copy_entry(entry_name, &mut file)),
        None => {
            let mut stdout = io::stdout().lock();
            editor
                .copy_entry(entry_name, &mut stdout)
                .and_then(|n| stdout.flush().map(|_| n).map_err(Into::into))
        }
    };
    if let Err(e) = copied {
        eprintln!("Error reading {}: {}", entry_name, e);
        return error_to_exit_code(&e);
    }

    if let (true, Some(path), Some(modified)) = (preserve_mtime, output, entry.modified) {
        let mtime = FileTime::from_system_time(modified.as_system_time());
        if let Err(e) = filetime::set_file_mtime(path, mtime) {
            eprintln!("Warning: could not set time on {}: {}", path.display(), e);
            return ExitCode::Warning;
        }
    }

    ExitCode::Success
}

/// Put command implementation
pub fn put(config: &PutConfig<'_>) -> ExitCode {
    let mut editor = match open_editor(config.archive_path, config.level) {
        Ok(e) => e,
        Err(code) => return code,
    };

    let wanted = match config.name {
        Some(name) => name.to_string(),
        None => match config.file.file_name() {
            Some(name) if config.file != Path::new("-") => name.to_string_lossy().into_owned(),
            _ => {
                eprintln!("Error: an entry name is required when reading stdin");
                return ExitCode::BadArgs;
            }
        },
    };
    let name = if config.unique {
        unique_name(&editor.entry_set(), &wanted)
    } else {
        wanted
    };

    let source: Box<dyn Read> = if config.file == Path::new("-") {
        Box::new(io::stdin())
    } else {
        match File::open(config.file) {
            Ok(f) => Box::new(f),
            Err(e) => {
                eprintln!("Error: {}: {}", config.file.display(), e);
                return error_to_exit_code(&e.into());
            }
        }
    };
    editor.add(&name, source);

    let result = match commit(&mut editor, "put", config.format, config.quiet) {
        Ok(r) => r,
        Err(code) => return code,
    };
    if result.added != 1 {
        eprintln!("Error: {}: not created", name);
        return ExitCode::FatalError;
    }
    ExitCode::Success
}

/// Mkdir command implementation
pub fn mkdir(
    archive_path: &Path,
    path: &str,
    level: &str,
    format: OutputFormat,
    quiet: bool,
) -> ExitCode {
    if is_root(path) {
        return ExitCode::Success;
    }
    let mut editor = match open_editor(archive_path, level) {
        Ok(e) => e,
        Err(code) => return code,
    };
    editor.mkdir(path);

    match commit(&mut editor, "mkdir", format, quiet) {
        Ok(result) if result.deleted > 0 => {
            eprintln!("Warning: {}: already exists", path);
            ExitCode::Warning
        }
        Ok(_) => ExitCode::Success,
        Err(code) => code,
    }
}

/// Rm command implementation
pub fn rm(archive_path: &Path, path: &str, format: OutputFormat, quiet: bool) -> ExitCode {
    let mut editor = ZipEditor::new(archive_path);
    editor.delete(path);
    removal_outcome(commit(&mut editor, "rm", format, quiet), path)
}

/// Rmdir command implementation
pub fn rmdir(archive_path: &Path, path: &str, format: OutputFormat, quiet: bool) -> ExitCode {
    if is_root(path) {
        eprintln!("Error: '{}': not found", path);
        return ExitCode::NotFound;
    }
    let mut editor = ZipEditor::new(archive_path);
    editor.rmdir(path);
    removal_outcome(commit(&mut editor, "rmdir", format, quiet), path)
}

/// Mv command implementation
pub fn mv(archive_path: &Path, from: &str, to: &str, format: OutputFormat, quiet: bool) -> ExitCode {
    let mut editor = ZipEditor::new(archive_path);
    editor.rename(from, to);

    match commit(&mut editor, "mv", format, quiet) {
        Ok(result) if result.added == 0 => {
            eprintln!("Error: rename failed: {}: not found", from);
            ExitCode::NotFound
        }
        Ok(_) => ExitCode::Success,
        Err(code) => code,
    }
}

/// The archive root is spelled `""` or `.` on the command line.
fn is_root(path: &str) -> bool {
    path.is_empty() || path == "."
}

fn removal_outcome(outcome: Result<CommitResult, ExitCode>, path: &str) -> ExitCode {
    match outcome {
        Ok(result) if result.deleted == 0 => {
            eprintln!("Error: {}: not found", path);
            ExitCode::NotFound
        }
        Ok(_) => ExitCode::Success,
        Err(code) => code,
    }
}

/// Builds an editor for commands that write new entries.
fn open_editor(archive_path: &Path, level: &str) -> Result<ZipEditor, ExitCode> {
    let level: CompressionLevel = level.parse().map_err(|e: zipedit::Error| {
        eprintln!("Error: {}", e);
        error_to_exit_code(&e)
    })?;
    let config = EditorConfig::new(archive_path).compression_level(level);
    Ok(ZipEditor::from_config(&config))
}

/// Commits pending edits and reports the outcome.
fn commit(
    editor: &mut ZipEditor,
    action: &str,
    format: OutputFormat,
    quiet: bool,
) -> Result<CommitResult, ExitCode> {
    let result = editor.commit().map_err(|e| {
        eprintln!("Error updating {}: {}", editor.path().display(), e);
        error_to_exit_code(&e)
    })?;
    if !quiet {
        print!("{}", create_formatter(format).format_commit(action, &result));
    }
    Ok(result)
}
