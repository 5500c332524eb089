//! Output formatting for CLI operations.

use std::path::Path;

use serde_json::json;
use zipedit::{CommitResult, Entry, Timestamp};

/// Attributes of the archive file itself.
pub struct ArchiveStat<'a> {
    pub path: &'a Path,
    pub size: u64,
    pub modified: Option<Timestamp>,
    pub entries: usize,
}

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats a list of entries
    fn format_list(&self, entries: &[Entry]) -> String;

    /// Formats a single entry's attributes
    fn format_entry(&self, entry: &Entry) -> String;

    /// Formats the archive file's attributes
    fn format_archive(&self, stat: &ArchiveStat<'_>) -> String;

    /// Formats the outcome of a commit
    fn format_commit(&self, action: &str, result: &CommitResult) -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_list(&self, entries: &[Entry]) -> String {
        let mut output = String::new();

        output.push_str(&format!("{:>12} {:>19} {}\n", "Size", "Modified", "Name"));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        let mut total_size: u64 = 0;
        let mut file_count = 0;
        let mut dir_count = 0;

        for entry in entries {
            let size_str = if entry.is_directory {
                dir_count += 1;
                String::new()
            } else {
                file_count += 1;
                total_size += entry.size;
                humanize_bytes(entry.size)
            };

            output.push_str(&format!(
                "{:>12} {:>19} {}\n",
                size_str,
                format_modified(entry.modified),
                entry.name
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{} files, {} directories, {} total\n",
            file_count,
            dir_count,
            humanize_bytes(total_size)
        ));

        output
    }

    fn format_entry(&self, entry: &Entry) -> String {
        let mut output = String::new();
        output.push_str(&format!("  Name:        {}\n", entry.name));
        output.push_str(&format!(
            "  Type:        {}\n",
            match (entry.is_directory, entry.is_synthesized) {
                (true, true) => "directory (implied)",
                (true, false) => "directory",
                (false, _) => "file",
            }
        ));
        if !entry.is_directory {
            output.push_str(&format!(
                "  Size:        {} ({} bytes)\n",
                humanize_bytes(entry.size),
                entry.size
            ));
            output.push_str(&format!(
                "  Packed:      {}\n",
                humanize_bytes(entry.compressed_size)
            ));
            output.push_str(&format!("  CRC32:       {:08X}\n", entry.crc32));
        }
        output.push_str(&format!(
            "  Modified:    {}\n",
            format_modified(entry.modified)
        ));
        output
    }

    fn format_archive(&self, stat: &ArchiveStat<'_>) -> String {
        let mut output = String::new();
        output.push_str(&format!("  Archive:     {}\n", stat.path.display()));
        output.push_str(&format!(
            "  Size:        {} ({} bytes)\n",
            humanize_bytes(stat.size),
            stat.size
        ));
        output.push_str(&format!("  Entries:     {}\n", stat.entries));
        output.push_str(&format!(
            "  Modified:    {}\n",
            format_modified(stat.modified)
        ));
        output
    }

    fn format_commit(&self, action: &str, result: &CommitResult) -> String {
        if result.is_noop() {
            format!("{action}: no changes\n")
        } else {
            format!("{action}: {result}\n")
        }
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl JsonFormatter {
    fn entry_json(entry: &Entry) -> serde_json::Value {
        json!({
            "name": entry.name,
            "size": entry.size,
            "compressed_size": entry.compressed_size,
            "crc32": entry.crc32,
            "modified": entry.modified.map(|t| t.as_unix_secs()),
            "is_directory": entry.is_directory,
            "is_synthesized": entry.is_synthesized,
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_list(&self, entries: &[Entry]) -> String {
        let items: Vec<_> = entries.iter().map(Self::entry_json).collect();
        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_entry(&self, entry: &Entry) -> String {
        serde_json::to_string_pretty(&Self::entry_json(entry)).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_archive(&self, stat: &ArchiveStat<'_>) -> String {
        let obj = json!({
            "archive": stat.path.display().to_string(),
            "size": stat.size,
            "entries": stat.entries,
            "modified": stat.modified.map(|t| t.as_unix_secs()),
        });
        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_commit(&self, action: &str, result: &CommitResult) -> String {
        let obj = json!({
            "action": action,
            "kept": result.kept,
            "added": result.added,
            "deleted": result.deleted,
            "changed": !result.is_noop(),
        });
        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Converts bytes to a human-readable string
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn format_modified(modified: Option<Timestamp>) -> String {
    modified
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string())
}
