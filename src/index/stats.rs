use crate::error::{Result, SearchError};
use crate::index::reader::IndexReader;
use crate::index::types::IndexMeta;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;

/// Record counts of one index file
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub meta: IndexMeta,
    pub files: usize,
    pub dirs: usize,
    pub text_files: usize,
    /// Files per MIME type; files of unknown type are counted under `""`
    pub by_mime: BTreeMap<String, usize>,
    pub size_bytes: u64,
}

impl IndexStats {
    pub fn collect(index_path: &Path) -> Result<Self> {
        let mut reader = IndexReader::open(index_path)?;
        let mut stats = IndexStats {
            meta: reader.read_meta()?,
            ..Default::default()
        };

        for entry in reader {
            let entry = entry?;
            if entry.is_dir {
                stats.dirs += 1;
                continue;
            }
            stats.files += 1;
            if entry.file_type.is_readable_text() {
                stats.text_files += 1;
            }
            *stats.by_mime.entry(entry.file_type.mime_type).or_insert(0) += 1;
        }

        stats.size_bytes = std::fs::metadata(index_path)
            .map_err(|e| SearchError::io(index_path, e))?
            .len();
        Ok(stats)
    }
}

/// Display index statistics
pub fn show_stats(index_path: &Path) -> Result<()> {
    let stats = IndexStats::collect(index_path)?;

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Index location:   {}", index_path.display());
    println!(
        "Source path:      {}",
        stats.meta.source_path().unwrap_or("(not recorded)")
    );
    if let Some(version) = stats.meta.version() {
        println!("Index version:    {}", version);
    }
    println!("Files:            {}", stats.files);
    println!("  text:           {}", stats.text_files);
    println!("Directories:      {}", stats.dirs);

    println!();
    println!("Files by type:");
    let mut sorted: Vec<_> = stats.by_mime.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1));
    for (mime, count) in sorted.iter().take(15) {
        let label = if mime.is_empty() { "(unknown)" } else { mime.as_str() };
        println!("  {:24} {}", label, count);
    }
    if sorted.len() > 15 {
        println!("  ... and {} more", sorted.len() - 15);
    }

    println!();
    println!("Index size:       {}", format_size(stats.size_bytes));
    if let Some(created) = stats.meta.created_at() {
        println!("Created:          {}", format_timestamp(created));
    }

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format unix seconds as a UTC date, falling back to the raw number
fn format_timestamp(ts: u64) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}
