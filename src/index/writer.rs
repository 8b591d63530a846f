use crate::index::types::*;
use std::io::{self, Write};

/// Writes index metadata and entry records to any byte sink
pub struct IndexWriter<W: Write> {
    out: W,
    records: usize,
}

impl<W: Write> IndexWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, records: 0 }
    }

    /// Write a `; key=value` metadata line. Must come before any record.
    pub fn write_meta(&mut self, key: &str, value: &str) -> io::Result<()> {
        debug_assert_eq!(self.records, 0, "metadata after records");
        writeln!(self.out, "{}{}{}{}", COMMENT_PREFIX, key, META_SEPARATOR, value)
    }

    pub fn write_entry(&mut self, entry: &FoundDocument) -> io::Result<()> {
        self.out.write_all(format_record(entry).as_bytes())?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// `<T>*<relative-path>*<mime-type>*<charset-name>*\n`
pub fn format_record(entry: &FoundDocument) -> String {
    let prefix = if entry.is_dir { DIR_PREFIX } else { FILE_PREFIX };
    let sep = FIELD_SEPARATOR;
    format!(
        "{prefix}{sep}{}{sep}{}{sep}{}{sep}\n",
        entry.relative_path, entry.file_type.mime_type, entry.file_type.charset_name
    )
}
