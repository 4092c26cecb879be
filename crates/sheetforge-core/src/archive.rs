//! Package archiver (C8): assembles built parts into a deflate-compressed
//! `.xlsx` zip archive.
//!
//! Grounded in the teacher's `workbook/io.rs` `save`/`write_zip_contents`
//! (`zip::ZipWriter` + `SimpleFileOptions::default().compression_method(
//! CompressionMethod::Deflated)`, one `start_file`/`write_all` pair per
//! part), generalized to take a flat entry list built by the write pipeline
//! instead of writing straight from `Workbook` fields. Writing to a path
//! goes through a `tempfile::NamedTempFile` in the destination's directory
//! plus an atomic rename rather than `File::create` directly, since a reader
//! must never observe a partially written package and a failed write must
//! never clobber an existing one.

use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::write::WriteOptions;

/// One archive member: its part path (e.g. `xl/workbook.xml`) and bytes.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub path: String,
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    pub fn xml(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            data: body.into().into_bytes(),
        }
    }

    pub fn binary(path: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }
}

fn file_options(options: &WriteOptions) -> SimpleFileOptions {
    let mut opts = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    if let Some(level) = options.compression_level {
        opts = opts.compression_level(Some(level));
    }
    opts
}

fn write_entries<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    entries: &[ArchiveEntry],
    options: &WriteOptions,
) -> Result<()> {
    let opts = file_options(options);
    for entry in entries {
        zip.start_file(&entry.path, opts)
            .map_err(|e| Error::ZipCreation(e.to_string()))?;
        zip.write_all(&entry.data)
            .map_err(|e| Error::FileWrite(e.to_string()))?;
    }
    Ok(())
}

/// Serializes `entries` into an in-memory `.xlsx` buffer.
pub fn write_archive_to_buffer(entries: &[ArchiveEntry], options: &WriteOptions) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut buf));
        write_entries(&mut zip, entries, options)?;
        zip.finish().map_err(|e| Error::ZipCreation(e.to_string()))?;
    }
    Ok(buf)
}

/// Writes `entries` to `dest` as a `.xlsx` package. The archive is built in
/// a temporary file beside `dest` (same directory, so the final rename
/// stays within one filesystem) and only renamed into place once it is
/// complete. The temporary file's name is never surfaced in an error: spec
/// invariants require callers never see an absolute scratch path.
pub fn write_archive(entries: &[ArchiveEntry], dest: &Path, options: &WriteOptions) -> Result<()> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".sheetforge-{}-", uuid::Uuid::new_v4()))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|_| {
            Error::FileWrite(format!(
                "could not create a scratch file next to {}",
                dest.display()
            ))
        })?;

    {
        let mut zip = ZipWriter::new(&mut temp);
        write_entries(&mut zip, entries, options)?;
        zip.finish().map_err(|e| Error::ZipCreation(e.to_string()))?;
    }

    temp.persist(dest).map_err(|_| {
        Error::FileWrite(format!(
            "could not move the finished archive into place at {}",
            dest.display()
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_archive_to_buffer_roundtrips_entries() {
        let entries = vec![
            ArchiveEntry::xml("[Content_Types].xml", "<a/>"),
            ArchiveEntry::binary("xl/media/img1.png", vec![1, 2, 3]),
        ];
        let buf = write_archive_to_buffer(&entries, &WriteOptions::default()).unwrap();
        let mut zip = zip::ZipArchive::new(std::io::Cursor::new(buf)).unwrap();
        assert!(zip.by_name("[Content_Types].xml").is_ok());
        let mut file = zip.by_name("xl/media/img1.png").unwrap();
        let mut out = Vec::new();
        std::io::Read::read_to_end(&mut file, &mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn test_write_archive_atomically_creates_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.xlsx");
        let entries = vec![ArchiveEntry::xml("xl/workbook.xml", "<wb/>")];
        write_archive(&entries, &dest, &WriteOptions::default()).unwrap();
        assert!(dest.exists());
        let remaining: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(remaining.len(), 1, "no leftover scratch file");
    }

    #[test]
    fn test_write_archive_overwrites_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.xlsx");
        std::fs::write(&dest, b"stale").unwrap();
        let entries = vec![ArchiveEntry::xml("xl/workbook.xml", "<wb/>")];
        write_archive(&entries, &dest, &WriteOptions::default()).unwrap();
        let mut zip = zip::ZipArchive::new(std::fs::File::open(&dest).unwrap()).unwrap();
        assert!(zip.by_name("xl/workbook.xml").is_ok());
    }
}
