//! Write pipeline orchestrator: the six-phase control flow that turns a
//! [`Workbook`] into an archived `.xlsx` package.
//!
//! Phases, per spec:
//! 1. collect dedup tables ([`StyleTable`], [`SharedStringTable`],
//!    [`NumberFormatTable`]) by walking every sheet's used cells;
//! 2. emit static parts (content types, docProps, theme);
//! 3. emit styles and shared strings from the dedup output;
//! 4. emit workbook, worksheets, drawings, media;
//! 5. emit every relationship part;
//! 6. archive.
//!
//! Drawing geometry mutates a sheet's column widths and row heights in
//! place (`parts::drawing::build`), so phase 4 runs against private clones
//! of the workbook's sheets rather than the originals.

use std::path::Path;

use sheetforge_xml::relationships::{drawing_rels, package_rels, worksheet_rels, workbook_rels};

use crate::archive::{write_archive, write_archive_to_buffer, ArchiveEntry};
use crate::cell::CellValue;
use crate::error::{Error, Result};
use crate::numfmt::NumberFormatTable;
use crate::parts;
use crate::security::{ImageVerdict, SecurityPolicy};
use crate::sheet::Sheet;
use crate::sst::SharedStringTable;
use crate::style_table::StyleTable;
use crate::workbook::Workbook;

/// Options controlling how a workbook is archived. `Default` mirrors the
/// teacher's own `SimpleFileOptions::default()` deflate behavior: no
/// explicit compression level override.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Deflate compression level, 0-9. `None` uses the `zip` crate's default.
    pub compression_level: Option<i64>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression_level: None,
        }
    }
}

/// Writes `workbook` to `path` as a `.xlsx` package.
///
/// `policy` is consulted before any part is built (rate limit, destination
/// path, then each image payload) so a veto never leaves a partial file
/// behind; the destination is replaced atomically on success.
pub fn write_to_path(
    workbook: &Workbook,
    path: impl AsRef<Path>,
    policy: &dyn SecurityPolicy,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    policy.check_rate_limit()?;
    policy.validate_file_path(path)?;

    let entries = build_entries(workbook, policy)?;
    write_archive(&entries, path, options)?;
    policy.log(
        "workbook_written",
        &[("entries", &entries.len().to_string())],
    );
    Ok(())
}

/// Serializes `workbook` into an in-memory `.xlsx` buffer. Skips the
/// destination-path hook, which only applies to on-disk writes.
pub fn write_to_buffer(
    workbook: &Workbook,
    policy: &dyn SecurityPolicy,
    options: &WriteOptions,
) -> Result<Vec<u8>> {
    policy.check_rate_limit()?;
    let entries = build_entries(workbook, policy)?;
    let buf = write_archive_to_buffer(&entries, options)?;
    policy.log(
        "workbook_written",
        &[("entries", &entries.len().to_string())],
    );
    Ok(buf)
}

fn build_entries(workbook: &Workbook, policy: &dyn SecurityPolicy) -> Result<Vec<ArchiveEntry>> {
    // Images are scanned before anything else is built: a quarantine veto
    // must never leave behind a partially assembled part set.
    for image in workbook.images() {
        if let ImageVerdict::Quarantine(reason) = policy.validate_image_bytes(&image.data, image.format) {
            return Err(Error::SuspiciousFile(reason));
        }
    }

    // Phase 1: dedup tables, collected by walking every sheet's used cells.
    let mut sst = SharedStringTable::new();
    let mut styles = StyleTable::new();
    let mut num_fmts = NumberFormatTable::new();
    for sheet in workbook.sheets() {
        for (_, address) in sheet.used_addresses_sorted() {
            if let Some(CellValue::String(s)) = sheet.cell(&address) {
                sst.add(s);
            }
            if let Some(format) = sheet.format(&address) {
                styles.register(format);
                if let Some(num_fmt) = &format.number_format {
                    num_fmts.resolve(num_fmt);
                }
            }
        }
    }

    // Phase 4 prep: drawings mutate a sheet's column widths and row
    // heights, so this runs against clones before the worksheet XML (which
    // reads those widths/heights back out) is built.
    let mut sheets: Vec<Sheet> = workbook.sheets().to_vec();
    let mut sheets_with_drawings: Vec<u32> = Vec::new();
    let mut drawing_xml: Vec<(u32, String)> = Vec::new();
    for sheet in &mut sheets {
        if let Some(xml) = parts::drawing::build(sheet, workbook)? {
            sheets_with_drawings.push(sheet.id);
            drawing_xml.push((sheet.id, xml));
        }
    }

    let mut entries = Vec::new();

    // Phase 2: static parts.
    let content_types = parts::content_types::build(workbook, &sheets_with_drawings);
    entries.push(ArchiveEntry::xml(
        "[Content_Types].xml",
        serialize_part(&content_types),
    ));
    entries.push(ArchiveEntry::xml("docProps/core.xml", parts::doc_props::build_core()));
    entries.push(ArchiveEntry::xml("docProps/app.xml", parts::doc_props::build_app()));
    entries.push(ArchiveEntry::xml("xl/theme/theme1.xml", parts::theme::build()));

    // Phase 4: workbook, worksheets, drawings.
    entries.push(ArchiveEntry::xml("xl/workbook.xml", parts::workbook::build(workbook)));
    for sheet in &sheets {
        let has_drawing = sheets_with_drawings.contains(&sheet.id);
        let xml = parts::worksheet::build(sheet, &mut styles, &mut sst, has_drawing);
        entries.push(ArchiveEntry::xml(format!("xl/worksheets/sheet{}.xml", sheet.id), xml));
    }
    for (sheet_id, xml) in &drawing_xml {
        entries.push(ArchiveEntry::xml(
            format!("xl/drawings/drawing{sheet_id}.xml"),
            xml.clone(),
        ));
    }

    // Phase 3: styles/sharedStrings, emitted after worksheet building since
    // the worksheet pass only resolves IDs the dedup walk already assigned
    // (both `StyleTable::register` and `SharedStringTable::add` are
    // dedup-idempotent, so no new entries are introduced at this point).
    entries.push(ArchiveEntry::xml("xl/styles.xml", parts::styles::build(&styles, &num_fmts)));
    entries.push(ArchiveEntry::xml("xl/sharedStrings.xml", parts::shared_strings::build(&sst)));

    // Phase 4 (media): one part per registered image.
    for image in workbook.images() {
        entries.push(ArchiveEntry::binary(
            format!("xl/media/{}.{}", image.id, image.format.extension()),
            image.data.clone(),
        ));
    }

    // Phase 5: relationships.
    entries.push(ArchiveEntry::xml("_rels/.rels", serialize_part(&package_rels())));
    let sheet_ids: Vec<u32> = sheets.iter().map(|s| s.id).collect();
    entries.push(ArchiveEntry::xml(
        "xl/_rels/workbook.xml.rels",
        serialize_part(&workbook_rels(&sheet_ids)),
    ));
    for sheet in &sheets {
        if !sheets_with_drawings.contains(&sheet.id) {
            continue;
        }
        entries.push(ArchiveEntry::xml(
            format!("xl/worksheets/_rels/sheet{}.xml.rels", sheet.id),
            serialize_part(&worksheet_rels(sheet.id)),
        ));
        let media_targets: Vec<(String, String)> = sheet
            .images_in_order()
            .iter()
            .filter_map(|(_, image_id)| {
                workbook
                    .image(image_id)
                    .map(|image| (image_id.clone(), image.format.extension().to_string()))
            })
            .collect();
        entries.push(ArchiveEntry::xml(
            format!("xl/drawings/_rels/drawing{}.xml.rels", sheet.id),
            serialize_part(&drawing_rels(&media_targets)),
        ));
    }

    Ok(entries)
}

fn serialize_part<T: serde::Serialize>(value: &T) -> String {
    let body = quick_xml::se::to_string(value).expect("relationship/content-type parts always serialize");
    parts::with_declaration(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ExcelImage;
    use crate::security::PermissiveSecurityPolicy;

    fn sample_png() -> Vec<u8> {
        let mut v = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        v.extend_from_slice(&13u32.to_be_bytes());
        v.extend_from_slice(b"IHDR");
        v.extend_from_slice(&10u32.to_be_bytes());
        v.extend_from_slice(&10u32.to_be_bytes());
        v.extend_from_slice(&[8, 6, 0, 0, 0]);
        v
    }

    fn zip_entries(buf: &[u8]) -> Vec<String> {
        let mut zip = zip::ZipArchive::new(std::io::Cursor::new(buf)).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_write_to_buffer_minimal_workbook_has_required_parts() {
        let workbook = Workbook::new();
        let buf = write_to_buffer(&workbook, &PermissiveSecurityPolicy, &WriteOptions::default()).unwrap();
        let names = zip_entries(&buf);
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/app.xml",
            "docProps/core.xml",
            "xl/workbook.xml",
            "xl/styles.xml",
            "xl/sharedStrings.xml",
            "xl/theme/theme1.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
        assert!(!names.iter().any(|n| n.contains("drawing")));
    }

    #[test]
    fn test_write_to_buffer_sheet_with_image_emits_drawing_chain() {
        let mut workbook = Workbook::new();
        workbook.add_image(ExcelImage::from_bytes("img1", sample_png()).unwrap()).unwrap();
        workbook.sheet_mut("Sheet1").unwrap().set_image("A1", "img1").unwrap();

        let buf = write_to_buffer(&workbook, &PermissiveSecurityPolicy, &WriteOptions::default()).unwrap();
        let names = zip_entries(&buf);
        for expected in [
            "xl/drawings/drawing1.xml",
            "xl/worksheets/_rels/sheet1.xml.rels",
            "xl/drawings/_rels/drawing1.xml.rels",
            "xl/media/img1.png",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_write_to_buffer_quarantined_image_errors() {
        struct AlwaysQuarantine;
        impl SecurityPolicy for AlwaysQuarantine {
            fn check_rate_limit(&self) -> Result<()> {
                Ok(())
            }
            fn validate_file_path(&self, _path: &std::path::Path) -> Result<()> {
                Ok(())
            }
            fn validate_image_bytes(&self, _bytes: &[u8], _format: crate::image::ImageFormat) -> ImageVerdict {
                ImageVerdict::Quarantine("test veto".to_string())
            }
        }

        let mut workbook = Workbook::new();
        workbook.add_image(ExcelImage::from_bytes("img1", sample_png()).unwrap()).unwrap();

        let err = write_to_buffer(&workbook, &AlwaysQuarantine, &WriteOptions::default()).unwrap_err();
        assert!(matches!(err, Error::SuspiciousFile(_)));
    }

    #[test]
    fn test_write_to_path_creates_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("book.xlsx");
        let workbook = Workbook::new();
        write_to_path(&workbook, &dest, &PermissiveSecurityPolicy, &WriteOptions::default()).unwrap();
        assert!(dest.exists());
    }

    #[test]
    fn test_write_to_path_rate_limit_vetoes_before_any_file_created() {
        use crate::security::StandardSecurityPolicy;
        use std::time::Duration;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("book.xlsx");
        let policy = StandardSecurityPolicy::with_rate_limit(0, Duration::from_secs(60));
        let workbook = Workbook::new();
        let err = write_to_path(&workbook, &dest, &policy, &WriteOptions::default()).unwrap_err();
        assert!(matches!(err, Error::RateLimit(_)));
        assert!(!dest.exists());
    }
}
