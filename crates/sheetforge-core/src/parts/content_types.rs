//! Builds `[Content_Types].xml` (C6).
//!
//! Generalizes `ContentTypes::default()`'s fixed four-sheet template into a
//! dynamic set of overrides/defaults: one worksheet override per sheet, one
//! drawing override per sheet that owns a drawing, and an image-extension
//! default only for formats actually present in the workbook's media list.

use std::collections::BTreeSet;

use sheetforge_xml::content_types::{mime_types, ContentTypeDefault, ContentTypeOverride, ContentTypes};

use crate::workbook::Workbook;

/// Builds the `ContentTypes` part for `workbook`.
///
/// `sheets_with_drawings` lists the sheet IDs that own a `xl/drawings/drawingN.xml`
/// part (i.e. have at least one anchored image), in workbook order.
pub fn build(workbook: &Workbook, sheets_with_drawings: &[u32]) -> ContentTypes {
    let mut defaults = vec![
        ContentTypeDefault {
            extension: "rels".to_string(),
            content_type: mime_types::RELS.to_string(),
        },
        ContentTypeDefault {
            extension: "xml".to_string(),
            content_type: mime_types::XML.to_string(),
        },
    ];

    let mut extensions: BTreeSet<&'static str> = BTreeSet::new();
    for image in workbook.images() {
        extensions.insert(image.format.extension());
    }
    for ext in extensions {
        let content_type = match ext {
            "png" => mime_types::PNG,
            "jpeg" => mime_types::JPEG,
            "gif" => mime_types::GIF,
            other => unreachable!("unsupported image extension {other:?}"),
        };
        defaults.push(ContentTypeDefault {
            extension: ext.to_string(),
            content_type: content_type.to_string(),
        });
    }

    let mut overrides = vec![
        ContentTypeOverride {
            part_name: "/xl/workbook.xml".to_string(),
            content_type: mime_types::WORKBOOK.to_string(),
        },
        ContentTypeOverride {
            part_name: "/xl/styles.xml".to_string(),
            content_type: mime_types::STYLES.to_string(),
        },
        ContentTypeOverride {
            part_name: "/xl/sharedStrings.xml".to_string(),
            content_type: mime_types::SHARED_STRINGS.to_string(),
        },
        ContentTypeOverride {
            part_name: "/xl/theme/theme1.xml".to_string(),
            content_type: mime_types::THEME.to_string(),
        },
        ContentTypeOverride {
            part_name: "/docProps/core.xml".to_string(),
            content_type: mime_types::CORE_PROPERTIES.to_string(),
        },
        ContentTypeOverride {
            part_name: "/docProps/app.xml".to_string(),
            content_type: mime_types::EXTENDED_PROPERTIES.to_string(),
        },
    ];

    for sheet in workbook.sheets() {
        overrides.push(ContentTypeOverride {
            part_name: format!("/xl/worksheets/sheet{}.xml", sheet.id),
            content_type: mime_types::WORKSHEET.to_string(),
        });
    }

    for &sheet_id in sheets_with_drawings {
        overrides.push(ContentTypeOverride {
            part_name: format!("/xl/drawings/drawing{sheet_id}.xml"),
            content_type: mime_types::DRAWING.to_string(),
        });
    }

    ContentTypes {
        xmlns: sheetforge_xml::namespaces::CONTENT_TYPES.to_string(),
        defaults,
        overrides,
    }
}
