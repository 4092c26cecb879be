//! Relationships XML schema structures.
//!
//! Used in `_rels/.rels`, `xl/_rels/workbook.xml.rels`, and other relationship files.

use serde::{Deserialize, Serialize};

use crate::namespaces;

/// Relationships root element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Relationships")]
pub struct Relationships {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "Relationship", default)]
    pub relationships: Vec<Relationship>,
}

/// Individual relationship entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Type")]
    pub rel_type: String,

    #[serde(rename = "@Target")]
    pub target: String,

    #[serde(rename = "@TargetMode", skip_serializing_if = "Option::is_none")]
    pub target_mode: Option<String>,
}

/// Creates the package-level relationships (`_rels/.rels`).
///
/// Contains relationships from the package root to the workbook, core
/// properties, and extended properties parts.
pub fn package_rels() -> Relationships {
    Relationships {
        xmlns: namespaces::PACKAGE_RELATIONSHIPS.to_string(),
        relationships: vec![
            Relationship {
                id: "rId1".to_string(),
                rel_type: rel_types::OFFICE_DOCUMENT.to_string(),
                target: "xl/workbook.xml".to_string(),
                target_mode: None,
            },
            Relationship {
                id: "rId2".to_string(),
                rel_type: rel_types::CORE_PROPERTIES.to_string(),
                target: "docProps/core.xml".to_string(),
                target_mode: None,
            },
            Relationship {
                id: "rId3".to_string(),
                rel_type: rel_types::EXTENDED_PROPERTIES.to_string(),
                target: "docProps/app.xml".to_string(),
                target_mode: None,
            },
        ],
    }
}

/// Creates the workbook-level relationships (`xl/_rels/workbook.xml.rels`).
///
/// One relationship per sheet, aliased to `rId{sheetID}` so the workbook's
/// own `<sheet r:id>` attributes can reuse the sheet ID directly, followed
/// by styles, shared strings, and theme with IDs past the highest sheet ID.
pub fn workbook_rels(sheet_ids: &[u32]) -> Relationships {
    let mut relationships: Vec<Relationship> = sheet_ids
        .iter()
        .map(|id| Relationship {
            id: format!("rId{id}"),
            rel_type: rel_types::WORKSHEET.to_string(),
            target: format!("worksheets/sheet{id}.xml"),
            target_mode: None,
        })
        .collect();

    let next = sheet_ids.iter().copied().max().unwrap_or(0) + 1;
    relationships.push(Relationship {
        id: format!("rId{next}"),
        rel_type: rel_types::STYLES.to_string(),
        target: "styles.xml".to_string(),
        target_mode: None,
    });
    relationships.push(Relationship {
        id: format!("rId{}", next + 1),
        rel_type: rel_types::SHARED_STRINGS.to_string(),
        target: "sharedStrings.xml".to_string(),
        target_mode: None,
    });
    relationships.push(Relationship {
        id: format!("rId{}", next + 2),
        rel_type: rel_types::THEME.to_string(),
        target: "theme/theme1.xml".to_string(),
        target_mode: None,
    });

    Relationships {
        xmlns: namespaces::PACKAGE_RELATIONSHIPS.to_string(),
        relationships,
    }
}

/// Creates a worksheet-level relationships part
/// (`xl/worksheets/_rels/sheet{id}.xml.rels`) for a sheet that owns a
/// drawing. Worksheets with no images have no `.rels` part at all; callers
/// should only invoke this when the sheet has at least one anchored image.
pub fn worksheet_rels(sheet_id: u32) -> Relationships {
    Relationships {
        xmlns: namespaces::PACKAGE_RELATIONSHIPS.to_string(),
        relationships: vec![Relationship {
            id: "rId1".to_string(),
            rel_type: rel_types::DRAWING.to_string(),
            target: format!("../drawings/drawing{sheet_id}.xml"),
            target_mode: None,
        }],
    }
}

/// Creates a drawing-level relationships part
/// (`xl/drawings/_rels/drawing{id}.xml.rels`): one relationship per media
/// target, in the same order the drawing's anchors reference them.
pub fn drawing_rels(media_targets: &[(String, String)]) -> Relationships {
    let relationships = media_targets
        .iter()
        .enumerate()
        .map(|(i, (image_id, extension))| Relationship {
            id: format!("rId{}", i + 1),
            rel_type: rel_types::IMAGE.to_string(),
            target: format!("../media/{image_id}.{extension}"),
            target_mode: None,
        })
        .collect();

    Relationships {
        xmlns: namespaces::PACKAGE_RELATIONSHIPS.to_string(),
        relationships,
    }
}

/// Relationship type URI constants.
pub mod rel_types {
    // Package level
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";

    // Workbook level
    pub const WORKSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
    pub const SHARED_STRINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const CHARTSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chartsheet";
    pub const CALC_CHAIN: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/calcChain";
    pub const EXTERNAL_LINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/externalLink";
    pub const PIVOT_CACHE_DEF: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/pivotCacheDefinition";
    pub const PIVOT_TABLE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/pivotTable";
    pub const PIVOT_CACHE_RECORDS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/pivotCacheRecords";

    // Worksheet level
    pub const COMMENTS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments";
    pub const DRAWING: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing";
    pub const TABLE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/table";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
    pub const PRINTER_SETTINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/printerSettings";

    // Drawing level
    pub const CHART: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

    // Custom properties
    pub const CUSTOM_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/custom-properties";
}
