//! [Content_Types].xml schema structures.
//!
//! Defines the content types for all parts in the OOXML package.

use serde::{Deserialize, Serialize};

use crate::namespaces;

/// `[Content_Types].xml` root element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Types")]
pub struct ContentTypes {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "Default", default)]
    pub defaults: Vec<ContentTypeDefault>,

    #[serde(rename = "Override", default)]
    pub overrides: Vec<ContentTypeOverride>,
}

/// Extension-based default content type mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeDefault {
    #[serde(rename = "@Extension")]
    pub extension: String,

    #[serde(rename = "@ContentType")]
    pub content_type: String,
}

/// Path-specific content type override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeOverride {
    #[serde(rename = "@PartName")]
    pub part_name: String,

    #[serde(rename = "@ContentType")]
    pub content_type: String,
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self {
            xmlns: namespaces::CONTENT_TYPES.to_string(),
            defaults: vec![
                ContentTypeDefault {
                    extension: "rels".to_string(),
                    content_type: mime_types::RELS.to_string(),
                },
                ContentTypeDefault {
                    extension: "xml".to_string(),
                    content_type: mime_types::XML.to_string(),
                },
            ],
            overrides: vec![
                ContentTypeOverride {
                    part_name: "/xl/workbook.xml".to_string(),
                    content_type: mime_types::WORKBOOK.to_string(),
                },
                ContentTypeOverride {
                    part_name: "/xl/worksheets/sheet1.xml".to_string(),
                    content_type: mime_types::WORKSHEET.to_string(),
                },
                ContentTypeOverride {
                    part_name: "/xl/styles.xml".to_string(),
                    content_type: mime_types::STYLES.to_string(),
                },
                ContentTypeOverride {
                    part_name: "/xl/sharedStrings.xml".to_string(),
                    content_type: mime_types::SHARED_STRINGS.to_string(),
                },
            ],
        }
    }
}

/// Standard content type MIME string constants.
pub mod mime_types {
    // Default extensions
    pub const RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";

    // Workbook
    pub const WORKBOOK: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
    pub const WORKBOOK_MACRO: &str = "application/vnd.ms-excel.sheet.macroEnabled.main+xml";
    pub const WORKBOOK_TEMPLATE: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.template.main+xml";

    // Worksheet
    pub const WORKSHEET: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
    pub const CHARTSHEET: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.chartsheet+xml";

    // Shared elements
    pub const SHARED_STRINGS: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";

    // Charts and drawings
    pub const CHART: &str = "application/vnd.openxmlformats-officedocument.drawingml.chart+xml";
    pub const DRAWING: &str = "application/vnd.openxmlformats-officedocument.drawing+xml";

    // Table
    pub const TABLE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.table+xml";

    // Comments
    pub const COMMENTS: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.comments+xml";

    // Document properties
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
    pub const CUSTOM_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.custom-properties+xml";
}
