//! XML part builders (C6): populate `sheetforge-xml` schema structs from the
//! in-memory [`crate::workbook::Workbook`] model and the C5 dedup tables,
//! then serialize with `quick_xml::se::to_string`.
//!
//! One builder module per OOXML part, matching spec §4.6's ordering. Parts
//! that `quick-xml`'s serializer does not self-emit a declaration for need
//! [`XML_DECLARATION`] manually prepended.

pub mod content_types;
pub mod doc_props;
pub mod drawing;
pub mod shared_strings;
pub mod styles;
pub mod theme;
pub mod workbook;
pub mod worksheet;

/// Standard OOXML part declaration, manually prepended to parts whose
/// schema struct does not already emit one via a custom writer.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Prepends [`XML_DECLARATION`] to a serialized XML body with a newline
/// separator, matching the teacher's `stream.rs` convention.
pub fn with_declaration(body: &str) -> String {
    format!("{XML_DECLARATION}\n{body}")
}
