//! Builds `docProps/core.xml` and `docProps/app.xml` (C6).
//!
//! Fixed, deterministic values rather than wall-clock timestamps: spec §5's
//! archive determinism requirement (same model, same bytes) rules out
//! stamping the current time on every write.

use sheetforge_xml::doc_props::{serialize_core_properties, CoreProperties, ExtendedProperties};

use super::{with_declaration, XML_DECLARATION};

/// Fixed creation/modification timestamp stamped on every package, matching
/// the teacher's own placeholder epoch for deterministic output.
const FIXED_TIMESTAMP: &str = "2023-01-01T00:00:00Z";

/// Library name used as the document creator/application name.
const APPLICATION_NAME: &str = "sheetforge";

/// Builds `docProps/core.xml`.
pub fn build_core() -> String {
    let props = CoreProperties {
        title: None,
        subject: None,
        creator: Some(APPLICATION_NAME.to_string()),
        keywords: None,
        description: None,
        last_modified_by: Some(APPLICATION_NAME.to_string()),
        revision: None,
        created: Some(FIXED_TIMESTAMP.to_string()),
        modified: Some(FIXED_TIMESTAMP.to_string()),
        category: None,
        content_status: None,
    };
    serialize_core_properties(&props)
}

/// Builds `docProps/app.xml`.
pub fn build_app() -> String {
    let props = ExtendedProperties {
        application: Some(APPLICATION_NAME.to_string()),
        doc_security: Some(0),
        scale_crop: Some(false),
        company: None,
        links_up_to_date: Some(false),
        shared_doc: Some(false),
        hyperlinks_changed: Some(false),
        app_version: None,
        template: None,
        manager: None,
        ..ExtendedProperties::with_defaults()
    };
    let body = quick_xml::se::to_string(&props).expect("ExtendedProperties always serializes");
    with_declaration(&body)
}
