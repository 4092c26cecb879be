//! Builds `xl/theme/theme1.xml` (C6).
//!
//! Every package gets the single canonical Office theme; per-workbook theme
//! customization is out of scope (spec §4.6).

/// Builds the theme part.
pub fn build() -> String {
    sheetforge_xml::theme::default_theme_xml()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_stable_and_well_formed() {
        let xml = build();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<a:theme"));
        assert_eq!(build(), build());
    }
}
