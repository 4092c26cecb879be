//! Builds `xl/sharedStrings.xml` (C6).

use crate::sst::SharedStringTable;

use super::with_declaration;

/// Builds the shared-strings part from the table collected during the dedup
/// pass. Always emitted, even with zero entries: spec §6 lists
/// `xl/sharedStrings.xml` unconditionally in the archive's entry set.
pub fn build(table: &SharedStringTable) -> String {
    let sst = table.to_sst();
    let body = quick_xml::se::to_string(&sst).expect("Sst always serializes");
    with_declaration(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_emits_empty_sst_for_empty_table() {
        let table = SharedStringTable::new();
        let xml = build(&table);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"count="0""#));
    }

    #[test]
    fn test_build_with_declaration_for_nonempty_table() {
        let mut table = SharedStringTable::new();
        table.add("hello");
        let xml = build(&table);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("hello"));
    }
}
