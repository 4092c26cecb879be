//! Builds `xl/workbook.xml` (C6), per spec §4.6.

use sheetforge_xml::workbook::{CalcPr, SheetEntry, Sheets, WorkbookXml};

use crate::workbook::Workbook;

use super::with_declaration;

/// Builds the workbook part: one `<sheet>` per sheet with
/// `r:id="rId{sheetID}"`, plus `calcPr fullCalcOnLoad="true"`.
pub fn build(workbook: &Workbook) -> String {
    let sheets = workbook
        .sheets()
        .iter()
        .map(|sheet| SheetEntry {
            name: sheet.name.clone(),
            sheet_id: sheet.id,
            state: None,
            r_id: format!("rId{}", sheet.id),
        })
        .collect();

    let wb = WorkbookXml {
        xmlns: sheetforge_xml::namespaces::SPREADSHEET_ML.to_string(),
        xmlns_r: sheetforge_xml::namespaces::RELATIONSHIPS.to_string(),
        workbook_pr: None,
        sheets: Sheets { sheets },
        calc_pr: Some(CalcPr {
            calc_id: None,
            calc_mode: None,
            full_calc_on_load: Some(true),
        }),
    };

    let body = quick_xml::se::to_string(&wb).expect("WorkbookXml always serializes");
    with_declaration(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_single_sheet_rid_matches_sheet_id() {
        let wb = Workbook::new();
        let xml = build(&wb);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"name="Sheet1""#));
        assert!(xml.contains(r#"sheetId="1""#));
        assert!(xml.contains(r#"r:id="rId1""#));
        assert!(xml.contains(r#"fullCalcOnLoad="true""#));
    }

    #[test]
    fn test_build_multiple_sheets_preserve_order_and_ids() {
        let mut wb = Workbook::new();
        wb.add_sheet("Second").unwrap();
        let xml = build(&wb);
        assert!(xml.contains(r#"name="Sheet1" sheetId="1" r:id="rId1""#));
        assert!(xml.contains(r#"name="Second" sheetId="2" r:id="rId2""#));
    }
}
