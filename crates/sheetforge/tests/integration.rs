use sheetforge::{ExcelImage, PermissiveSecurityPolicy, Workbook, WriteOptions};

#[test]
fn test_new_workbook_has_sheet1() {
    let wb = Workbook::new();
    assert_eq!(wb.sheet_names(), vec!["Sheet1"]);
}

#[test]
fn test_workbook_default_trait() {
    let wb = Workbook::default();
    assert_eq!(wb.sheet_names(), vec!["Sheet1"]);
}

#[test]
fn test_set_cell_through_facade() {
    let mut wb = Workbook::new();
    wb.sheet_mut("Sheet1").unwrap().set_cell("A1", "hi").unwrap();
    assert_eq!(
        wb.sheet("Sheet1").unwrap().cell("A1"),
        Some(&sheetforge::CellValue::String("hi".to_string()))
    );
}

#[test]
fn test_public_api_reexports() {
    let _wb = Workbook::new();
    let _col = sheetforge::utils::column_name_to_number("A").unwrap();
    let _name = sheetforge::utils::column_number_to_name(1).unwrap();
    let _coords = sheetforge::utils::cell_name_to_coordinates("A1").unwrap();
    let _cell = sheetforge::utils::coordinates_to_cell_name(1, 1).unwrap();
}

#[test]
fn test_error_type_accessible() {
    let err = sheetforge::Error::InvalidCellReference("bad".to_string());
    assert!(err.to_string().contains("bad"));
}

#[test]
fn test_add_sheet_through_facade() {
    let mut wb = Workbook::new();
    wb.add_sheet("Sheet2").unwrap();
    assert_eq!(wb.sheet_names(), vec!["Sheet1", "Sheet2"]);
}

fn sample_png() -> Vec<u8> {
    let mut v = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    v.extend_from_slice(&13u32.to_be_bytes());
    v.extend_from_slice(b"IHDR");
    v.extend_from_slice(&10u32.to_be_bytes());
    v.extend_from_slice(&10u32.to_be_bytes());
    v.extend_from_slice(&[8, 6, 0, 0, 0]);
    v
}

#[test]
fn test_write_to_path_produces_readable_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("book.xlsx");

    let mut wb = Workbook::new();
    wb.sheet_mut("Sheet1").unwrap().set_cell("A1", "hello").unwrap();
    wb.sheet_mut("Sheet1").unwrap().set_cell("B1", 42).unwrap();

    sheetforge::write_to_path(&wb, &dest, &PermissiveSecurityPolicy, &WriteOptions::default()).unwrap();

    let file = std::fs::File::open(&dest).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    assert!(zip.by_name("xl/worksheets/sheet1.xml").is_ok());
    assert!(zip.by_name("xl/sharedStrings.xml").is_ok());
}

#[test]
fn test_write_to_buffer_embeds_image_and_drawing() {
    let mut wb = Workbook::new();
    wb.add_image(ExcelImage::from_bytes("logo", sample_png()).unwrap()).unwrap();
    wb.sheet_mut("Sheet1").unwrap().set_image("A1", "logo").unwrap();

    let buf = sheetforge::write_to_buffer(&wb, &PermissiveSecurityPolicy, &WriteOptions::default()).unwrap();
    let mut zip = zip::ZipArchive::new(std::io::Cursor::new(buf)).unwrap();
    assert!(zip.by_name("xl/media/logo.png").is_ok());
    assert!(zip.by_name("xl/drawings/drawing1.xml").is_ok());
}

#[test]
fn test_write_multi_sheet_workbook_keeps_distinct_worksheet_parts() {
    let mut wb = Workbook::new();
    wb.add_sheet("Second").unwrap();
    wb.sheet_mut("Second").unwrap().set_cell("A1", "second sheet").unwrap();

    let buf = sheetforge::write_to_buffer(&wb, &PermissiveSecurityPolicy, &WriteOptions::default()).unwrap();
    let mut zip = zip::ZipArchive::new(std::io::Cursor::new(buf)).unwrap();
    assert!(zip.by_name("xl/worksheets/sheet1.xml").is_ok());
    assert!(zip.by_name("xl/worksheets/sheet2.xml").is_ok());
}
