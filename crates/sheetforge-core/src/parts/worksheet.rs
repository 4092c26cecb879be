//! Builds `xl/worksheets/sheet{N}.xml` (C6), per spec §4.5-§4.6's exact
//! per-cell-type conversion table.

use sheetforge_xml::worksheet::{
    cell_types, Cell, CellFormula, Col, Cols, Dimension, DrawingRef, MergeCell, MergeCells,
    PageMargins, Row, Selection, SheetData, SheetFormatPr, SheetView, SheetViews, WorksheetXml,
};

use crate::cell::CellValue;
use crate::format::CellFormat;
use crate::geometry::{PIXELS_PER_COLUMN_UNIT, PIXELS_PER_ROW_UNIT};
use crate::sheet::{CellCoordinate, Sheet};
use crate::sst::SharedStringTable;
use crate::style_table::StyleTable;
use crate::utils::constants::DEFAULT_ROW_HEIGHT;

use super::with_declaration;

/// Builds the worksheet part. `styles`/`sst` must already hold every format
/// and string the dedup pass collected; registering/adding here only
/// resolves the IDs already assigned (both operations are dedup-idempotent).
/// `has_drawing` gates the trailing `<drawing r:id="rId1"/>` reference.
pub fn build(
    sheet: &Sheet,
    styles: &mut StyleTable,
    sst: &mut SharedStringTable,
    has_drawing: bool,
) -> String {
    let dimension = sheet
        .dimension()
        .ok()
        .and_then(|range| range.to_a1().ok())
        .map(|reference| Dimension { reference });

    let sheet_views = Some(SheetViews {
        sheet_views: vec![SheetView {
            tab_selected: Some(true),
            zoom_scale: None,
            workbook_view_id: 0,
            selection: Vec::<Selection>::new(),
        }],
    });

    let sheet_format_pr = Some(SheetFormatPr {
        default_row_height: DEFAULT_ROW_HEIGHT,
        default_col_width: None,
    });

    let cols = build_cols(sheet);
    let sheet_data = build_sheet_data(sheet, styles, sst);

    let page_margins = Some(PageMargins {
        left: 0.7,
        right: 0.7,
        top: 0.75,
        bottom: 0.75,
        header: 0.3,
        footer: 0.3,
    });

    let drawing = has_drawing.then(|| DrawingRef {
        r_id: "rId1".to_string(),
    });

    let ws = WorksheetXml {
        dimension,
        sheet_views,
        sheet_format_pr,
        cols,
        sheet_data,
        merge_cells: build_merge_cells(sheet),
        page_margins,
        drawing,
        ..WorksheetXml::default()
    };

    let body = quick_xml::se::to_string(&ws).expect("WorksheetXml always serializes");
    with_declaration(&body)
}

fn build_merge_cells(sheet: &Sheet) -> Option<MergeCells> {
    let ranges = sheet.merged_ranges();
    if ranges.is_empty() {
        return None;
    }
    let merge_cells: Vec<MergeCell> = ranges
        .iter()
        .filter_map(|range| range.to_a1().ok())
        .map(|reference| MergeCell { reference })
        .collect();
    Some(MergeCells {
        count: Some(merge_cells.len() as u32),
        merge_cells,
    })
}

fn build_cols(sheet: &Sheet) -> Option<Cols> {
    let widths = sheet.custom_col_widths();
    if widths.is_empty() {
        return None;
    }
    let cols = widths
        .into_iter()
        .map(|(col, width_px)| Col {
            min: col,
            max: col,
            width: Some(width_px / PIXELS_PER_COLUMN_UNIT),
            style: None,
            hidden: None,
            custom_width: Some(true),
            outline_level: None,
        })
        .collect();
    Some(Cols { cols })
}

fn build_sheet_data(sheet: &Sheet, styles: &mut StyleTable, sst: &mut SharedStringTable) -> SheetData {
    let used = sheet.used_addresses_sorted();

    let mut row_numbers: Vec<u32> = used.iter().map(|(coord, _)| coord.row).collect();
    row_numbers.extend(sheet.custom_row_heights().iter().map(|(row, _)| *row));
    row_numbers.sort_unstable();
    row_numbers.dedup();

    let rows = row_numbers
        .into_iter()
        .map(|row_num| build_row(row_num, &used, sheet, styles, sst))
        .collect();

    SheetData { rows }
}

fn build_row(
    row_num: u32,
    used: &[(CellCoordinate, String)],
    sheet: &Sheet,
    styles: &mut StyleTable,
    sst: &mut SharedStringTable,
) -> Row {
    let row_cells: Vec<&(CellCoordinate, String)> =
        used.iter().filter(|(coord, _)| coord.row == row_num).collect();

    let spans = if row_cells.is_empty() {
        None
    } else {
        let min_col = row_cells.iter().map(|(c, _)| c.col).min().unwrap();
        let max_col = row_cells.iter().map(|(c, _)| c.col).max().unwrap();
        Some(format!("{min_col}:{max_col}"))
    };

    let height_px = sheet.row_height_px(row_num);
    let ht = height_px.map(|px| px / PIXELS_PER_ROW_UNIT);

    let cells = row_cells
        .into_iter()
        .map(|(_, address)| build_cell(address, sheet, styles, sst))
        .collect();

    Row {
        r: row_num,
        spans,
        s: None,
        custom_format: None,
        ht,
        hidden: None,
        custom_height: ht.map(|_| true),
        outline_level: None,
        cells,
    }
}

fn build_cell(address: &str, sheet: &Sheet, styles: &mut StyleTable, sst: &mut SharedStringTable) -> Cell {
    let style_id = sheet.format(address).map(|format| styles.register(format));
    let value = sheet.cell(address).cloned().unwrap_or(CellValue::Empty);
    let (t, v, f) = cell_payload(&value, sst);

    Cell {
        r: address.to_string(),
        s: style_id,
        t,
        v,
        f,
        is: None,
    }
}

fn cell_payload(value: &CellValue, sst: &mut SharedStringTable) -> (Option<String>, Option<String>, Option<CellFormula>) {
    match value {
        CellValue::Empty => (None, None, None),
        CellValue::Bool(b) => (
            Some(cell_types::BOOLEAN.to_string()),
            Some((if *b { "1" } else { "0" }).to_string()),
            None,
        ),
        CellValue::Number(n) => (
            Some(cell_types::NUMBER.to_string()),
            Some(CellValue::Number(*n).to_string()),
            None,
        ),
        CellValue::String(s) => {
            let idx = sst.add(s);
            (Some(cell_types::SHARED_STRING.to_string()), Some(idx.to_string()), None)
        }
        CellValue::Date(d) => (
            Some(cell_types::NUMBER.to_string()),
            Some(CellValue::Number(CellValue::serial_day(d)).to_string()),
            None,
        ),
        CellValue::Formula { expr, result } => (
            Some(cell_types::FORMULA_STRING.to_string()),
            result.as_ref().map(|r| r.to_string()),
            Some(CellFormula {
                t: None,
                reference: None,
                si: None,
                value: Some(expr.clone()),
            }),
        ),
        CellValue::Error(e) => (Some(cell_types::ERROR.to_string()), Some(e.clone()), None),
    }
}
