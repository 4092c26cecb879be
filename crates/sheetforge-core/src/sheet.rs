//! In-memory sheet model (C4).
//!
//! A [`Sheet`] owns the five per-cell maps and the merged-range list
//! described in spec §3. It is a pure data model: building the XML parts
//! from it is a separate, later phase (see the `parts` module), unlike the
//! teacher's worksheet operations which mutate `WorksheetXml` directly.

use std::collections::HashMap;

use crate::cell::CellValue;
use crate::error::Result;
use crate::format::CellFormat;
use crate::utils::cell_ref::{cell_name_to_coordinates, coordinates_to_cell_name};

/// A 1-based `(row, column)` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellCoordinate {
    pub row: u32,
    pub col: u32,
}

impl CellCoordinate {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// An inclusive rectangular range of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellCoordinate,
    pub end: CellCoordinate,
}

impl CellRange {
    /// Normalize two arbitrary corner references into a range whose
    /// `start` is the top-left and `end` is the bottom-right.
    pub fn new(a: CellCoordinate, b: CellCoordinate) -> Self {
        Self {
            start: CellCoordinate::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellCoordinate::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Row-major iteration order over every coordinate in the range.
    pub fn iter(&self) -> impl Iterator<Item = CellCoordinate> + '_ {
        (self.start.row..=self.end.row).flat_map(move |row| {
            (self.start.col..=self.end.col).map(move |col| CellCoordinate::new(row, col))
        })
    }

    pub fn to_a1(&self) -> Result<String> {
        let start = coordinates_to_cell_name(self.start.col, self.start.row)?;
        let end = coordinates_to_cell_name(self.end.col, self.end.row)?;
        Ok(format!("{start}:{end}"))
    }
}

/// A single worksheet's cell data, formatting, images, dimensions and
/// merged ranges. Addresses are normalized (uppercased) on every mutating
/// and read operation so `"a1"` and `"A1"` refer to the same cell.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub id: u32,
    values: HashMap<String, CellValue>,
    formats: HashMap<String, CellFormat>,
    /// address -> image ID (see `Workbook::images` for the payload).
    images: HashMap<String, String>,
    /// 1-based column index -> width in pixels.
    col_widths: HashMap<u32, f64>,
    /// 1-based row index -> height in pixels.
    row_heights: HashMap<u32, f64>,
    merged_ranges: Vec<CellRange>,
}

fn normalize(address: &str) -> Result<String> {
    let (col, row) = cell_name_to_coordinates(address)?;
    coordinates_to_cell_name(col, row)
}

impl Sheet {
    pub(crate) fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
            values: HashMap::new(),
            formats: HashMap::new(),
            images: HashMap::new(),
            col_widths: HashMap::new(),
            row_heights: HashMap::new(),
            merged_ranges: Vec::new(),
        }
    }

    /// Set a cell's value, overwriting any prior value at that address.
    /// Does not touch the cell's format.
    pub fn set_cell(&mut self, address: &str, value: impl Into<CellValue>) -> Result<()> {
        let key = normalize(address)?;
        self.values.insert(key, value.into());
        Ok(())
    }

    /// Set a cell's value and format atomically, overwriting both.
    pub fn set_cell_with_format(
        &mut self,
        address: &str,
        value: impl Into<CellValue>,
        format: CellFormat,
    ) -> Result<()> {
        let key = normalize(address)?;
        self.values.insert(key.clone(), value.into());
        self.formats.insert(key, format);
        Ok(())
    }

    pub fn set_format(&mut self, address: &str, format: CellFormat) -> Result<()> {
        let key = normalize(address)?;
        self.formats.insert(key, format);
        Ok(())
    }

    pub fn cell(&self, address: &str) -> Option<&CellValue> {
        let key = normalize(address).ok()?;
        self.values.get(&key)
    }

    pub fn format(&self, address: &str) -> Option<&CellFormat> {
        let key = normalize(address).ok()?;
        self.formats.get(&key)
    }

    /// Anchor an image (by its workbook-level image ID) at a cell.
    pub fn set_image(&mut self, address: &str, image_id: impl Into<String>) -> Result<()> {
        let key = normalize(address)?;
        self.images.insert(key, image_id.into());
        Ok(())
    }

    pub fn image_at(&self, address: &str) -> Option<&str> {
        let key = normalize(address).ok()?;
        self.images.get(&key).map(String::as_str)
    }

    /// Iterate anchored images in ascending-address order: `(address,
    /// image_id)`.
    pub fn images_in_order(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(CellCoordinate, String, String)> = self
            .images
            .iter()
            .filter_map(|(addr, id)| {
                cell_name_to_coordinates(addr)
                    .ok()
                    .map(|(col, row)| (CellCoordinate::new(row, col), addr.clone(), id.clone()))
            })
            .collect();
        entries.sort_by_key(|(coord, ..)| *coord);
        entries.into_iter().map(|(_, addr, id)| (addr, id)).collect()
    }

    pub fn set_col_width_px(&mut self, col: u32, width_px: f64) {
        self.col_widths.insert(col, width_px);
    }

    pub fn col_width_px(&self, col: u32) -> Option<f64> {
        self.col_widths.get(&col).copied()
    }

    pub fn set_row_height_px(&mut self, row: u32, height_px: f64) {
        self.row_heights.insert(row, height_px);
    }

    pub fn row_height_px(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    pub fn merge(&mut self, range: CellRange) {
        self.merged_ranges.push(range);
    }

    pub fn merged_ranges(&self) -> &[CellRange] {
        &self.merged_ranges
    }

    /// Columns with an explicit width, ascending by column index.
    pub fn custom_col_widths(&self) -> Vec<(u32, f64)> {
        let mut widths: Vec<(u32, f64)> = self.col_widths.iter().map(|(&c, &w)| (c, w)).collect();
        widths.sort_by_key(|(col, _)| *col);
        widths
    }

    /// Rows with an explicit height, ascending by row index.
    pub fn custom_row_heights(&self) -> Vec<(u32, f64)> {
        let mut heights: Vec<(u32, f64)> =
            self.row_heights.iter().map(|(&r, &h)| (r, h)).collect();
        heights.sort_by_key(|(row, _)| *row);
        heights
    }

    /// Empty all five maps and the merged-range list in one operation.
    pub fn clear(&mut self) {
        self.values.clear();
        self.formats.clear();
        self.images.clear();
        self.col_widths.clear();
        self.row_heights.clear();
        self.merged_ranges.clear();
    }

    /// Every used address (has a value or a format; an anchored image alone
    /// does not count), normalized and ascending by `(row, col)` -- the order
    /// the write pipeline must walk cells in for deterministic output.
    pub fn used_addresses_sorted(&self) -> Vec<(CellCoordinate, String)> {
        let mut addrs: std::collections::HashSet<&str> =
            self.values.keys().map(String::as_str).collect();
        addrs.extend(self.formats.keys().map(String::as_str));

        let mut out: Vec<(CellCoordinate, String)> = addrs
            .into_iter()
            .filter_map(|addr| {
                cell_name_to_coordinates(addr)
                    .ok()
                    .map(|(col, row)| (CellCoordinate::new(row, col), addr.to_string()))
            })
            .collect();
        out.sort_by_key(|(coord, _)| *coord);
        out
    }

    /// `<dimension ref>` bounds: the smallest rectangle covering every used
    /// cell, defaulting to `A1:A1` when the sheet is empty.
    pub fn dimension(&self) -> Result<CellRange> {
        let used = self.used_addresses_sorted();
        if used.is_empty() {
            return Ok(CellRange::new(
                CellCoordinate::new(1, 1),
                CellCoordinate::new(1, 1),
            ));
        }
        let min_row = used.iter().map(|(c, _)| c.row).min().unwrap();
        let max_row = used.iter().map(|(c, _)| c.row).max().unwrap();
        let min_col = used.iter().map(|(c, _)| c.col).min().unwrap();
        let max_col = used.iter().map(|(c, _)| c.col).max().unwrap();
        Ok(CellRange::new(
            CellCoordinate::new(min_row, min_col),
            CellCoordinate::new(max_row, max_col),
        ))
    }
}
