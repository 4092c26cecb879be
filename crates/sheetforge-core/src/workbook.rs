//! In-memory workbook model (C4).
//!
//! A [`Workbook`] owns an ordered list of [`Sheet`]s, a flat list of
//! globally registered [`ExcelImage`]s, and a monotonically increasing
//! sheet-ID generator. It is a pure data model (spec §3): building the
//! `.xlsx` package from it is a separate, later phase (see the write
//! pipeline), unlike the teacher's `Workbook`, which held the parsed XML
//! structures directly and serialized them in place.

use crate::error::{Error, Result};
use crate::image::ExcelImage;
use crate::sheet::Sheet;
use crate::utils::constants::{MAX_SHEET_NAME_LENGTH, SHEET_NAME_INVALID_CHARS};

/// In-memory representation of a workbook: an ordered list of sheets plus
/// a flat, workbook-level image registry.
pub struct Workbook {
    sheets: Vec<Sheet>,
    images: Vec<ExcelImage>,
    next_sheet_id: u32,
}

fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > MAX_SHEET_NAME_LENGTH {
        return Err(Error::InvalidSheetName(name.to_string()));
    }
    if name.chars().any(|c| SHEET_NAME_INVALID_CHARS.contains(&c)) {
        return Err(Error::InvalidSheetName(name.to_string()));
    }
    Ok(())
}

impl Workbook {
    /// Create a new workbook containing a single empty sheet named "Sheet1"
    /// (sheet ID 1).
    pub fn new() -> Self {
        let mut wb = Self {
            sheets: Vec::new(),
            images: Vec::new(),
            next_sheet_id: 1,
        };
        let id = wb.allocate_sheet_id();
        wb.sheets.push(Sheet::new("Sheet1", id));
        wb
    }

    fn allocate_sheet_id(&mut self) -> u32 {
        let id = self.next_sheet_id;
        self.next_sheet_id += 1;
        id
    }

    /// Add a new empty sheet, returning a mutable reference to it.
    pub fn add_sheet(&mut self, name: impl Into<String>) -> Result<&mut Sheet> {
        let name = name.into();
        validate_sheet_name(&name)?;
        if self.sheets.iter().any(|s| s.name == name) {
            return Err(Error::SheetAlreadyExists { name });
        }
        let id = self.allocate_sheet_id();
        self.sheets.push(Sheet::new(name, id));
        Ok(self.sheets.last_mut().expect("just pushed"))
    }

    /// Remove a sheet by name. Refuses to remove the last remaining sheet.
    pub fn remove_sheet(&mut self, name: &str) -> Result<()> {
        if self.sheets.len() <= 1 {
            return Err(Error::Internal(
                "cannot remove the only remaining sheet".to_string(),
            ));
        }
        let idx = self.sheet_index(name)?;
        self.sheets.remove(idx);
        Ok(())
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    /// All sheets, in workbook order.
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    fn sheet_index(&self, name: &str) -> Result<usize> {
        self.sheets
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| Error::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Register an image in the workbook-level image list. Anchoring it to
    /// a cell is done separately via `Sheet::set_image`.
    pub fn add_image(&mut self, image: ExcelImage) -> Result<()> {
        if self.images.iter().any(|i| i.id == image.id) {
            return Err(Error::Internal(format!(
                "image id '{}' already registered",
                image.id
            )));
        }
        self.images.push(image);
        Ok(())
    }

    pub fn images(&self) -> &[ExcelImage] {
        &self.images
    }

    pub fn image(&self, id: &str) -> Option<&ExcelImage> {
        self.images.iter().find(|i| i.id == id)
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_workbook_has_sheet1_with_id_1() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_names(), vec!["Sheet1"]);
        assert_eq!(wb.sheet("Sheet1").unwrap().id, 1);
    }

    #[test]
    fn test_add_sheet_gets_next_monotonic_id() {
        let mut wb = Workbook::new();
        wb.add_sheet("Sheet2").unwrap();
        assert_eq!(wb.sheet("Sheet2").unwrap().id, 2);
    }

    #[test]
    fn test_sheet_ids_never_reused_after_removal() {
        let mut wb = Workbook::new();
        wb.add_sheet("Sheet2").unwrap();
        wb.remove_sheet("Sheet2").unwrap();
        wb.add_sheet("Sheet3").unwrap();
        assert_eq!(wb.sheet("Sheet3").unwrap().id, 3);
    }

    #[test]
    fn test_add_sheet_duplicate_name_errors() {
        let mut wb = Workbook::new();
        let err = wb.add_sheet("Sheet1").unwrap_err();
        assert!(matches!(err, Error::SheetAlreadyExists { .. }));
    }

    #[test]
    fn test_add_sheet_invalid_name_errors() {
        let mut wb = Workbook::new();
        let err = wb.add_sheet("Bad/Name").unwrap_err();
        assert!(matches!(err, Error::InvalidSheetName(_)));
    }

    #[test]
    fn test_add_sheet_name_too_long_errors() {
        let mut wb = Workbook::new();
        let name = "x".repeat(MAX_SHEET_NAME_LENGTH + 1);
        let err = wb.add_sheet(name).unwrap_err();
        assert!(matches!(err, Error::InvalidSheetName(_)));
    }

    #[test]
    fn test_remove_last_sheet_errors() {
        let mut wb = Workbook::new();
        assert!(wb.remove_sheet("Sheet1").is_err());
    }

    #[test]
    fn test_remove_nonexistent_sheet_errors() {
        let mut wb = Workbook::new();
        wb.add_sheet("Sheet2").unwrap();
        assert!(wb.remove_sheet("NoSuchSheet").is_err());
    }

    #[test]
    fn test_sheet_mut_allows_cell_editing() {
        let mut wb = Workbook::new();
        wb.sheet_mut("Sheet1").unwrap().set_cell("A1", "hi").unwrap();
        assert_eq!(
            wb.sheet("Sheet1").unwrap().cell("A1"),
            Some(&crate::cell::CellValue::String("hi".to_string()))
        );
    }

    #[test]
    fn test_add_image_and_lookup() {
        let mut wb = Workbook::new();
        let img = ExcelImage {
            id: "img1".to_string(),
            data: vec![0x89, 0x50, 0x4E, 0x47],
            format: crate::image::ImageFormat::Png,
            width_px: 10,
            height_px: 10,
            display_size_px: None,
        };
        wb.add_image(img).unwrap();
        assert!(wb.image("img1").is_some());
        assert_eq!(wb.images().len(), 1);
    }

    #[test]
    fn test_add_duplicate_image_id_errors() {
        let mut wb = Workbook::new();
        let img = |id: &str| ExcelImage {
            id: id.to_string(),
            data: vec![],
            format: crate::image::ImageFormat::Png,
            width_px: 1,
            height_px: 1,
            display_size_px: None,
        };
        wb.add_image(img("img1")).unwrap();
        assert!(wb.add_image(img("img1")).is_err());
    }

    #[test]
    fn test_default_trait() {
        let wb = Workbook::default();
        assert_eq!(wb.sheet_names(), vec!["Sheet1"]);
    }
}
