//! sheetforge: a write-only engine for generating `.xlsx` SpreadsheetML
//! packages from an in-memory workbook model.
//!
//! # Quick Start
//!
//! ```no_run
//! use sheetforge::{PermissiveSecurityPolicy, Workbook, WriteOptions};
//!
//! let mut wb = Workbook::new();
//! wb.sheet_mut("Sheet1").unwrap().set_cell("A1", "hi").unwrap();
//! sheetforge::write_to_path(&wb, "out.xlsx", &PermissiveSecurityPolicy, &WriteOptions::default()).unwrap();
//! ```

// Re-export core types
pub use sheetforge_core::cell::CellValue;
pub use sheetforge_core::error::{Error, Result};
pub use sheetforge_core::format::CellFormat;
pub use sheetforge_core::image::{ExcelImage, ImageFormat};
pub use sheetforge_core::security::{ImageVerdict, PermissiveSecurityPolicy, SecurityPolicy, StandardSecurityPolicy};
pub use sheetforge_core::sheet::Sheet;
pub use sheetforge_core::workbook::Workbook;
pub use sheetforge_core::write::{write_to_buffer, write_to_path, WriteOptions};

/// Utility functions for cell reference conversion.
pub mod utils {
    pub use sheetforge_core::utils::cell_ref::{
        cell_name_to_coordinates, column_name_to_number, column_number_to_name,
        coordinates_to_cell_name,
    };
    pub use sheetforge_core::utils::constants;
}
