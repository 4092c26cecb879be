//! Number-format dedup table (C5, table 3).
//!
//! For every format with a number format set, computes its format-code
//! string (preset raw value or custom pattern), inserts it on first sight,
//! and assigns IDs starting at 164 -- the spreadsheet convention reserving
//! IDs below that for built-in codes. Stable, insertion-ordered, immutable
//! after the collection phase, matching spec §4.5.

use std::collections::HashMap;

use crate::format::NumberFormat;

/// IDs below this value are reserved for Excel's built-in number formats.
pub const CUSTOM_NUM_FMT_BASE: u32 = 164;

/// Map a built-in number format ID (0-49) to its format code string.
pub fn builtin_format_code(id: u32) -> Option<&'static str> {
    match id {
        0 => Some("General"),
        1 => Some("0"),
        2 => Some("0.00"),
        3 => Some("#,##0"),
        4 => Some("#,##0.00"),
        9 => Some("0%"),
        10 => Some("0.00%"),
        11 => Some("0.00E+00"),
        12 => Some("# ?/?"),
        13 => Some("# ??/??"),
        14 => Some("m/d/yyyy"),
        15 => Some("d-mmm-yy"),
        16 => Some("d-mmm"),
        17 => Some("mmm-yy"),
        18 => Some("h:mm AM/PM"),
        19 => Some("h:mm:ss AM/PM"),
        20 => Some("h:mm"),
        21 => Some("h:mm:ss"),
        22 => Some("m/d/yyyy h:mm"),
        37 => Some("#,##0_);(#,##0)"),
        38 => Some("#,##0_);[Red](#,##0)"),
        39 => Some("#,##0.00_);(#,##0.00)"),
        40 => Some("#,##0.00_);[Red](#,##0.00)"),
        45 => Some("mm:ss"),
        46 => Some("[h]:mm:ss"),
        47 => Some("mm:ss.0"),
        48 => Some("##0.0E+0"),
        49 => Some("@"),
        _ => None,
    }
}

/// One entry of the custom number-format dedup table.
#[derive(Debug, Clone, PartialEq)]
pub struct NumFmtEntry {
    pub id: u32,
    pub code: String,
}

/// Resolution of a `NumberFormat` to its concrete `numFmtId` / format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedNumFmt {
    pub num_fmt_id: u32,
}

/// Dedup table of custom number-format codes, IDs assigned from 164 in
/// first-sight insertion order.
#[derive(Debug, Clone, Default)]
pub struct NumberFormatTable {
    entries: Vec<NumFmtEntry>,
    index: HashMap<String, u32>,
}

impl NumberFormatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a `NumberFormat` to a `numFmtId`, registering a new custom
    /// entry on first sight if needed.
    pub fn resolve(&mut self, fmt: &NumberFormat) -> ResolvedNumFmt {
        match fmt {
            NumberFormat::Preset(id) => ResolvedNumFmt { num_fmt_id: *id },
            NumberFormat::Custom(code) => {
                let id = self.insert(code);
                ResolvedNumFmt { num_fmt_id: id }
            }
        }
    }

    /// Insert a custom format code, returning its assigned (or existing) ID.
    pub fn insert(&mut self, code: &str) -> u32 {
        if let Some(&id) = self.index.get(code) {
            return id;
        }
        let id = CUSTOM_NUM_FMT_BASE + self.entries.len() as u32;
        self.entries.push(NumFmtEntry {
            id,
            code: code.to_string(),
        });
        self.index.insert(code.to_string(), id);
        id
    }

    /// Entries in ascending ID (insertion) order.
    pub fn entries(&self) -> &[NumFmtEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
