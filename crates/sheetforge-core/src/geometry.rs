//! Pixel ↔ EMU conversions and cell-size/offset math for image anchoring.
//!
//! Grounded in the teacher's `image.rs` `EMU_PER_PIXEL` constant, generalized
//! to the full set of conversions spec §4.3 requires.

/// EMU (English Metric Units) per pixel at 96 DPI.
/// 1 inch = 914400 EMU, 1 inch = 96 pixels => 1 pixel = 9525 EMU.
pub const EMU_PER_PIXEL: u64 = 9_525;

/// Pixels per spreadsheet column-width unit.
pub const PIXELS_PER_COLUMN_UNIT: f64 = 8.0;

/// Pixels per spreadsheet row-height unit (points).
pub const PIXELS_PER_ROW_UNIT: f64 = 1.33;

/// Convert a pixel measurement to EMU.
pub fn pixels_to_emu(px: f64) -> i64 {
    (px * EMU_PER_PIXEL as f64).round() as i64
}

/// Ideal column width (in spreadsheet width units) for an image `w` pixels
/// wide, such that the column renders at least as wide as the image.
pub fn ideal_column_width(w_px: u32) -> f64 {
    f64::from(w_px) / PIXELS_PER_COLUMN_UNIT
}

/// Ideal row height (in points) for an image `h` pixels tall, such that the
/// row renders at least as tall as the image.
pub fn ideal_row_height(h_px: u32) -> f64 {
    f64::from(h_px) / PIXELS_PER_ROW_UNIT
}

/// Recover the pixel size of a cell from its spreadsheet column width / row
/// height units.
pub fn cell_pixel_size(col_width_units: f64, row_height_units: f64) -> (f64, f64) {
    (
        col_width_units * PIXELS_PER_COLUMN_UNIT,
        row_height_units * PIXELS_PER_ROW_UNIT,
    )
}

/// Drawing extent (`cx`, `cy`) in EMU for an image `(w, h)` pixels.
pub fn drawing_extent_emu(w_px: u32, h_px: u32) -> (i64, i64) {
    (pixels_to_emu(f64::from(w_px)), pixels_to_emu(f64::from(h_px)))
}

/// Centering offset in EMU per axis: `max(0, (cellPx - imgPx) / 2) * 9525`.
pub fn centering_offset_emu(cell_px: f64, img_px: f64) -> i64 {
    let offset_px = ((cell_px - img_px) / 2.0).max(0.0);
    pixels_to_emu(offset_px)
}

/// Fixed row-offset, in EMU, applied to a drawing anchor's `<xdr:to>`
/// marker. Not derived from image or cell geometry: a small constant
/// nudge so the anchor's bottom-right corner does not bleed one pixel
/// into the next row.
pub const ANCHOR_ROW_OFFSET_EMU: i64 = 3_175;
