//! Embedded image model and header-only dimension extraction (C2).
//!
//! Format detection and pixel dimensions are read directly from the byte
//! prefix of GIF/PNG/JPEG payloads; no image decoder is invoked. Grounded in
//! the teacher's `image.rs` (EMU constant, format enum shape) and in
//! `rust_xlsxwriter`'s `process_png`/`process_jpg`/`process_gif` byte-offset
//! scans from the wider retrieval pack.

use crate::error::{Error, Result};

/// Supported embedded image formats. Decoding beyond header dimensions is
/// out of scope; anything else is rejected at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Gif,
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Gif => "image/gif",
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Gif => "gif",
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

/// An image registered in the workbook's global media list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExcelImage {
    /// Stable string ID, unique within the workbook.
    pub id: String,
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub width_px: u32,
    pub height_px: u32,
    /// Optional display size overriding `(width_px, height_px)` for all
    /// positioning math.
    pub display_size_px: Option<(u32, u32)>,
}

impl ExcelImage {
    /// Build an `ExcelImage`, sniffing format and dimensions from `data`'s
    /// header and validating that `format`, if supplied, agrees with the
    /// magic bytes (spec §3 invariant).
    pub fn from_bytes(id: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let (format, width_px, height_px) = read_header(&data)?;
        Ok(Self {
            id: id.into(),
            data,
            format,
            width_px,
            height_px,
            display_size_px: None,
        })
    }

    /// The pixel size used for all positioning math: the display size if
    /// set, otherwise the original decoded size.
    pub fn effective_size_px(&self) -> (u32, u32) {
        self.display_size_px.unwrap_or((self.width_px, self.height_px))
    }
}

/// Detect format and pixel dimensions from a GIF/PNG/JPEG byte prefix.
pub fn read_header(data: &[u8]) -> Result<(ImageFormat, u32, u32)> {
    if data.starts_with(&[0x47, 0x49, 0x46]) {
        let (w, h) = read_gif_header(data)?;
        Ok((ImageFormat::Gif, w, h))
    } else if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        let (w, h) = read_png_header(data)?;
        Ok((ImageFormat::Png, w, h))
    } else if data.starts_with(&[0xFF, 0xD8]) {
        let (w, h) = read_jpeg_header(data)?;
        Ok((ImageFormat::Jpeg, w, h))
    } else {
        Err(Error::InvalidImageHeader(
            "unrecognized magic bytes (expected GIF/PNG/JPEG)".to_string(),
        ))
    }
}

fn need(data: &[u8], len: usize) -> Result<()> {
    if data.len() < len {
        Err(Error::InvalidImageHeader(format!(
            "truncated buffer: need {len} bytes, have {}",
            data.len()
        )))
    } else {
        Ok(())
    }
}

/// GIF: width = LE u16 @6; height = LE u16 @8.
fn read_gif_header(data: &[u8]) -> Result<(u32, u32)> {
    need(data, 10)?;
    let width = u16::from_le_bytes([data[6], data[7]]) as u32;
    let height = u16::from_le_bytes([data[8], data[9]]) as u32;
    Ok((width, height))
}

/// PNG: width = BE u32 @16; height = BE u32 @20 (inside the IHDR chunk,
/// which is always the first chunk immediately after the 8-byte signature).
fn read_png_header(data: &[u8]) -> Result<(u32, u32)> {
    need(data, 24)?;
    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    Ok((width, height))
}

/// JPEG: scan `FF xx` markers; on any SOF marker (C0-CF except C4, C8, CC),
/// height = BE u16 @+5, width = BE u16 @+7 relative to the marker.
fn read_jpeg_header(data: &[u8]) -> Result<(u32, u32)> {
    let mut offset = 2usize;
    loop {
        need(data, offset + 4)?;
        if data[offset] != 0xFF {
            return Err(Error::InvalidImageHeader(
                "expected JPEG marker prefix 0xFF".to_string(),
            ));
        }
        let marker = data[offset + 1];
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            need(data, offset + 9)?;
            let height = u16::from_be_bytes([data[offset + 5], data[offset + 6]]) as u32;
            let width = u16::from_be_bytes([data[offset + 7], data[offset + 8]]) as u32;
            return Ok((width, height));
        }
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            // Markers with no length field.
            offset += 2;
            continue;
        }
        let length = u16::from_be_bytes([data[offset + 2], data[offset + 3]]) as usize;
        if length < 2 {
            return Err(Error::InvalidImageHeader(
                "invalid JPEG segment length".to_string(),
            ));
        }
        offset += 2 + length;
    }
}
