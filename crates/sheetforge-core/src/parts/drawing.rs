//! Builds `xl/drawings/drawing{N}.xml` (C6), per spec §4.3's anchor geometry.
//!
//! Returns `None` for a sheet with no anchored images: spec §6 lists the
//! drawing part as present only when a sheet has images.

use sheetforge_xml::drawing::{
    AExt, Blip, BlipFill, CNvPicPr, CNvPr, ClientData, FillRect, MarkerType, NvPicPr, Offset,
    PicLocks, Picture, PrstGeom, SpPr, Stretch, TwoCellAnchor, WsDr, Xfrm,
};

use crate::error::{Error, Result};
use crate::geometry::{
    centering_offset_emu, drawing_extent_emu, ANCHOR_ROW_OFFSET_EMU, PIXELS_PER_COLUMN_UNIT,
    PIXELS_PER_ROW_UNIT,
};
use crate::sheet::Sheet;
use crate::utils::cell_ref::cell_name_to_coordinates;
use crate::utils::constants::{DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};
use crate::workbook::Workbook;

use super::with_declaration;

/// Builds the drawing part for `sheet`. Mutates `sheet`'s column widths and
/// row heights in place, growing any cell anchoring an image that does not
/// already carry an explicit size up to the image's effective pixel size.
pub fn build(sheet: &mut Sheet, workbook: &Workbook) -> Result<Option<String>> {
    let anchored = sheet.images_in_order();
    if anchored.is_empty() {
        return Ok(None);
    }

    let mut anchors = Vec::with_capacity(anchored.len());
    for (i, (address, image_id)) in anchored.iter().enumerate() {
        let image = workbook.image(image_id).ok_or_else(|| {
            Error::Internal(format!(
                "sheet '{}' anchors unregistered image '{image_id}'",
                sheet.name
            ))
        })?;
        let (col, row) = cell_name_to_coordinates(address)?;
        let (img_w_px, img_h_px) = image.effective_size_px();

        if sheet.col_width_px(col).is_none() {
            sheet.set_col_width_px(col, f64::from(img_w_px));
        }
        if sheet.row_height_px(row).is_none() {
            sheet.set_row_height_px(row, f64::from(img_h_px));
        }

        let cell_w_px = sheet
            .col_width_px(col)
            .unwrap_or(DEFAULT_COL_WIDTH * PIXELS_PER_COLUMN_UNIT);
        let cell_h_px = sheet
            .row_height_px(row)
            .unwrap_or(DEFAULT_ROW_HEIGHT * PIXELS_PER_ROW_UNIT);

        let offset_x = centering_offset_emu(cell_w_px, f64::from(img_w_px));
        let offset_y = centering_offset_emu(cell_h_px, f64::from(img_h_px));
        let (cx, cy) = drawing_extent_emu(img_w_px, img_h_px);

        let r_id = format!("rId{}", i + 1);

        anchors.push(TwoCellAnchor {
            edit_as: Some("oneCell".to_string()),
            from: MarkerType {
                col: col - 1,
                col_off: 0,
                row: row - 1,
                row_off: 0,
            },
            to: MarkerType {
                col,
                col_off: 0,
                row,
                row_off: ANCHOR_ROW_OFFSET_EMU as u64,
            },
            graphic_frame: None,
            pic: Some(Picture {
                nv_pic_pr: NvPicPr {
                    c_nv_pr: CNvPr {
                        id: (i + 1) as u32,
                        name: format!("Picture {}", i + 1),
                    },
                    c_nv_pic_pr: CNvPicPr {
                        pic_locks: Some(PicLocks {
                            no_change_aspect: Some(true),
                        }),
                    },
                },
                blip_fill: BlipFill {
                    blip: Blip { r_embed: r_id },
                    stretch: Stretch {
                        fill_rect: FillRect {},
                    },
                },
                sp_pr: SpPr {
                    xfrm: Xfrm {
                        off: Offset {
                            x: offset_x,
                            y: offset_y,
                        },
                        ext: AExt {
                            cx: cx as u64,
                            cy: cy as u64,
                        },
                    },
                    prst_geom: PrstGeom {
                        prst: "rect".to_string(),
                    },
                },
            }),
            shape: None,
            client_data: ClientData {},
        });
    }

    let ws_dr = WsDr {
        two_cell_anchors: anchors,
        ..WsDr::default()
    };
    let body = quick_xml::se::to_string(&ws_dr).expect("WsDr always serializes");
    Ok(Some(with_declaration(&body)))
}
