//! DrawingML Spreadsheet Drawing XML schema structures.
//!
//! Represents `xl/drawings/drawing{N}.xml` in the OOXML package.

use serde::{Deserialize, Serialize};

use crate::namespaces;

/// Root element for a spreadsheet drawing part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "wsDr")]
pub struct WsDr {
    #[serde(rename = "@xmlns:xdr")]
    pub xmlns_xdr: String,

    #[serde(rename = "@xmlns:a")]
    pub xmlns_a: String,

    #[serde(rename = "@xmlns:r")]
    pub xmlns_r: String,

    #[serde(rename = "@xmlns:a14")]
    pub xmlns_a14: String,

    #[serde(rename = "@xmlns:a16")]
    pub xmlns_a16: String,

    #[serde(rename = "xdr:twoCellAnchor", default)]
    pub two_cell_anchors: Vec<TwoCellAnchor>,
}

impl Default for WsDr {
    fn default() -> Self {
        Self {
            xmlns_xdr: namespaces::DRAWING_ML_SPREADSHEET.to_string(),
            xmlns_a: namespaces::DRAWING_ML.to_string(),
            xmlns_r: namespaces::RELATIONSHIPS.to_string(),
            xmlns_a14: namespaces::A14.to_string(),
            xmlns_a16: namespaces::A16.to_string(),
            two_cell_anchors: vec![],
        }
    }
}

/// An anchor defined by two cell markers (from/to).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoCellAnchor {
    /// `"oneCell"` keeps the picture locked to its anchor cell on resize,
    /// matching Excel's own export for non-resizable pictures.
    #[serde(rename = "@editAs", skip_serializing_if = "Option::is_none")]
    pub edit_as: Option<String>,

    #[serde(rename = "xdr:from")]
    pub from: MarkerType,

    #[serde(rename = "xdr:to")]
    pub to: MarkerType,

    #[serde(rename = "xdr:pic", skip_serializing_if = "Option::is_none")]
    pub pic: Option<Picture>,

    #[serde(rename = "xdr:clientData")]
    pub client_data: ClientData,
}

/// A cell marker indicating column, column offset, row, and row offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerType {
    #[serde(rename = "xdr:col")]
    pub col: u32,

    #[serde(rename = "xdr:colOff")]
    pub col_off: u64,

    #[serde(rename = "xdr:row")]
    pub row: u32,

    #[serde(rename = "xdr:rowOff")]
    pub row_off: u64,
}

/// Common non-visual properties (id and name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CNvPr {
    #[serde(rename = "@id")]
    pub id: u32,

    #[serde(rename = "@name")]
    pub name: String,
}

/// Transform (position and size) for a picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Xfrm {
    #[serde(rename = "a:off")]
    pub off: Offset,

    #[serde(rename = "a:ext")]
    pub ext: AExt,
}

/// Offset position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    #[serde(rename = "@x")]
    pub x: i64,

    #[serde(rename = "@y")]
    pub y: i64,
}

/// DrawingML extent (width/height).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AExt {
    #[serde(rename = "@cx")]
    pub cx: u64,

    #[serde(rename = "@cy")]
    pub cy: u64,
}

/// Picture element for images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    #[serde(rename = "xdr:nvPicPr")]
    pub nv_pic_pr: NvPicPr,

    #[serde(rename = "xdr:blipFill")]
    pub blip_fill: BlipFill,

    #[serde(rename = "xdr:spPr")]
    pub sp_pr: SpPr,
}

/// Non-visual picture properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NvPicPr {
    #[serde(rename = "xdr:cNvPr")]
    pub c_nv_pr: CNvPr,

    #[serde(rename = "xdr:cNvPicPr")]
    pub c_nv_pic_pr: CNvPicPr,
}

/// Non-visual picture-specific properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CNvPicPr {
    #[serde(rename = "a:picLocks", skip_serializing_if = "Option::is_none")]
    pub pic_locks: Option<PicLocks>,
}

/// Aspect-ratio lock on a picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PicLocks {
    #[serde(rename = "@noChangeAspect", skip_serializing_if = "Option::is_none")]
    pub no_change_aspect: Option<bool>,
}

/// Blip fill referencing an embedded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlipFill {
    #[serde(rename = "a:blip")]
    pub blip: Blip,

    #[serde(rename = "a:stretch")]
    pub stretch: Stretch,
}

/// Blip (Binary Large Image or Picture) reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blip {
    #[serde(rename = "@r:embed")]
    pub r_embed: String,
}

/// Stretch fill mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stretch {
    #[serde(rename = "a:fillRect")]
    pub fill_rect: FillRect,
}

/// Fill rectangle (empty element indicating full fill).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillRect {}

/// Shape properties for a picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpPr {
    #[serde(rename = "a:xfrm")]
    pub xfrm: Xfrm,

    #[serde(rename = "a:prstGeom")]
    pub prst_geom: PrstGeom,
}

/// Preset geometry (e.g., rectangle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrstGeom {
    #[serde(rename = "@prst")]
    pub prst: String,
}

/// Client data (empty element required by spec).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientData {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_dr_default() {
        let dr = WsDr::default();
        assert_eq!(dr.xmlns_xdr, namespaces::DRAWING_ML_SPREADSHEET);
        assert_eq!(dr.xmlns_a, namespaces::DRAWING_ML);
        assert_eq!(dr.xmlns_r, namespaces::RELATIONSHIPS);
        assert_eq!(dr.xmlns_a14, namespaces::A14);
        assert_eq!(dr.xmlns_a16, namespaces::A16);
        assert!(dr.two_cell_anchors.is_empty());
    }

    #[test]
    fn test_two_cell_anchor_edit_as_one_cell() {
        let anchor = TwoCellAnchor {
            edit_as: Some("oneCell".to_string()),
            from: MarkerType {
                col: 3,
                col_off: 0,
                row: 4,
                row_off: 0,
            },
            to: MarkerType {
                col: 4,
                col_off: 0,
                row: 5,
                row_off: 3175,
            },
            pic: None,
            client_data: ClientData {},
        };
        let xml = quick_xml::se::to_string(&anchor).unwrap();
        assert!(xml.contains("editAs=\"oneCell\""));
    }

    #[test]
    fn test_pic_locks_no_change_aspect() {
        let locks = CNvPicPr {
            pic_locks: Some(PicLocks {
                no_change_aspect: Some(true),
            }),
        };
        let xml = quick_xml::se::to_string(&locks).unwrap();
        assert!(xml.contains("noChangeAspect=\"true\""));
    }

    #[test]
    fn test_marker_type_serialize() {
        let marker = MarkerType {
            col: 1,
            col_off: 0,
            row: 2,
            row_off: 0,
        };
        let xml = quick_xml::se::to_string(&marker).unwrap();
        assert!(xml.contains("<xdr:col>1</xdr:col>"));
        assert!(xml.contains("<xdr:row>2</xdr:row>"));
    }

    #[test]
    fn test_a_ext_serialize() {
        let ext = AExt {
            cx: 9525000,
            cy: 4762500,
        };
        let xml = quick_xml::se::to_string(&ext).unwrap();
        assert!(xml.contains("cx=\"9525000\""));
        assert!(xml.contains("cy=\"4762500\""));
    }

    #[test]
    fn test_blip_serialize() {
        let blip = Blip {
            r_embed: "rId2".to_string(),
        };
        let xml = quick_xml::se::to_string(&blip).unwrap();
        assert!(xml.contains("r:embed=\"rId2\""));
    }

    #[test]
    fn test_prst_geom_serialize() {
        let geom = PrstGeom {
            prst: "rect".to_string(),
        };
        let xml = quick_xml::se::to_string(&geom).unwrap();
        assert!(xml.contains("prst=\"rect\""));
    }
}
