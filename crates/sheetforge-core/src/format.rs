//! Cell formatting record.
//!
//! [`CellFormat`] is a flat, all-optional record (unlike the nested
//! `Style`/`FontStyle`/`FillStyle` hierarchy of earlier designs) so that
//! structural equality over every field is a direct, cheap dedup key.

/// Horizontal alignment of a cell's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
}

/// Vertical alignment of a cell's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// `normal` or `bold` font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// `normal` or `italic` font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Text decoration (underline).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDecoration {
    None,
    Underline,
}

/// A numeric display format: one of Excel's built-in presets (by ID) or a
/// custom pattern string (e.g. `"0.00%"`).
#[derive(Debug, Clone, PartialEq)]
pub enum NumberFormat {
    /// A built-in numFmtId (< 164), e.g. 1 = "0", 9 = "0%", 14 = "m/d/yyyy".
    Preset(u32),
    /// A custom pattern string, assigned a numFmtId starting at 164.
    Custom(String),
}

/// The side of a cell border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
}

impl BorderStyle {
    pub fn as_xml_style(&self) -> Option<&'static str> {
        match self {
            BorderStyle::None => None,
            BorderStyle::Thin => Some("thin"),
            BorderStyle::Medium => Some("medium"),
            BorderStyle::Thick => Some("thick"),
            BorderStyle::Dashed => Some("dashed"),
            BorderStyle::Dotted => Some("dotted"),
            BorderStyle::Double => Some("double"),
        }
    }
}

/// A fully-optional cell formatting record. Every field defaults to `None`
/// (unset); equality is structural over all fields and is the dedup key for
/// the style table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFormat {
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_decoration: Option<TextDecoration>,
    /// 6 hex digit RGB, e.g. "FF0000".
    pub font_color: Option<String>,
    /// 6 hex digit RGB, e.g. "FFFF00".
    pub background_color: Option<String>,
    pub horizontal_align: Option<HorizontalAlign>,
    pub vertical_align: Option<VerticalAlign>,
    pub wrap_text: Option<bool>,
    /// 0 to 180 degrees.
    pub text_rotation: Option<i32>,
    pub number_format: Option<NumberFormat>,
    pub border_top: Option<BorderStyle>,
    pub border_bottom: Option<BorderStyle>,
    pub border_left: Option<BorderStyle>,
    pub border_right: Option<BorderStyle>,
    /// 6 hex digit RGB shared by all four border sides.
    pub border_color: Option<String>,
}

impl CellFormat {
    /// Returns `true` if at least one font-related field is set, the
    /// condition under which the emitted `<xf>` carries `applyFont="1"`.
    pub fn has_font(&self) -> bool {
        self.font_name.is_some()
            || self.font_size.is_some()
            || self.font_weight.is_some()
            || self.font_style.is_some()
            || self.text_decoration.is_some()
            || self.font_color.is_some()
    }

    /// Returns `true` if alignment-related fields are set, the condition
    /// under which the emitted `<xf>` carries `applyAlignment="1"` and a
    /// child `<alignment>`.
    pub fn has_alignment(&self) -> bool {
        self.horizontal_align.is_some()
            || self.vertical_align.is_some()
            || self.wrap_text.is_some()
            || self.text_rotation.is_some()
    }

    /// A canonical string built from every field (with nil sentinels for
    /// unset fields) used as the structural-equality dedup key for the
    /// style table. Two formats with equal keys share a style ID.
    pub fn dedup_key(&self) -> String {
        let num_fmt_key = match &self.number_format {
            None => "-".to_string(),
            Some(NumberFormat::Preset(id)) => format!("p{id}"),
            Some(NumberFormat::Custom(code)) => format!("c{code}"),
        };
        format!(
            "{}|{}|{:?}|{:?}|{:?}|{}|{}|{:?}|{:?}|{:?}|{:?}|{}|{:?}|{:?}|{:?}|{:?}|{}",
            self.font_name.as_deref().unwrap_or("-"),
            self.font_size.map(|v| v.to_bits()).unwrap_or(0),
            self.font_weight,
            self.font_style,
            self.text_decoration,
            self.font_color.as_deref().unwrap_or("-"),
            self.background_color.as_deref().unwrap_or("-"),
            self.horizontal_align,
            self.vertical_align,
            self.wrap_text,
            self.text_rotation,
            num_fmt_key,
            self.border_top,
            self.border_bottom,
            self.border_left,
            self.border_right,
            self.border_color.as_deref().unwrap_or("-"),
        )
    }
}
