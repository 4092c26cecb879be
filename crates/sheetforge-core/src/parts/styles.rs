//! Builds `xl/styles.xml` (C6), per spec §4.6.
//!
//! Generalizes `StyleSheet::default()`'s single-record shape to `F` registered
//! formats: one parallel font/fill/xf entry per format, in dedup-table
//! insertion order, plus the fixed "one empty border record" simplification
//! noted in DESIGN.md.

use sheetforge_xml::styles::{
    Alignment, Border, BorderSide, Borders, CellStyle, CellStyleXfs, CellStyles, CellXfs, Color,
    Dxfs, Fill, Fills, Font, FontFamily, FontName, FontScheme, FontSize, Fonts, NumFmt, NumFmts,
    PatternFill, StyleSheet, TableStyles, Underline, Xf,
};

use crate::format::{
    BorderStyle, CellFormat, FontStyle, FontWeight, HorizontalAlign, NumberFormat, TextDecoration,
    VerticalAlign,
};
use crate::numfmt::NumberFormatTable;
use crate::style_table::StyleTable;

use super::with_declaration;

/// Builds the styles part from the registered format/number-format tables.
pub fn build(styles: &StyleTable, num_fmts: &NumberFormatTable) -> String {
    let sheet = build_stylesheet(styles, num_fmts);
    let body = quick_xml::se::to_string(&sheet).expect("StyleSheet always serializes");
    with_declaration(&body)
}

fn build_stylesheet(styles: &StyleTable, num_fmts: &NumberFormatTable) -> StyleSheet {
    let formats = styles.formats();

    let mut num_fmt_entries = vec![NumFmt {
        num_fmt_id: 0,
        format_code: "General".to_string(),
    }];
    for entry in num_fmts.entries() {
        num_fmt_entries.push(NumFmt {
            num_fmt_id: entry.id,
            format_code: entry.code.clone(),
        });
    }
    let num_fmts_part = NumFmts {
        count: Some(num_fmt_entries.len() as u32),
        num_fmts: num_fmt_entries,
    };

    let mut fonts = vec![default_font()];
    for format in formats {
        fonts.push(font_for_format(format));
    }
    let fonts_part = Fonts {
        count: Some(fonts.len() as u32),
        fonts,
    };

    let mut fills = vec![
        Fill {
            pattern_fill: Some(PatternFill {
                pattern_type: Some("none".to_string()),
                fg_color: None,
                bg_color: None,
            }),
        },
        Fill {
            pattern_fill: Some(PatternFill {
                pattern_type: Some("gray125".to_string()),
                fg_color: None,
                bg_color: None,
            }),
        },
    ];
    for format in formats {
        fills.push(fill_for_format(format));
    }
    let fills_part = Fills {
        count: Some(fills.len() as u32),
        fills,
    };

    let empty_border = Border {
        diagonal_up: None,
        diagonal_down: None,
        left: Some(BorderSide { style: None, color: None }),
        right: Some(BorderSide { style: None, color: None }),
        top: Some(BorderSide { style: None, color: None }),
        bottom: Some(BorderSide { style: None, color: None }),
        diagonal: Some(BorderSide { style: None, color: None }),
    };
    let borders = Borders {
        count: Some(1),
        borders: vec![empty_border],
    };

    let cell_style_xfs = CellStyleXfs {
        count: Some(1),
        xfs: vec![default_xf()],
    };

    let mut cell_xfs = vec![default_xf()];
    for (i, format) in formats.iter().enumerate() {
        cell_xfs.push(xf_for_format(format, i, num_fmts));
    }
    let cell_xfs_part = CellXfs {
        count: Some(cell_xfs.len() as u32),
        xfs: cell_xfs,
    };

    let cell_styles = CellStyles {
        count: Some(1),
        cell_styles: vec![CellStyle {
            name: "Normal".to_string(),
            xf_id: 0,
            builtin_id: Some(0),
        }],
    };

    StyleSheet {
        xmlns: sheetforge_xml::namespaces::SPREADSHEET_ML.to_string(),
        num_fmts: Some(num_fmts_part),
        fonts: fonts_part,
        fills: fills_part,
        borders,
        cell_style_xfs: Some(cell_style_xfs),
        cell_xfs: cell_xfs_part,
        cell_styles: Some(cell_styles),
        dxfs: Some(Dxfs { count: Some(0), dxfs: vec![] }),
        table_styles: Some(TableStyles {
            count: Some(0),
            default_table_style: Some("TableStyleMedium2".to_string()),
            default_pivot_style: Some("PivotStyleLight16".to_string()),
        }),
    }
}

fn default_font() -> Font {
    Font {
        b: None,
        i: None,
        strike: None,
        u: None,
        sz: Some(FontSize { val: 11.0 }),
        color: Some(Color {
            auto: None,
            indexed: None,
            rgb: None,
            theme: Some(1),
            tint: None,
        }),
        name: Some(FontName { val: "Calibri".to_string() }),
        family: Some(FontFamily { val: 2 }),
        scheme: Some(FontScheme { val: "minor".to_string() }),
    }
}

fn font_for_format(format: &CellFormat) -> Font {
    let mut font = default_font();
    if let Some(name) = &format.font_name {
        font.name = Some(FontName { val: name.clone() });
    }
    if let Some(size) = format.font_size {
        font.sz = Some(FontSize { val: size });
    }
    if matches!(format.font_weight, Some(FontWeight::Bold)) {
        font.b = Some(sheetforge_xml::styles::BoolVal { val: None });
    }
    if matches!(format.font_style, Some(FontStyle::Italic)) {
        font.i = Some(sheetforge_xml::styles::BoolVal { val: None });
    }
    if matches!(format.text_decoration, Some(TextDecoration::Underline)) {
        font.u = Some(Underline { val: None });
    }
    if let Some(color) = &format.font_color {
        font.color = Some(Color {
            auto: None,
            indexed: None,
            rgb: Some(format!("FF{color}")),
            theme: None,
            tint: None,
        });
    }
    font
}

fn fill_for_format(format: &CellFormat) -> Fill {
    match &format.background_color {
        Some(color) => Fill {
            pattern_fill: Some(PatternFill {
                pattern_type: Some("solid".to_string()),
                fg_color: Some(Color {
                    auto: None,
                    indexed: None,
                    rgb: Some(format!("FF{color}")),
                    theme: None,
                    tint: None,
                }),
                bg_color: None,
            }),
        },
        None => Fill {
            pattern_fill: Some(PatternFill {
                pattern_type: Some("none".to_string()),
                fg_color: None,
                bg_color: None,
            }),
        },
    }
}

fn default_xf() -> Xf {
    Xf {
        num_fmt_id: Some(0),
        font_id: Some(0),
        fill_id: Some(0),
        border_id: Some(0),
        xf_id: Some(0),
        apply_number_format: None,
        apply_font: None,
        apply_fill: None,
        apply_border: None,
        apply_alignment: None,
        alignment: None,
        protection: None,
    }
}

fn xf_for_format(format: &CellFormat, index: usize, num_fmts: &NumberFormatTable) -> Xf {
    let num_fmt_id = format
        .number_format
        .as_ref()
        .map(|nf| resolve_num_fmt_id(nf, num_fmts))
        .unwrap_or(0);

    let alignment = if format.has_alignment() {
        Some(Alignment {
            horizontal: format.horizontal_align.map(horizontal_align_str),
            vertical: format.vertical_align.map(vertical_align_str),
            wrap_text: format.wrap_text,
            text_rotation: format.text_rotation.map(|r| r as u32),
            indent: None,
            shrink_to_fit: None,
        })
    } else {
        None
    };

    Xf {
        num_fmt_id: Some(num_fmt_id),
        font_id: Some((index + 1) as u32),
        fill_id: Some((index + 2) as u32),
        border_id: Some(0),
        xf_id: Some(0),
        apply_number_format: format.number_format.as_ref().map(|_| true),
        apply_font: format.has_font().then_some(true),
        apply_fill: format.background_color.as_ref().map(|_| true),
        apply_border: has_any_border(format).then_some(true),
        apply_alignment: format.has_alignment().then_some(true),
        alignment,
        protection: None,
    }
}

fn has_any_border(format: &CellFormat) -> bool {
    !matches!(format.border_top, None | Some(BorderStyle::None))
        || !matches!(format.border_bottom, None | Some(BorderStyle::None))
        || !matches!(format.border_left, None | Some(BorderStyle::None))
        || !matches!(format.border_right, None | Some(BorderStyle::None))
}

fn resolve_num_fmt_id(fmt: &NumberFormat, table: &NumberFormatTable) -> u32 {
    match fmt {
        NumberFormat::Preset(id) => *id,
        NumberFormat::Custom(code) => table
            .entries()
            .iter()
            .find(|e| &e.code == code)
            .map(|e| e.id)
            .unwrap_or(0),
    }
}

fn horizontal_align_str(align: HorizontalAlign) -> String {
    match align {
        HorizontalAlign::General => "general",
        HorizontalAlign::Left => "left",
        HorizontalAlign::Center => "center",
        HorizontalAlign::Right => "right",
        HorizontalAlign::Fill => "fill",
        HorizontalAlign::Justify => "justify",
    }
    .to_string()
}

fn vertical_align_str(align: VerticalAlign) -> String {
    match align {
        VerticalAlign::Top => "top",
        VerticalAlign::Center => "center",
        VerticalAlign::Bottom => "bottom",
    }
    .to_string()
}
