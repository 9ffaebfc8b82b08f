//! XLSX styles (styles.xml) read/write helpers

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use rootsheets_core::style::{Alignment, FontStyle, HorizontalAlignment, Style};
use rootsheets_core::Workbook;

// === Writing ===

/// Workbook-wide `cellXfs` table built from the per-sheet style pools
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Deduplicated styles; the position is the xf id (0 = default)
    styles: Vec<Style>,
    /// Per worksheet: local style index -> xf id
    sheet_maps: Vec<HashMap<u32, u32>>,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut styles = vec![Style::default()];
        let mut style_to_xf: HashMap<Style, u32> = HashMap::new();
        style_to_xf.insert(Style::default(), 0);

        let mut sheet_maps = Vec::with_capacity(workbook.sheet_count());

        for sheet in workbook.worksheets() {
            let mut map: HashMap<u32, u32> = HashMap::new();
            map.insert(0, 0);

            for (_row, _col, cell) in sheet.iter_cells() {
                let local_idx = cell.style_index;
                if map.contains_key(&local_idx) {
                    continue;
                }

                let style = sheet
                    .style_by_index(local_idx)
                    .cloned()
                    .unwrap_or_default();

                let xf_id = *style_to_xf.entry(style.clone()).or_insert_with(|| {
                    styles.push(style);
                    (styles.len() - 1) as u32
                });
                map.insert(local_idx, xf_id);
            }

            sheet_maps.push(map);
        }

        Self { styles, sheet_maps }
    }

    pub(crate) fn xf_id_for(&self, sheet_index: usize, local_style_index: u32) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|m| m.get(&local_style_index).copied())
            .unwrap_or(0)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut fonts: Vec<&FontStyle> = Vec::new();
        let mut font_ids: HashMap<&FontStyle, u32> = HashMap::new();
        let mut xf_font_ids = Vec::with_capacity(self.styles.len());

        for style in &self.styles {
            let id = *font_ids.entry(&style.font).or_insert_with(|| {
                fonts.push(&style.font);
                (fonts.len() - 1) as u32
            });
            xf_font_ids.push(id);
        }

        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        // Excel requires the first two fills to be none and gray125
        xml.push_str(
            r#"
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for (style, font_id) in self.styles.iter().zip(xf_font_ids) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(style, font_id));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    s.push_str(&format!("<name val=\"{}\"/>", escape(font.name.as_str())));
    s.push_str("</font>");
    s
}

fn write_xf(style: &Style, font_id: u32) -> String {
    let mut s = format!(
        "<xf numFmtId=\"0\" fontId=\"{}\" fillId=\"0\" borderId=\"0\" xfId=\"0\"",
        font_id
    );
    if style.font != FontStyle::default() {
        s.push_str(" applyFont=\"1\"");
    }
    if style.alignment == Alignment::default() {
        s.push_str("/>");
        return s;
    }
    s.push_str(&format!(
        " applyAlignment=\"1\"><alignment horizontal=\"{}\"/></xf>",
        style.alignment.horizontal.as_str()
    ));
    s
}

// === Reading ===

/// Parse `xl/styles.xml` into a list indexed by xf id
pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<Vec<Style>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut fonts: Vec<FontStyle> = Vec::new();
    let mut xfs: Vec<(usize, Alignment)> = Vec::new();

    let mut in_fonts = false;
    let mut in_cell_xfs = false;
    let mut current_font: Option<FontStyle> = None;

    loop {
        let event = xml_reader.read_event_into(&mut buf);
        let is_empty = matches!(event, Ok(Event::Empty(_)));
        match event {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"fonts" => in_fonts = true,
                b"cellXfs" => in_cell_xfs = true,
                b"font" if in_fonts => {
                    current_font = Some(FontStyle::default());
                    if is_empty {
                        fonts.extend(current_font.take());
                    }
                }
                b"b" => {
                    if let Some(font) = current_font.as_mut() {
                        font.bold = attr_value(&e, b"val").map_or(true, |v| v != "0");
                    }
                }
                b"sz" => {
                    if let (Some(font), Some(size)) = (
                        current_font.as_mut(),
                        attr_value(&e, b"val").and_then(|v| v.parse::<f64>().ok()),
                    ) {
                        font.size = size;
                    }
                }
                b"name" => {
                    if let (Some(font), Some(name)) =
                        (current_font.as_mut(), attr_value(&e, b"val"))
                    {
                        font.name = name;
                    }
                }
                b"xf" if in_cell_xfs => {
                    let font_id = attr_value(&e, b"fontId")
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(0);
                    xfs.push((font_id, Alignment::default()));
                }
                b"alignment" if in_cell_xfs => {
                    let horizontal = attr_value(&e, b"horizontal")
                        .and_then(|v| HorizontalAlignment::from_ooxml(&v));
                    if let (Some((_, alignment)), Some(h)) = (xfs.last_mut(), horizontal) {
                        alignment.horizontal = h;
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"fonts" => in_fonts = false,
                b"cellXfs" => in_cell_xfs = false,
                b"font" => fonts.extend(current_font.take()),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let styles = xfs
        .into_iter()
        .map(|(font_id, alignment)| Style {
            font: fonts.get(font_id).cloned().unwrap_or_default(),
            alignment,
        })
        .collect::<Vec<_>>();

    if styles.is_empty() {
        return Ok(vec![Style::default()]);
    }
    Ok(styles)
}

pub(crate) fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootsheets_core::Workbook;

    fn header_style() -> Style {
        Style::new()
            .bold(true)
            .horizontal_alignment(HorizontalAlignment::Center)
    }

    #[test]
    fn test_style_table_shares_xf_across_sheets() {
        let mut wb = Workbook::empty();
        for name in ["One", "Two"] {
            let idx = wb.add_worksheet_with_name(name).unwrap();
            let sheet = wb.worksheet_mut(idx).unwrap();
            sheet.set_cell_value("A5", "Iter").unwrap();
            sheet.set_cell_style("A5", &header_style()).unwrap();
            sheet.set_cell_value("A6", 0.0).unwrap();
        }

        let table = XlsxStyleTable::build(&wb);
        assert_eq!(table.styles.len(), 2);
        assert_eq!(table.xf_id_for(0, 1), 1);
        assert_eq!(table.xf_id_for(1, 1), 1);
        assert_eq!(table.xf_id_for(1, 0), 0);
        assert_eq!(table.xf_id_for(7, 3), 0);
    }

    #[test]
    fn test_styles_xml_roundtrip() {
        let mut wb = Workbook::empty();
        let idx = wb.add_worksheet_with_name("Styled").unwrap();
        let sheet = wb.worksheet_mut(idx).unwrap();
        sheet.set_cell_value("B5", "a").unwrap();
        sheet.set_cell_style("B5", &header_style()).unwrap();

        let xml = XlsxStyleTable::build(&wb).to_styles_xml();
        assert!(xml.contains("<b/>"));
        assert!(xml.contains("<alignment horizontal=\"center\"/>"));

        let styles = read_styles_xml(xml.as_bytes()).unwrap();
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0], Style::default());
        assert_eq!(styles[1], header_style());
    }
}
