//! XLSX reader
//!
//! Reads back the subset of SpreadsheetML the writer produces: sheet order
//! and names, numbers, strings (shared or inline), formula text, bold and
//! alignment styles, and frozen panes. Anything else in the package is
//! skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use zip::ZipArchive;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{attr_value, read_styles_xml};
use rootsheets_core::{CellAddress, CellValue, Style, Workbook, Worksheet};

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let path = path.as_ref();
        log::debug!("reading workbook from {}", path.display());
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let styles = match archive.by_name("xl/styles.xml") {
            Ok(file) => read_styles_xml(file)?,
            Err(_) => vec![Style::default()],
        };
        let (sheet_info, active_tab) = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();
        for (name, r_id) in &sheet_info {
            let path = sheet_paths.get(r_id).ok_or_else(|| {
                XlsxError::InvalidFormat(format!("sheet '{}' has no relationship {}", name, r_id))
            })?;
            let mut worksheet = Worksheet::new(name.as_str());
            Self::read_worksheet(&mut archive, path, &mut worksheet, &shared_strings, &styles)?;
            log::debug!(
                "read worksheet '{}' ({} cells)",
                name,
                worksheet.cell_count()
            );
            workbook.add_existing_worksheet(worksheet)?;
        }

        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat("workbook has no sheets".into()));
        }
        if active_tab < workbook.sheet_count() {
            workbook.set_active_sheet(active_tab)?;
        }

        Ok(workbook)
    }

    fn read_shared_strings<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"t" if in_si => in_t = true,
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(std::mem::take(&mut current));
                        in_si = false;
                    }
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    current.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Sheet (name, rId) pairs in document order plus the active tab
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
    ) -> XlsxResult<(Vec<(String, String)>, usize)> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();
        let mut active_tab = 0;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"sheet" => {
                        if let (Some(name), Some(r_id)) =
                            (attr_value(&e, b"name"), attr_value(&e, b"r:id"))
                        {
                            sheets.push((name, r_id));
                        }
                    }
                    b"workbookView" => {
                        active_tab = attr_value(&e, b"activeTab")
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(0);
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok((sheets, active_tab))
    }

    /// Worksheet relationship ids mapped to archive paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Targets are relative to xl/ unless absolute
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    fn read_worksheet<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
        styles: &[Style],
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut cell: Option<PendingCell> = None;
        let mut text_target: Option<TextTarget> = None;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"c" => cell = Some(PendingCell::from_element(&e)?),
                    b"v" => text_target = Some(TextTarget::Value),
                    b"f" => text_target = Some(TextTarget::Formula),
                    b"t" if cell.is_some() => text_target = Some(TextTarget::Inline),
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"c" => {
                        PendingCell::from_element(&e)?.apply(worksheet, shared_strings, styles)?
                    }
                    b"pane" => Self::apply_pane(&e, worksheet),
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if let (Some(target), Some(pending)) = (text_target, cell.as_mut()) {
                        let text = e.unescape()?.into_owned();
                        match target {
                            TextTarget::Value => pending.value = Some(text),
                            TextTarget::Formula => pending.formula = Some(text),
                            TextTarget::Inline => pending.inline.push_str(&text),
                        }
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            pending.apply(worksheet, shared_strings, styles)?;
                        }
                    }
                    b"v" | b"f" | b"t" => text_target = None,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    fn apply_pane(e: &BytesStart<'_>, worksheet: &mut Worksheet) {
        if attr_value(e, b"state").as_deref() != Some("frozen") {
            return;
        }
        let rows = attr_value(e, b"ySplit")
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0) as u32;
        let cols = attr_value(e, b"xSplit")
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0) as u16;
        worksheet.set_freeze_panes(rows, cols);
    }
}

#[derive(Debug, Clone, Copy)]
enum TextTarget {
    Value,
    Formula,
    Inline,
}

/// A `<c>` element collected until its end tag
#[derive(Debug)]
struct PendingCell {
    address: CellAddress,
    cell_type: Option<String>,
    style: u32,
    value: Option<String>,
    formula: Option<String>,
    inline: String,
}

impl PendingCell {
    fn from_element(e: &BytesStart<'_>) -> XlsxResult<Self> {
        let cell_ref = attr_value(e, b"r")
            .ok_or_else(|| XlsxError::Parse("cell without a reference".into()))?;
        let address = CellAddress::parse(&cell_ref).map_err(|err| {
            XlsxError::Parse(format!("Invalid cell reference '{}': {}", cell_ref, err))
        })?;

        Ok(Self {
            address,
            cell_type: attr_value(e, b"t"),
            style: attr_value(e, b"s")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            value: None,
            formula: None,
            inline: String::new(),
        })
    }

    fn apply(
        self,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
        styles: &[Style],
    ) -> XlsxResult<()> {
        let (row, col) = (self.address.row, self.address.col);

        let value = if let Some(formula) = self.formula {
            // Cached results are dropped; only the formula text is kept
            CellValue::formula(formula)
        } else {
            match (self.cell_type.as_deref(), self.value) {
                (Some("inlineStr"), _) => CellValue::string(self.inline),
                (Some("s"), Some(v)) => {
                    let idx: usize = v.parse().map_err(|_| {
                        XlsxError::Parse(format!("Invalid shared string index: {}", v))
                    })?;
                    let s = shared_strings.get(idx).ok_or_else(|| {
                        XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                    })?;
                    CellValue::string(s.as_str())
                }
                (None | Some("n"), Some(v)) => match v.parse::<f64>() {
                    Ok(n) => CellValue::Number(n),
                    Err(_) => CellValue::string(v),
                },
                (_, Some(v)) => CellValue::string(v),
                (_, None) => CellValue::Empty,
            }
        };

        if !value.is_empty() {
            worksheet.set_cell_value_at(row, col, value)?;
        }

        if self.style != 0 {
            let style = styles.get(self.style as usize).ok_or_else(|| {
                XlsxError::Parse(format!("Style index {} out of bounds", self.style))
            })?;
            worksheet.set_cell_style_at(row, col, style)?;
        }

        Ok(())
    }
}
